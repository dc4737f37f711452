#![no_main]
use libfuzzer_sys::fuzz_target;
use zenplanar::*;

fuzz_target!(|data: &[u8]| {
    let Some(&[w, h]) = data.get(..2) else {
        return;
    };
    let width = u32::from(w % 64) + 1;
    let height = u32::from(h % 64) + 1;

    let mut packed = PackedImage::new(width, height, None).unwrap();
    for (word, rgb) in packed.words_mut().iter_mut().zip(data[2..].chunks(3)) {
        let mut px = 0u32;
        for &byte in rgb {
            px = px << 8 | u32::from(byte);
        }
        *word = px << 8;
    }

    // Down to 4:2:0 and back must never panic, whatever the pixels.
    let mut frame = PlanarImage::new(width, height, None).unwrap();
    packed_to_planar(&packed, &mut frame, &enough::Unstoppable).unwrap();
    let mut back = PackedImage::new(width, height, None).unwrap();
    planar_to_packed(&frame, &mut back, &enough::Unstoppable).unwrap();

    assert_eq!(frame.chroma_width(), width.div_ceil(2));
    assert_eq!(frame.chroma_height(), height.div_ceil(2));
    for &word in back.words() {
        assert_eq!(word & 0xFF, 0, "reconstructed word has a dirty low byte");
    }
});
