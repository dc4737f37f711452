#![no_main]
use libfuzzer_sys::fuzz_target;
use zenplanar::PlanarImage;

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let word = |at: usize| u32::from_le_bytes(data[at..at + 4].try_into().unwrap());
    let width = word(0) % 512;
    let height = word(4) % 512;
    let y_stride = word(8) % 1024;
    let uv_stride = word(12) % 1024;

    // Bad geometry is an error, never a panic or an oversized slice.
    if let Ok(frame) = PlanarImage::with_strides(width, height, y_stride, uv_stride, None) {
        assert_eq!(frame.y().len(), y_stride as usize * height as usize);
        assert_eq!(frame.u().len(), frame.v().len());
    }

    let payload = &data[16..];
    let third = payload.len() / 3;
    let (y, rest) = payload.split_at(third);
    let (u, v) = rest.split_at(third);
    let _ = PlanarImage::from_planes(y, u, v, width, height, y_stride, uv_stride);
});
