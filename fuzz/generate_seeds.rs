#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;

    let dir = "fuzz/corpus/fuzz_roundtrip";
    fs::create_dir_all(dir).unwrap();

    // Dimension byte pair, then RGB triples: a 4x3 ramp
    let mut ramp = vec![3u8, 2];
    ramp.extend((0..36).map(|i| (i * 7) as u8));
    fs::write(format!("{dir}/ramp_4x3.bin"), &ramp).unwrap();

    // 1x1, single saturated pixel
    fs::write(format!("{dir}/red_1x1.bin"), [0u8, 0, 255, 0, 0]).unwrap();

    // Odd dimensions with no pixel data (zero fill)
    fs::write(format!("{dir}/blank_7x5.bin"), [6u8, 4]).unwrap();

    let dir = "fuzz/corpus/fuzz_frame";
    fs::create_dir_all(dir).unwrap();

    // Geometry header: width, height, y_stride, uv_stride (LE), then planes
    let mut tight = Vec::new();
    for dim in [4u32, 2, 4, 2] {
        tight.extend_from_slice(&dim.to_le_bytes());
    }
    tight.extend_from_slice(&[0x80; 24]);
    fs::write(format!("{dir}/tight_4x2.bin"), &tight).unwrap();

    // Padded strides
    let mut padded = Vec::new();
    for dim in [3u32, 3, 8, 4] {
        padded.extend_from_slice(&dim.to_le_bytes());
    }
    padded.extend_from_slice(&[0x40; 72]);
    fs::write(format!("{dir}/padded_3x3.bin"), &padded).unwrap();

    // Degenerate geometry for edge coverage
    let mut zero = Vec::new();
    for dim in [0u32, 5, 5, 3] {
        zero.extend_from_slice(&dim.to_le_bytes());
    }
    fs::write(format!("{dir}/zero_width.bin"), &zero).unwrap();

    println!("Generated seed corpora under fuzz/corpus/");
}
