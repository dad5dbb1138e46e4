#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_encode";
    fs::create_dir_all(dir).unwrap();

    // Seed layout: [layout index, width, height, pixel bytes...]

    // Gray8 3x2
    let gray = b"\x00\x03\x02\x00\x40\x80\xc0\xff\x64";
    fs::write(format!("{dir}/gray8_3x2"), gray).unwrap();

    // Rgb8 2x2
    let rgb = b"\x02\x02\x02\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/rgb8_2x2"), rgb).unwrap();

    // Gray8 9x1, exercises a partial PBM byte
    let mut wide = vec![0u8, 9, 1];
    wide.extend((0..9).map(|i| if i % 3 == 0 { 0 } else { 255 }));
    fs::write(format!("{dir}/gray8_9x1"), wide).unwrap();

    // Rgba16 1x1
    let mut deep = vec![8u8, 1, 1];
    for c in [0xffffu16, 0x8000, 0x0001, 0xffff] {
        deep.extend_from_slice(&c.to_ne_bytes());
    }
    fs::write(format!("{dir}/rgba16_1x1"), deep).unwrap();

    // Gray16 2x1
    let mut gray16 = vec![1u8, 2, 1];
    for c in [0x0102u16, 0xfffe] {
        gray16.extend_from_slice(&c.to_ne_bytes());
    }
    fs::write(format!("{dir}/gray16_2x1"), gray16).unwrap();

    println!("Seeds written to {dir}/");
}
