//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

/// Decode an image file into packed RGBA bytes
pub fn read_rgba(path: &Path) -> (u32, u32, Vec<u8>) {
    let img = image::open(path)
        .unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()))
        .to_rgba8();
    (img.width(), img.height(), img.into_raw())
}

/// Assert a file exists and starts with the PNG signature
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected output {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert every pixel color of an RGBA buffer is one of `colors`
pub fn assert_only_colors(rgba: &[u8], colors: &[[u8; 3]]) {
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        let rgb = [px[0], px[1], px[2]];
        assert!(
            colors.contains(&rgb),
            "Pixel {i} has color {rgb:?}, expected one of {colors:?}"
        );
    }
}

/// Assert the alpha channel of two RGBA buffers is identical
pub fn assert_same_alpha(actual: &[u8], expected: &[u8]) {
    let a: Vec<u8> = actual.chunks_exact(4).map(|px| px[3]).collect();
    let e: Vec<u8> = expected.chunks_exact(4).map(|px| px[3]).collect();
    assert_eq!(a, e, "alpha channel changed");
}
