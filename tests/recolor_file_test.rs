//! Single-file recoloring through the library API.

mod common;

use common::*;
use palette_match::{DistanceMetric, Palette, Recolorer};
use palette_remap::error::ImageError;
use palette_remap::services::{load_palette, ImageProcessor};
use pretty_assertions::assert_eq;

#[test]
fn test_png_round_trip_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sprite.png");
    let output = dir.path().join("out/sprite.png");
    write_png_rgba(&input, 2, 2, rgba_2x2());

    processor(rgb_palette()).process_file(&input, &output).unwrap();

    assert_png_file(&output);
    let (w, h, rgba) = read_rgba(&output);
    assert_eq!((w, h), (2, 2));
    assert_eq!(rgba, rgba_2x2());
}

#[test]
fn test_alpha_preserved_with_quantize_and_perceptual() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("noisy.png");
    let output = dir.path().join("noisy-out.png");

    let rgb = noisy_primaries_rgb(8, 8);
    let rgba: Vec<u8> = rgb
        .chunks_exact(3)
        .enumerate()
        .flat_map(|(i, px)| [px[0], px[1], px[2], (i * 4) as u8])
        .collect();
    write_png_rgba(&input, 8, 8, rgba.clone());

    let recolorer = Recolorer::new(rgb_palette())
        .distance(DistanceMetric::Ciede2000)
        .quantize_colors(Some(4));
    ImageProcessor::new(recolorer, true)
        .process_file(&input, &output)
        .unwrap();

    let (_, _, out) = read_rgba(&output);
    assert_same_alpha(&out, &rgba);
    assert_only_colors(&out, &[[255, 0, 0], [0, 255, 0], [0, 0, 255]]);
}

#[test]
fn test_opaque_noise_snaps_to_palette() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("noise.png");
    let output = dir.path().join("noise-out.png");
    write_png_rgb(&input, 6, 3, noisy_primaries_rgb(6, 3));

    processor(rgb_palette()).process_file(&input, &output).unwrap();

    let (_, _, out) = read_rgba(&output);
    let expected: Vec<u8> = (0..18)
        .flat_map(|i| match i % 3 {
            0 => [255, 0, 0, 255],
            1 => [0, 255, 0, 255],
            _ => [0, 0, 255, 255],
        })
        .collect();
    assert_eq!(out, expected);
}

#[test]
fn test_palette_file_drives_recoloring() {
    let dir = tempfile::tempdir().unwrap();
    let palette_path = dir.path().join("palette.txt");
    write_palette(&palette_path, RGB_PALETTE);
    let palette = load_palette(&palette_path).unwrap();
    assert_eq!(palette, rgb_palette());

    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_png_rgb(&input, 1, 1, vec![20, 30, 200]);
    processor(palette).process_file(&input, &output).unwrap();

    let (_, _, out) = read_rgba(&output);
    assert_eq!(out, vec![0, 0, 255, 255]);
}

#[test]
fn test_jpeg_output_drops_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    write_png_rgba(&input, 2, 2, rgba_2x2());

    let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
    processor(palette).process_file(&input, &output).unwrap();

    let decoded = image::open(&output).unwrap();
    assert!(!decoded.color().has_alpha());
    assert_eq!((decoded.width(), decoded.height()), (2, 2));
}

#[test]
fn test_corrupt_input_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();

    let err = processor(rgb_palette())
        .process_file(&input, &dir.path().join("out.png"))
        .unwrap_err();
    assert!(matches!(err, ImageError::Decode(_)), "got {err:?}");
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_unknown_output_extension_is_encode_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_png_rgb(&input, 1, 1, vec![1, 2, 3]);

    let err = processor(rgb_palette())
        .process_file(&input, &dir.path().join("out.unknownext"))
        .unwrap_err();
    assert!(matches!(err, ImageError::Encode(_)), "got {err:?}");
}
