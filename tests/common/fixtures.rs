//! Test fixtures: palettes and images written to temporary directories.

use palette_remap::services::ImageProcessor;
use palette_match::{Palette, Recolorer};
use std::path::Path;

/// Red, green, blue palette file contents (Paint.NET format)
pub const RGB_PALETTE: &str = "\
;paint.net Palette File
FFFF0000
FF00FF00
FF0000FF
";

/// The three primaries, in palette order
pub fn rgb_palette() -> Palette {
    Palette::from_hex(&["#FF0000", "#00FF00", "#0000FF"]).unwrap()
}

/// Processor with quantization off and PNG optimization off
pub fn processor(palette: Palette) -> ImageProcessor {
    ImageProcessor::new(Recolorer::new(palette).skip_quantize(true), false)
}

/// 2x2 RGBA image: red opaque, green half transparent (diagonal pattern)
pub fn rgba_2x2() -> Vec<u8> {
    vec![
        255, 0, 0, 255, //
        0, 255, 0, 128, //
        0, 255, 0, 128, //
        255, 0, 0, 255,
    ]
}

/// Near-primary noise, opaque: each pixel is close to one of the primaries
pub fn noisy_primaries_rgb(width: u32, height: u32) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let jitter = (i % 7) as u8 * 5;
            match i % 3 {
                0 => [230 + jitter / 2, jitter, 10],
                1 => [jitter, 220 + jitter, 15],
                _ => [5, jitter, 225 + jitter],
            }
        })
        .collect()
}

pub fn write_png_rgba(path: &Path, width: u32, height: u32, rgba: Vec<u8>) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbaImage::from_raw(width, height, rgba)
        .expect("buffer matches dimensions")
        .save(path)
        .unwrap();
}

pub fn write_png_rgb(path: &Path, width: u32, height: u32, rgb: Vec<u8>) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_raw(width, height, rgb)
        .expect("buffer matches dimensions")
        .save(path)
        .unwrap();
}

pub fn write_palette(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}
