//! Image file decoding and encoding.
//!
//! Inputs are decoded with the `image` crate (first frame only for
//! animated formats). PNG output is written directly with the `png` crate:
//! opaque results with at most 256 palette entries become an indexed PNG
//! with a PLTE chunk, everything else is 8-bit RGB/RGBA. Other output
//! formats go through the `image` crate.

use crate::error::ImageError;
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use palette_match::{Image, RecoloredImage};
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

/// Decode an image file into an [`Image`].
///
/// The alpha plane is present iff the source has an alpha channel.
pub fn decode_image(path: &Path) -> Result<Image, ImageError> {
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(format!("Failed to detect format: {e}")))?;
    decode_from_reader(reader)
}

/// Decode an in-memory image file.
pub fn decode_image_bytes(data: &[u8]) -> Result<Image, ImageError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(format!("Failed to detect format: {e}")))?;
    decode_from_reader(reader)
}

fn decode_from_reader<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<Image, ImageError> {
    let dynamic = reader
        .decode()
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    Ok(to_image(&dynamic))
}

fn to_image(dynamic: &DynamicImage) -> Image {
    let width = dynamic.width() as usize;
    let height = dynamic.height() as usize;
    if dynamic.color().has_alpha() {
        Image::from_rgba8(width, height, dynamic.to_rgba8().as_raw())
    } else {
        Image::from_rgb8(width, height, dynamic.to_rgb8().as_raw())
    }
}

/// Write a recolored image; the format follows the file extension.
pub fn save_image(image: &RecoloredImage, path: &Path, optimize: bool) -> Result<(), ImageError> {
    let format = ImageFormat::from_path(path).map_err(|e| ImageError::Encode(e.to_string()))?;

    if format == ImageFormat::Png {
        let bytes = encode_png(image, optimize)?;
        std::fs::write(path, bytes)?;
        return Ok(());
    }

    let (width, height) = dimensions(image)?;
    let dynamic = match image.alpha() {
        Some(_) if format != ImageFormat::Jpeg => {
            RgbaImage::from_raw(width, height, image.to_rgba()).map(DynamicImage::ImageRgba8)
        }
        alpha => {
            if alpha.is_some() {
                tracing::debug!(path = %path.display(), "Output format has no alpha, dropping it");
            }
            RgbImage::from_raw(width, height, image.to_rgb()).map(DynamicImage::ImageRgb8)
        }
    }
    .ok_or_else(|| ImageError::Encode("pixel buffer does not match dimensions".to_string()))?;

    dynamic
        .save_with_format(path, format)
        .map_err(|e| ImageError::Encode(e.to_string()))
}

/// Encode a recolored image as PNG, optionally re-compressed with oxipng.
pub fn encode_png(image: &RecoloredImage, optimize: bool) -> Result<Vec<u8>, ImageError> {
    let (width, height) = dimensions(image)?;
    let palette = image.palette();

    let (color_type, bit_depth, plte, data) = match image.alpha() {
        None if palette.len() <= 256 => {
            let (depth, bits) = match palette.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = palette.colors().iter().flat_map(|c| c.to_bytes()).collect();
            // Fits: every index is below the palette length
            let indices: Vec<u8> = image.indices().iter().map(|&i| i as u8).collect();
            let packed = if bits == 8 {
                indices
            } else {
                pack_nbits(&indices, image.width(), bits)
            };
            (png::ColorType::Indexed, depth, Some(plte), packed)
        }
        None => (png::ColorType::Rgb, png::BitDepth::Eight, None, image.to_rgb()),
        Some(_) => (png::ColorType::Rgba, png::BitDepth::Eight, None, image.to_rgba()),
    };

    // Fast settings when oxipng re-compresses afterwards
    let compression = if optimize {
        png::Compression::Fast
    } else {
        png::Compression::Default
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(compression);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    // Lossless only: alpha must survive byte for byte
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

fn dimensions(image: &RecoloredImage) -> Result<(u32, u32), ImageError> {
    let too_large = || ImageError::Encode(format!("{}x{} is too large", image.width(), image.height()));
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;
    if width == 0 || height == 0 {
        return Err(ImageError::Encode(format!(
            "cannot encode an empty {width}x{height} image"
        )));
    }
    Ok((width, height))
}

/// Pack palette indices into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Each row starts on a byte boundary; the last byte of a row is padded
/// with zero bits.
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(width.div_ceil(per_byte) * (indices.len() / width));

    for row in indices.chunks(width) {
        for group in row.chunks(per_byte) {
            let byte = group.iter().enumerate().fold(0u8, |byte, (i, &idx)| {
                byte | ((idx & mask) << (8 - bits - i as u8 * bits))
            });
            packed.push(byte);
        }
    }

    packed
}
