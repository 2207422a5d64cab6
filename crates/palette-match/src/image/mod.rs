//! In-memory input image: a color grid plus an optional alpha plane.

use crate::color::Srgb;

/// A width × height grid of sRGB pixels in row-major order, with an
/// optional alpha plane holding one byte per pixel.
///
/// The alpha plane is carried alongside the colors and never takes part in
/// matching.
///
/// # Example
///
/// ```
/// use palette_match::Image;
///
/// let rgba = [255, 0, 0, 255, 0, 255, 0, 128];
/// let image = Image::from_rgba8(2, 1, &rgba);
/// assert_eq!(image.alpha(), Some(&[255, 128][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
    alpha: Option<Vec<u8>>,
}

impl Image {
    /// Build an image from parts. Sizes are validated when the image is
    /// recolored, so a malformed image is reported per image rather than
    /// rejected here.
    pub fn new(width: usize, height: usize, pixels: Vec<Srgb>, alpha: Option<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            pixels,
            alpha,
        }
    }

    /// Build an opaque image from packed `[R, G, B, ...]` bytes.
    pub fn from_rgb8(width: usize, height: usize, rgb: &[u8]) -> Self {
        let pixels = rgb
            .chunks_exact(3)
            .map(|p| Srgb::from_u8(p[0], p[1], p[2]))
            .collect();
        Self::new(width, height, pixels, None)
    }

    /// Build an image with alpha from packed `[R, G, B, A, ...]` bytes.
    pub fn from_rgba8(width: usize, height: usize, rgba: &[u8]) -> Self {
        let mut pixels = Vec::with_capacity(rgba.len() / 4);
        let mut alpha = Vec::with_capacity(rgba.len() / 4);
        for p in rgba.chunks_exact(4) {
            pixels.push(Srgb::from_u8(p[0], p[1], p[2]));
            alpha.push(p[3]);
        }
        Self::new(width, height, pixels, Some(alpha))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    #[inline]
    pub fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }
}
