//! RecoloredImage: palette indices plus the untouched alpha plane.
//!
//! The indexed form is canonical; RGB and RGBA buffers are computed on
//! demand by looking up palette colors.

use crate::palette::Palette;

/// The output of the recoloring pipeline.
///
/// Stores one palette index per pixel in row-major order, the image
/// dimensions, the palette, and the alpha plane copied verbatim from the
/// input image.
///
/// # Example
///
/// ```
/// use palette_match::{Palette, RecoloredImage, Srgb};
///
/// let palette = Palette::new(&[Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)]).unwrap();
/// let image = RecoloredImage::new(vec![0, 1, 1, 0], 2, 2, palette, None);
///
/// assert_eq!(image.to_rgb().len(), 2 * 2 * 3);
/// assert_eq!(&image.to_rgb()[..6], &[0, 0, 0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecoloredImage {
    /// Palette indices, one per pixel, row-major order.
    indices: Vec<u32>,
    width: usize,
    height: usize,
    palette: Palette,
    /// Alpha bytes from the source image, if it had any.
    alpha: Option<Vec<u8>>,
}

impl RecoloredImage {
    /// Create a recolored image from palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices` (and `alpha`, when present) hold
    /// `width * height` entries.
    pub fn new(
        indices: Vec<u32>,
        width: usize,
        height: usize,
        palette: Palette,
        alpha: Option<Vec<u8>>,
    ) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{})",
            indices.len(),
            width,
            height,
        );
        debug_assert!(alpha.as_ref().map_or(true, |a| a.len() == indices.len()));
        Self {
            indices,
            width,
            height,
            palette,
            alpha,
        }
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
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
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Alpha plane, byte-for-byte as it was in the input.
    #[inline]
    pub fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    /// Packed `[R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb(&self) -> Vec<u8> {
        let lut = self.byte_lut();
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&lut[idx as usize]);
        }
        rgb
    }

    /// Packed `[R, G, B, A, ...]` bytes, `width * height * 4` long.
    ///
    /// Pixels are fully opaque (255) when the input had no alpha plane.
    pub fn to_rgba(&self) -> Vec<u8> {
        let lut = self.byte_lut();
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);
        for (i, &idx) in self.indices.iter().enumerate() {
            rgba.extend_from_slice(&lut[idx as usize]);
            rgba.push(self.alpha.as_ref().map_or(255, |a| a[i]));
        }
        rgba
    }

    fn byte_lut(&self) -> Vec<[u8; 3]> {
        self.palette.colors().iter().map(|c| c.to_bytes()).collect()
    }
}
