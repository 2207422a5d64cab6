//! Color reduction without dithering.
//!
//! Reducing an image to N representative colors before palette matching
//! merges near-duplicate shades (anti-aliasing, compression noise) so they
//! land on the same palette entry. Every pixel is replaced by exactly one
//! representative; no error is diffused to neighbors.
//!
//! [`Quantizer`] is the seam for plugging in other reducers. [`MedianCut`]
//! is the built-in, deterministic implementation.

mod median_cut;

pub use median_cut::MedianCut;

use crate::color::Srgb;

/// Reduces a pixel buffer to at most `max_colors` distinct colors.
///
/// Implementations must be deterministic, must return one color per input
/// pixel, and must not dither.
pub trait Quantizer: Send + Sync {
    fn quantize(&self, pixels: &[Srgb], max_colors: usize) -> Vec<Srgb>;
}
