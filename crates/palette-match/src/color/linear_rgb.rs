//! Linear RGB color type
//!
//! Linear RGB is the first stage of the Lab conversion: the sRGB transfer
//! curve is undone so that the XYZ matrix can be applied.

use super::srgb::Srgb;

/// sRGB components at or below this normalized value use the linear segment.
const SRGB_LINEAR_THRESHOLD: f64 = 0.040_45;

/// A color in linear RGB color space (0.0..=1.0 for in-gamut colors).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Inverse sRGB transfer function for one normalized (0.0..=1.0) channel.
#[inline]
pub(crate) fn srgb_to_linear(v: f64) -> f64 {
    if v > SRGB_LINEAR_THRESHOLD {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

impl From<Srgb> for LinearRgb {
    /// Decode sRGB (0..=255) into linear light.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r() / 255.0),
            g: srgb_to_linear(srgb.g() / 255.0),
            b: srgb_to_linear(srgb.b() / 255.0),
        }
    }
}
