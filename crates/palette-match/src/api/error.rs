//! Unified error type for the palette-match public API.
//!
//! [`RecolorError`] covers per-image failures of the pipeline and wraps the
//! configuration errors of the crate for convenient `?` propagation.

use crate::distance::DistanceConfigError;
use crate::palette::{PaletteError, ParseColorError};

/// Errors produced while configuring or running the recoloring pipeline.
///
/// # Example
///
/// ```
/// use palette_match::{Palette, RecolorError};
///
/// fn create_palette() -> Result<Palette, RecolorError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RecolorError {
    /// Pixel buffer length does not match the declared dimensions
    #[error("image has {actual} pixels but {width}x{height} requires {expected}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Alpha plane length does not match the pixel count
    #[error("alpha plane has {actual} bytes but the image has {expected} pixels")]
    AlphaMismatch { expected: usize, actual: usize },

    /// A quantizer returned a different number of pixels than it was given
    #[error("quantizer returned {actual} pixels for {expected} inputs")]
    QuantizerOutput { expected: usize, actual: usize },

    /// Palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Color parsing error
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    /// Unknown metric or invalid weights
    #[error("distance configuration error: {0}")]
    Distance(#[from] DistanceConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RecolorError::DimensionMismatch {
            width: 2,
            height: 2,
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "image has 3 pixels but 2x2 requires 4");

        let err: RecolorError = PaletteError::EmptyPalette.into();
        assert_eq!(err.to_string(), "palette error: palette cannot be empty");
    }
}
