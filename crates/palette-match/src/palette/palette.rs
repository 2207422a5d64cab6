//! Ordered target palette with precomputed Lab values.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::{Lab, Srgb};

/// A fixed, ordered set of allowed output colors.
///
/// Index order matters twice: it is the index reported by matching, and
/// it breaks ties (the lowest index wins when two entries are equally
/// close). Duplicate entries are therefore allowed; the later copy can
/// never be selected.
///
/// Lab values are computed once at construction, so CIEDE2000 matching
/// never converts a palette color more than once.
///
/// # Example
///
/// ```
/// use palette_match::{Palette, Srgb};
///
/// let palette = Palette::new(&[Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.color(1).to_bytes(), [255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
    lab: Vec<Lab>,
}

impl Palette {
    /// Create a palette from sRGB colors, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[Srgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        let colors = colors.to_vec();
        let lab = colors.iter().map(|&c| Lab::from(c)).collect();
        Ok(Self { colors, lab })
    }

    /// Create a palette from hex color strings (`#RRGGBB`, `AARRGGBB`, `#RGB`, ...).
    ///
    /// # Example
    ///
    /// ```
    /// use palette_match::Palette;
    ///
    /// let palette = Palette::from_hex(&["#FF0000", "00FF00", "0xFF0000FF"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Srgb::from_str(s).map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Number of colors in the palette (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The sRGB color at `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Srgb {
        self.colors[idx]
    }

    /// The precomputed Lab color at `idx`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.lab[idx]
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// All Lab colors in palette order.
    #[inline]
    pub fn lab_colors(&self) -> &[Lab] {
        &self.lab
    }
}
