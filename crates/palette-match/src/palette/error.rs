//! Error types for palette operations

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseColorError {
    /// Digit count after prefix stripping is not 3, 6 or 8
    #[error("invalid hex color length {0} (expected 3, 6 or 8 digits)")]
    InvalidLength(usize),

    /// Non-hexadecimal character in the color
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// A hex color string could not be parsed
    #[error("invalid color at index {index}: {source}")]
    ParseColor {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(PaletteError::EmptyPalette.to_string(), "palette cannot be empty");
        let err = PaletteError::ParseColor {
            index: 2,
            source: ParseColorError::InvalidLength(4),
        };
        assert_eq!(
            err.to_string(),
            "invalid color at index 2: invalid hex color length 4 (expected 3, 6 or 8 digits)"
        );
    }
}
