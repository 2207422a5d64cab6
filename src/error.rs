use std::path::PathBuf;

use palette_match::RecolorError;
use thiserror::Error;

/// Failure to turn a palette file into a usable palette. Always fatal.
#[derive(Debug, Error)]
pub enum PaletteLoadError {
    #[error("Failed to read palette {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid colors found in {}", .0.display())]
    NoColors(PathBuf),
}

/// Failure to load the YAML configuration file. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Per-image failure. Logged and counted; a batch keeps going.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Processing error: {0}")]
    Processing(#[from] RecolorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_load_error_no_colors() {
        let error = PaletteLoadError::NoColors(PathBuf::from("empty.txt"));
        assert_eq!(error.to_string(), "No valid colors found in empty.txt");
    }

    #[test]
    fn test_palette_load_error_io() {
        let error = PaletteLoadError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read palette missing.txt: not found"
        );
    }

    #[test]
    fn test_image_error_decode() {
        let error = ImageError::Decode("bad magic".to_string());
        assert_eq!(error.to_string(), "Decode error: bad magic");
    }

    #[test]
    fn test_image_error_encode() {
        let error = ImageError::Encode("unsupported format".to_string());
        assert_eq!(error.to_string(), "Encode error: unsupported format");
    }

    #[test]
    fn test_image_error_from_recolor_error() {
        let error: ImageError = RecolorError::AlphaMismatch {
            expected: 4,
            actual: 3,
        }
        .into();
        match error {
            ImageError::Processing(_) => {}
            _ => panic!("Expected Processing variant"),
        }
    }

    #[test]
    fn test_image_error_from_io() {
        let error: ImageError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(error.to_string(), "IO error: denied");
    }
}
