//! Palette text files (Paint.NET / Lospec `.txt` format).
//!
//! One color per line as `AARRGGBB`, `RRGGBB` or shorthand `RGB`, with an
//! optional `#` and/or `0x` prefix. Lines starting with `;` or `//` are
//! comments. Unparsable lines are skipped. File order is palette order.

use crate::error::PaletteLoadError;
use palette_match::{Palette, Srgb};
use std::fmt::Write as _;
use std::path::Path;

/// Sample palette written by `create-sample` (PICO-8, 16 colors).
pub const SAMPLE_PALETTE: &str = "\
;paint.net Palette File
;Sample 16-color palette (PICO-8)
;Format: AARRGGBB
FF000000
FF1D2B53
FF7E2553
FF008751
FFAB5236
FF5F574F
FFC2C3C7
FFFFFFFF
FFFF004D
FFFFA300
FFFFEC27
FF00E436
FF29ADFF
FF83769C
FFFF77A8
FFFFCCAA
";

/// Parse palette text into colors, in file order.
pub fn parse_palette(text: &str) -> Vec<Srgb> {
    text.lines()
        .enumerate()
        .filter_map(|(number, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with("//") {
                return None;
            }
            match line.parse::<Srgb>() {
                Ok(color) => Some(color),
                Err(e) => {
                    tracing::debug!(line = number + 1, %e, "Skipping palette line");
                    None
                }
            }
        })
        .collect()
}

/// Load a palette file.
pub fn load_palette(path: &Path) -> Result<Palette, PaletteLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| PaletteLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let colors = parse_palette(&text);
    let palette =
        Palette::new(&colors).map_err(|_| PaletteLoadError::NoColors(path.to_path_buf()))?;
    tracing::info!(
        path = %path.display(),
        colors = palette.len(),
        "Loaded palette"
    );
    Ok(palette)
}

/// Write [`SAMPLE_PALETTE`] to `path`.
pub fn write_sample_palette(path: &Path) -> std::io::Result<()> {
    std::fs::write(path, SAMPLE_PALETTE)
}

/// Human-readable listing, one `  NNN. #RRGGBB` line per color (1-based).
pub fn format_palette(palette: &Palette) -> String {
    let mut out = String::new();
    for (i, color) in palette.colors().iter().enumerate() {
        let _ = writeln!(out, "  {:3}. {}", i + 1, color.to_hex());
    }
    out
}
