#![allow(clippy::excessive_precision, clippy::module_inception)]

//! palette-match: recolor images onto a fixed palette
//!
//! This library maps every pixel of an image to the nearest color of a
//! user-supplied palette, without dithering. Near-duplicate shades can be
//! merged first by a median-cut reduction, and the alpha channel passes
//! through untouched.
//!
//! # Quick Start
//!
//! The [`Recolorer`] builder is the primary entry point:
//!
//! ```
//! use palette_match::{Image, Palette, Recolorer};
//!
//! let palette = Palette::from_hex(&["#000000", "#FF0000", "#FFFFFF"]).unwrap();
//! let recolorer = Recolorer::new(palette);
//!
//! let image = Image::from_rgba8(2, 1, &[250, 10, 10, 128, 240, 240, 240, 0]);
//! let result = recolorer.recolor(&image).unwrap();
//!
//! assert_eq!(result.indices(), &[1, 2]);
//! assert_eq!(result.alpha(), Some(&[128u8, 0][..]));
//! ```
//!
//! # Lower-level API
//!
//! The pipeline stages are public and can be driven individually:
//!
//! ```
//! use palette_match::{DistanceMetric, Palette, PaletteMatcher, Srgb, UniqueColorTable};
//!
//! let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
//! let pixels = [Srgb::from_u8(20, 20, 20), Srgb::from_u8(200, 200, 200), Srgb::from_u8(20, 20, 20)];
//!
//! let table = UniqueColorTable::build(&pixels);
//! let matcher = PaletteMatcher::new(&palette, DistanceMetric::Ciede2000);
//! let mapping = matcher.match_table(&table);
//!
//! assert_eq!(mapping.expand(&table), vec![0, 1, 0]);
//! ```
//!
//! # Color Science
//!
//! ## Color Spaces
//!
//! | Color Space | Used For |
//! |-------------|----------|
//! | **sRGB** | Input/output, RGB distances |
//! | **Linear RGB** | Intermediate step of the Lab conversion |
//! | **CIE XYZ** (D65) | Intermediate step of the Lab conversion |
//! | **CIELAB** | CIEDE2000 perceptual distance |
//!
//! The conversion chain is sRGB → linear RGB (IEC 61966-2-1 transfer
//! curve) → XYZ (D65 matrix) → Lab (CIE 1976, reference white
//! `Xn = 0.95047, Yn = 1.0, Zn = 1.08883`). Each stage is its own type.
//!
//! ## Distance Metrics
//!
//! [`DistanceMetric`] selects one of:
//!
//! - Euclidean in sRGB, optionally per-channel weighted
//!   (the "weighted" preset uses luma weights `0.3, 0.59, 0.11`)
//! - Manhattan in sRGB, optionally weighted
//! - CIEDE2000 (Sharma, Wu and Dalal 2005) in CIELAB
//!
//! RGB metrics are cheap and predictable. CIEDE2000 tracks perceived
//! difference much better, e.g. dark navy lands on a blue palette entry
//! instead of black.
//!
//! ## Ties
//!
//! The nearest palette entry is the *first* minimum in palette order.
//! Duplicate palette colors are allowed; the earlier index always wins.
//!
//! ## Pipeline Overview
//!
//! ```text
//! RGB(A) input
//!     |
//!     +---> alpha plane (set aside, copied verbatim)
//!     v
//! [Median cut to N colors]   (optional, no dithering)
//!     |
//!     v
//! UniqueColorTable           (U distinct colors + inverse index)
//!     |
//!     v
//! PaletteMatcher             (U x K distances, stable argmin)
//!     |
//!     v
//! expand to W x H indices  +  alpha  ->  RecoloredImage
//! ```

pub mod api;
pub mod color;
pub mod distance;
pub mod image;
pub mod index;
pub mod matcher;
pub mod output;
pub mod palette;
pub mod quantize;


pub use api::{RecolorError, Recolorer};
pub use color::{srgb_to_lab, Lab, LinearRgb, Srgb, Xyz, D65_WHITE};
pub use distance::{ciede2000, DistanceConfigError, DistanceMetric, Weights};
pub use image::Image;
pub use index::UniqueColorTable;
pub use matcher::{argmin, DistanceTable, NearestMapping, PaletteMatcher};
pub use output::RecoloredImage;
pub use palette::{Palette, PaletteError, ParseColorError};
pub use quantize::{MedianCut, Quantizer};
