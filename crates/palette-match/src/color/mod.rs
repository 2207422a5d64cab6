//! Color types and conversion utilities
//!
//! Each stage of the sRGB → CIELAB conversion is its own type, so a value
//! can only be fed into the formula that expects it.
//!
//! # Example
//!
//! ```
//! use palette_match::{Lab, Srgb};
//!
//! let lab = Lab::from(Srgb::from_u8(255, 255, 255));
//! assert!((lab.l - 100.0).abs() < 0.01);
//! ```

mod lab;
mod linear_rgb;
mod srgb;
mod xyz;

pub use lab::{srgb_to_lab, Lab};
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
pub use xyz::{Xyz, D65_WHITE};
