//! Public API for the palette-match crate.
//!
//! This module provides the high-level API: the [`Recolorer`] builder and
//! the [`RecolorError`] unified error type.

mod builder;
mod error;

pub use builder::Recolorer;
pub use error::RecolorError;
