//! Output types for the recoloring pipeline.
//!
//! [`RecoloredImage`] stores palette indices with dimension metadata, an
//! owned [`Palette`](crate::palette::Palette) and the source alpha plane,
//! offering indexed, RGB and RGBA output on demand.

mod recolored_image;

pub use recolored_image::RecoloredImage;
