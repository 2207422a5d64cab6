//! palette-remap - batch sprite recoloring
//!
//! Quantizes images and maps them onto a custom palette.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
