//! CIELAB color space (D65 reference white)
//!
//! Lab is where the CIEDE2000 difference formula operates. Conversion from
//! sRGB goes through linear RGB and XYZ; every step is a pure function of
//! the input color, so converting the same color twice always yields
//! bit-identical results.

use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;
use super::xyz::{Xyz, D65_WHITE};

/// CIE ε: below this relative luminance the cube root is replaced by a line.
const EPSILON: f64 = 0.008_856;

/// CIE κ, the slope of the linear segment.
const KAPPA: f64 = 903.3;

/// A color in CIELAB space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis, unbounded (typically within ±128)
/// - `b`: Blue-yellow axis, unbounded (typically within ±128)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Test-only constructor; callers obtain Lab values by conversion.
    #[cfg(test)]
    pub(crate) fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis: `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let rel = xyz.relative_to(D65_WHITE);
        let fx = lab_f(rel.x);
        let fy = lab_f(rel.y);
        let fz = lab_f(rel.z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<LinearRgb> for Lab {
    #[inline]
    fn from(linear: LinearRgb) -> Self {
        Lab::from(Xyz::from(linear))
    }
}

impl From<Srgb> for Lab {
    #[inline]
    fn from(srgb: Srgb) -> Self {
        Lab::from(LinearRgb::from(srgb))
    }
}

/// Convert a batch of sRGB colors to Lab, preserving order.
pub fn srgb_to_lab(colors: &[Srgb]) -> Vec<Lab> {
    colors.iter().map(|&c| Lab::from(c)).collect()
}
