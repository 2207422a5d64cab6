//! CIE XYZ tristimulus values (D65)

use super::linear_rgb::LinearRgb;

/// D65 reference white used to normalize XYZ before the Lab transform.
pub const D65_WHITE: Xyz = Xyz {
    x: 0.950_47,
    y: 1.0,
    z: 1.088_83,
};

/// A color in CIE XYZ, relative to a D65 white with Y = 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Divide each component by the matching component of `white`.
    #[inline]
    pub fn relative_to(self, white: Xyz) -> Self {
        Self {
            x: self.x / white.x,
            y: self.y / white.y,
            z: self.z / white.z,
        }
    }
}

impl From<LinearRgb> for Xyz {
    /// Linear sRGB to XYZ using the sRGB D65 primaries matrix.
    fn from(c: LinearRgb) -> Self {
        Self {
            x: c.r * 0.412_456_4 + c.g * 0.357_576_1 + c.b * 0.180_437_5,
            y: c.r * 0.212_672_9 + c.g * 0.715_152_2 + c.b * 0.072_175_0,
            z: c.r * 0.019_333_9 + c.g * 0.119_192_0 + c.b * 0.950_304_1,
        }
    }
}
