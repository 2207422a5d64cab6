//! sRGB color type
//!
//! sRGB is the encoding of every image file and palette file the engine
//! sees. Components are kept on the 0..=255 scale so that RGB distance
//! metrics operate on the same numbers a palette file lists.

use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color in sRGB color space, components on the 0.0..=255.0 scale.
///
/// Fields are private and every constructor clamps its inputs into range,
/// so an `Srgb` value can never hold an out-of-gamut component. NaN clamps
/// to 0.
///
/// # Example
/// ```
/// use palette_match::Srgb;
///
/// let c = Srgb::new(300.0, -4.0, 127.5);
/// assert_eq!(c.r(), 255.0);
/// assert_eq!(c.g(), 0.0);
/// assert_eq!(c.b(), 127.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    r: f64,
    g: f64,
    b: f64,
}

#[inline]
fn clamp_channel(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 255.0)
    }
}

impl Srgb {
    /// Create a new Srgb color, clamping each channel to 0.0..=255.0.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use palette_match::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r(), 255.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B], rounding to the nearest integer.
    ///
    /// # Example
    /// ```
    /// use palette_match::Srgb;
    /// let color = Srgb::new(254.6, 0.4, 128.0);
    /// assert_eq!(color.to_bytes(), [255, 0, 128]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8,
        ]
    }

    /// Red channel (0.0..=255.0)
    #[inline]
    pub fn r(self) -> f64 {
        self.r
    }

    /// Green channel (0.0..=255.0)
    #[inline]
    pub fn g(self) -> f64 {
        self.g
    }

    /// Blue channel (0.0..=255.0)
    #[inline]
    pub fn b(self) -> f64 {
        self.b
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as an upper-case `#RRGGBB` hex string.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl From<[u8; 3]> for Srgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Accepted forms, after trimming whitespace and stripping an optional
    /// leading `#` and then an optional `0x`/`0X`:
    /// - `AARRGGBB` (alpha is discarded)
    /// - `RRGGBB`
    /// - `RGB` (each digit duplicated)
    ///
    /// # Examples
    ///
    /// ```
    /// use palette_match::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white.to_bytes(), [255, 255, 255]);
    ///
    /// let navy: Srgb = "0xFF1D2B53".parse().unwrap();
    /// assert_eq!(navy.to_bytes(), [0x1D, 0x2B, 0x53]);
    ///
    /// let red: Srgb = "F00".parse().unwrap();
    /// assert_eq!(red.to_bytes(), [255, 0, 0]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        // from_str_radix accepts a leading '+', which is not a hex digit
        if !s.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(s.to_string()));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| ParseColorError::InvalidHex(s.to_string()))
        };

        match s.len() {
            3 => {
                // 0xF * 17 == 0xFF
                let r = byte(0..1)? * 17;
                let g = byte(1..2)? * 17;
                let b = byte(2..3)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => Ok(Self::from_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::from_u8(byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }
}
