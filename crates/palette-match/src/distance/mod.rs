//! Color distance metrics for palette matching.
//!
//! [`DistanceMetric`] is a closed set of metrics, each variant carrying its
//! own parameters. The RGB metrics work directly on 0..=255 channel values;
//! [`DistanceMetric::Ciede2000`] converts both colors to [`Lab`] first.

mod ciede2000;

use std::fmt;

pub use ciede2000::ciede2000;

use crate::color::{Lab, Srgb};

/// Error for an unusable distance configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceConfigError {
    /// The metric name is not one of the supported names
    #[error("unknown distance metric '{0}' (expected euclidean, manhattan, weighted or ciede2000)")]
    UnknownMetric(String),

    /// Weights are negative, non-finite, or all zero
    #[error("invalid weights ({r}, {g}, {b}): each must be finite and >= 0, and at least one > 0")]
    InvalidWeights { r: f64, g: f64, b: f64 },
}

/// Per-channel weights for the RGB metrics.
///
/// Zero is allowed for individual channels (the channel is ignored), but
/// at least one channel must carry weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    r: f64,
    g: f64,
    b: f64,
}

impl Weights {
    /// Equal weighting of all three channels.
    pub const UNIFORM: Weights = Weights {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Luma-style weighting (0.3, 0.59, 0.11).
    pub const LUMA: Weights = Weights {
        r: 0.3,
        g: 0.59,
        b: 0.11,
    };

    /// Validate and build a weight triple.
    ///
    /// # Example
    ///
    /// ```
    /// use palette_match::Weights;
    ///
    /// assert!(Weights::new(1.0, 0.0, 0.0).is_ok());
    /// assert!(Weights::new(0.0, 0.0, 0.0).is_err());
    /// assert!(Weights::new(1.0, -1.0, 1.0).is_err());
    /// ```
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self, DistanceConfigError> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !(valid(r) && valid(g) && valid(b)) || (r == 0.0 && g == 0.0 && b == 0.0) {
            return Err(DistanceConfigError::InvalidWeights { r, g, b });
        }
        Ok(Self { r, g, b })
    }

    /// Weights as an array, in R, G, B order.
    #[inline]
    pub fn as_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::UNIFORM
    }
}

impl TryFrom<[f64; 3]> for Weights {
    type Error = DistanceConfigError;

    fn try_from(w: [f64; 3]) -> Result<Self, Self::Error> {
        Weights::new(w[0], w[1], w[2])
    }
}

/// Distance metric used to pick the nearest palette color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMetric {
    /// `sqrt(Σ wᵢ·(c1ᵢ − c2ᵢ)²)` over R, G, B. With non-uniform weights this
    /// is the "weighted" metric.
    Euclidean { weights: Weights },

    /// `Σ wᵢ·|c1ᵢ − c2ᵢ|` over R, G, B.
    Manhattan { weights: Weights },

    /// CIE 2000 perceptual difference, computed in Lab.
    Ciede2000,
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::euclidean()
    }
}

impl DistanceMetric {
    /// Unweighted Euclidean RGB distance.
    pub fn euclidean() -> Self {
        Self::Euclidean {
            weights: Weights::UNIFORM,
        }
    }

    /// Unweighted Manhattan RGB distance.
    pub fn manhattan() -> Self {
        Self::Manhattan {
            weights: Weights::UNIFORM,
        }
    }

    /// Euclidean RGB distance with caller-supplied weights.
    pub fn weighted(weights: Weights) -> Self {
        Self::Euclidean { weights }
    }

    /// Resolve a metric from its configuration name.
    ///
    /// `weights` applies to the RGB metrics and is ignored by CIEDE2000.
    /// `weighted` without explicit weights uses [`Weights::LUMA`].
    ///
    /// # Example
    ///
    /// ```
    /// use palette_match::{DistanceMetric, Weights};
    ///
    /// let m = DistanceMetric::from_name("weighted", None).unwrap();
    /// assert_eq!(m, DistanceMetric::weighted(Weights::LUMA));
    /// assert_eq!(DistanceMetric::from_name("perceptual", None).unwrap(), DistanceMetric::Ciede2000);
    /// assert!(DistanceMetric::from_name("cosine", None).is_err());
    /// ```
    pub fn from_name(name: &str, weights: Option<Weights>) -> Result<Self, DistanceConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean {
                weights: weights.unwrap_or_default(),
            }),
            "manhattan" => Ok(Self::Manhattan {
                weights: weights.unwrap_or_default(),
            }),
            "weighted" => Ok(Self::Euclidean {
                weights: weights.unwrap_or(Weights::LUMA),
            }),
            "ciede2000" | "perceptual" => Ok(Self::Ciede2000),
            _ => Err(DistanceConfigError::UnknownMetric(name.to_string())),
        }
    }

    /// True if this metric compares colors in Lab rather than RGB.
    #[inline]
    pub fn is_perceptual(&self) -> bool {
        matches!(self, Self::Ciede2000)
    }

    /// Distance between two sRGB colors under this metric.
    pub fn distance(&self, a: Srgb, b: Srgb) -> f64 {
        match *self {
            Self::Euclidean { weights } => weighted_euclidean(a, b, weights),
            Self::Manhattan { weights } => weighted_manhattan(a, b, weights),
            Self::Ciede2000 => ciede2000(Lab::from(a), Lab::from(b)),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean { weights } if *weights == Weights::UNIFORM => write!(f, "euclidean"),
            Self::Euclidean { weights } => {
                let [r, g, b] = weights.as_array();
                write!(f, "weighted (R={r}, G={g}, B={b})")
            }
            Self::Manhattan { weights } if *weights == Weights::UNIFORM => write!(f, "manhattan"),
            Self::Manhattan { weights } => {
                let [r, g, b] = weights.as_array();
                write!(f, "manhattan (R={r}, G={g}, B={b})")
            }
            Self::Ciede2000 => write!(f, "ciede2000"),
        }
    }
}

/// `sqrt(Σ wᵢ·(aᵢ − bᵢ)²)`
#[inline]
pub fn weighted_euclidean(a: Srgb, b: Srgb, weights: Weights) -> f64 {
    let dr = a.r() - b.r();
    let dg = a.g() - b.g();
    let db = a.b() - b.b();
    (weights.r * dr * dr + weights.g * dg * dg + weights.b * db * db).sqrt()
}

/// `Σ wᵢ·|aᵢ − bᵢ|`
#[inline]
pub fn weighted_manhattan(a: Srgb, b: Srgb, weights: Weights) -> f64 {
    weights.r * (a.r() - b.r()).abs() + weights.g * (a.g() - b.g()).abs() + weights.b * (a.b() - b.b()).abs()
}
