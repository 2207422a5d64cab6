//! Nearest palette color search over a unique-color table.
//!
//! [`PaletteMatcher`] computes a U×K distance table between the distinct
//! colors of an image and the palette, then reduces each row with a stable
//! argmin. For CIEDE2000 the U unique colors are converted to Lab once;
//! palette Lab values come precomputed from [`Palette`].

use crate::color::{Lab, Srgb};
use crate::distance::{ciede2000, weighted_euclidean, weighted_manhattan, DistanceMetric};
use crate::index::UniqueColorTable;
use crate::palette::Palette;

/// Index of the first minimum in `distances`.
///
/// Ties keep the lowest index. NaN never compares less than anything, so
/// a NaN entry cannot win unless every entry is NaN (then 0 is returned).
///
/// # Example
///
/// ```
/// use palette_match::argmin;
///
/// assert_eq!(argmin(&[3.0, 1.0, 1.0, 2.0]), 1);
/// ```
#[inline]
pub fn argmin(distances: &[f64]) -> usize {
    let mut best_idx = 0;
    let mut best = f64::INFINITY;
    for (i, &d) in distances.iter().enumerate() {
        if d < best {
            best = d;
            best_idx = i;
        }
    }
    best_idx
}

/// Row-major U×K table of distances (unique color × palette entry).
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DistanceTable {
    /// Number of rows (unique colors).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (palette entries).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distances from unique color `row` to every palette entry.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// Distance from unique color `row` to palette entry `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Stable argmin of every row.
    pub fn nearest(&self) -> NearestMapping {
        let indices = (0..self.rows).map(|r| argmin(self.row(r)) as u32).collect();
        NearestMapping { indices }
    }
}

/// Unique-color slot → nearest palette index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestMapping {
    indices: Vec<u32>,
}

impl NearestMapping {
    /// Palette index chosen for each slot.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Palette index for one slot.
    #[inline]
    pub fn get(&self, slot: usize) -> u32 {
        self.indices[slot]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Expand to one palette index per pixel using the table's inverse index.
    pub fn expand(&self, table: &UniqueColorTable) -> Vec<u32> {
        debug_assert_eq!(self.indices.len(), table.len());
        table
            .inverse()
            .iter()
            .map(|&slot| self.indices[slot as usize])
            .collect()
    }
}

/// Finds the nearest palette entry for colors under a fixed metric.
///
/// # Example
///
/// ```
/// use palette_match::{DistanceMetric, Palette, PaletteMatcher, Srgb};
///
/// let palette = Palette::new(&[Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)]).unwrap();
/// let matcher = PaletteMatcher::new(&palette, DistanceMetric::Ciede2000);
///
/// let (idx, _) = matcher.nearest(Srgb::from_u8(40, 40, 40));
/// assert_eq!(idx, 0);
/// ```
pub struct PaletteMatcher<'a> {
    palette: &'a Palette,
    metric: DistanceMetric,
}

impl<'a> PaletteMatcher<'a> {
    pub fn new(palette: &'a Palette, metric: DistanceMetric) -> Self {
        Self { palette, metric }
    }

    #[inline]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        self.palette
    }

    /// Compute the U×K distance table for `colors`.
    pub fn distance_table(&self, colors: &[Srgb]) -> DistanceTable {
        let cols = self.palette.len();
        let mut values = Vec::with_capacity(colors.len() * cols);

        match self.metric {
            DistanceMetric::Euclidean { weights } => {
                for &c in colors {
                    values.extend(
                        self.palette
                            .colors()
                            .iter()
                            .map(|&p| weighted_euclidean(c, p, weights)),
                    );
                }
            }
            DistanceMetric::Manhattan { weights } => {
                for &c in colors {
                    values.extend(
                        self.palette
                            .colors()
                            .iter()
                            .map(|&p| weighted_manhattan(c, p, weights)),
                    );
                }
            }
            DistanceMetric::Ciede2000 => {
                // One conversion per unique color, none per palette entry
                for c in colors.iter().map(|&c| Lab::from(c)) {
                    values.extend(self.palette.lab_colors().iter().map(|&p| ciede2000(c, p)));
                }
            }
        }

        DistanceTable {
            values,
            rows: colors.len(),
            cols,
        }
    }

    /// Nearest palette index for each color in `colors`.
    pub fn match_colors(&self, colors: &[Srgb]) -> NearestMapping {
        self.distance_table(colors).nearest()
    }

    /// Nearest palette index for each distinct color of `table`.
    pub fn match_table(&self, table: &UniqueColorTable) -> NearestMapping {
        tracing::debug!(
            unique_colors = table.len(),
            palette_size = self.palette.len(),
            metric = %self.metric,
            "Matching unique colors"
        );
        self.match_colors(table.colors())
    }

    /// Nearest palette entry for a single color, as `(index, distance)`.
    pub fn nearest(&self, color: Srgb) -> (usize, f64) {
        let table = self.distance_table(&[color]);
        let idx = argmin(table.row(0));
        (idx, table.get(0, idx))
    }
}
