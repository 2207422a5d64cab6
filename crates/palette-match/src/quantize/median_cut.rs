use super::Quantizer;
use crate::color::Srgb;
use crate::index::UniqueColorTable;

/// A box of distinct colors with their pixel counts.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<([u8; 3], usize)>,
}

impl ColorBox {
    fn total_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// (min, max) per channel.
    fn bounds(&self) -> [(u8, u8); 3] {
        let mut bounds = [(u8::MAX, u8::MIN); 3];
        for (color, _) in &self.entries {
            for (bound, &v) in bounds.iter_mut().zip(color) {
                bound.0 = bound.0.min(v);
                bound.1 = bound.1.max(v);
            }
        }
        bounds
    }

    /// Channel with the widest range and that range. Earlier channels win ties.
    fn widest_channel(&self) -> (usize, u8) {
        let bounds = self.bounds();
        let mut best = (0, 0u8);
        for (channel, (lo, hi)) in bounds.iter().enumerate() {
            let range = hi - lo;
            if range > best.1 {
                best = (channel, range);
            }
        }
        best
    }

    fn can_split(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Larger boxes with more spread split first.
    fn priority(&self) -> u64 {
        self.total_count() as u64 * self.widest_channel().1 as u64
    }

    /// Split along the widest channel at the count-weighted median.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.entries
            .sort_unstable_by_key(|&(color, _)| (color[channel], color));

        let half = self.total_count().div_ceil(2);
        let mut running = 0;
        let mut cut = self.entries.len() - 1;
        for (i, (_, n)) in self.entries.iter().enumerate() {
            running += n;
            if running >= half {
                cut = i + 1;
                break;
            }
        }
        // Both halves must keep at least one color
        let cut = cut.clamp(1, self.entries.len() - 1);

        let upper = self.entries.split_off(cut);
        (self, ColorBox { entries: upper })
    }

    /// Count-weighted mean color, rounded to 8 bits.
    fn representative(&self) -> [u8; 3] {
        let total = self.total_count().max(1) as f64;
        let mut sums = [0.0f64; 3];
        for (color, n) in &self.entries {
            for (sum, &v) in sums.iter_mut().zip(color) {
                *sum += v as f64 * *n as f64;
            }
        }
        sums.map(|s| (s / total).round() as u8)
    }
}

/// Deterministic median-cut color reduction in RGB.
///
/// Works on the distinct-color histogram: the box with the largest
/// (pixel count × widest channel range) is split at the weighted median of
/// its widest channel until `max_colors` boxes exist or nothing is left to
/// split. Each box is represented by its count-weighted mean.
///
/// # Example
///
/// ```
/// use palette_match::{MedianCut, Quantizer, Srgb, UniqueColorTable};
///
/// let pixels: Vec<Srgb> = (0..=255u8).map(|v| Srgb::from_u8(v, v, v)).collect();
/// let reduced = MedianCut.quantize(&pixels, 4);
///
/// assert_eq!(reduced.len(), pixels.len());
/// assert!(UniqueColorTable::build(&reduced).len() <= 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCut;

impl Quantizer for MedianCut {
    fn quantize(&self, pixels: &[Srgb], max_colors: usize) -> Vec<Srgb> {
        let table = UniqueColorTable::build(pixels);
        if max_colors == 0 || table.len() <= max_colors {
            return pixels.to_vec();
        }

        let entries = table
            .colors()
            .iter()
            .enumerate()
            .map(|(slot, c)| (c.to_bytes(), table.count(slot)))
            .collect();
        let mut boxes = vec![ColorBox { entries }];

        while boxes.len() < max_colors {
            // First box wins priority ties
            let mut pick: Option<(usize, u64)> = None;
            for (i, b) in boxes.iter().enumerate() {
                if !b.can_split() {
                    continue;
                }
                let p = b.priority();
                if pick.map_or(true, |(_, best)| p > best) {
                    pick = Some((i, p));
                }
            }
            let Some((i, _)) = pick else { break };

            let (lower, upper) = boxes.remove(i).split();
            boxes.insert(i, upper);
            boxes.insert(i, lower);
        }

        // slot -> representative
        let mut slot_color = vec![Srgb::from_u8(0, 0, 0); table.len()];
        let slot_of: std::collections::HashMap<[u8; 3], usize> = table
            .colors()
            .iter()
            .enumerate()
            .map(|(slot, c)| (c.to_bytes(), slot))
            .collect();
        for b in &boxes {
            let rep = Srgb::from_bytes(b.representative());
            for (color, _) in &b.entries {
                slot_color[slot_of[color]] = rep;
            }
        }

        tracing::debug!(
            unique_colors = table.len(),
            boxes = boxes.len(),
            "Median cut reduced colors"
        );

        table
            .inverse()
            .iter()
            .map(|&slot| slot_color[slot as usize])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gradient() -> Vec<Srgb> {
        (0..=255u8)
            .flat_map(|v| [Srgb::from_u8(v, 255 - v, v / 2), Srgb::from_u8(v, v, v)])
            .collect()
    }

    #[test]
    fn test_reduces_to_at_most_n_colors() {
        let pixels = gradient();
        for n in [1, 2, 3, 8, 64] {
            let reduced = MedianCut.quantize(&pixels, n);
            assert_eq!(reduced.len(), pixels.len());
            let unique = UniqueColorTable::build(&reduced).len();
            assert!(unique <= n, "{unique} colors for n={n}");
        }
    }

    #[test]
    fn test_identity_when_already_small() {
        let pixels = vec![
            Srgb::from_u8(1, 2, 3),
            Srgb::from_u8(200, 100, 0),
            Srgb::from_u8(1, 2, 3),
        ];
        assert_eq!(MedianCut.quantize(&pixels, 2), pixels);
        assert_eq!(MedianCut.quantize(&pixels, 0), pixels);
    }

    #[test]
    fn test_deterministic() {
        let pixels = gradient();
        assert_eq!(MedianCut.quantize(&pixels, 5), MedianCut.quantize(&pixels, 5));
    }

    #[test]
    fn test_single_color_is_weighted_mean() {
        let pixels = vec![
            Srgb::from_u8(0, 0, 0),
            Srgb::from_u8(0, 0, 0),
            Srgb::from_u8(0, 0, 0),
            Srgb::from_u8(100, 40, 200),
        ];
        let reduced = MedianCut.quantize(&pixels, 1);
        assert!(reduced.iter().all(|&c| c == Srgb::from_u8(25, 10, 50)));
    }

    #[test]
    fn test_separates_distant_clusters() {
        let mut pixels = vec![Srgb::from_u8(250, 0, 0); 5];
        pixels.extend(vec![Srgb::from_u8(252, 2, 0); 5]);
        pixels.extend(vec![Srgb::from_u8(0, 0, 250); 20]);
        let reduced = MedianCut.quantize(&pixels, 2);

        assert_eq!(reduced[0], Srgb::from_u8(251, 1, 0));
        assert_eq!(reduced[0], reduced[5]);
        assert_eq!(reduced[10], Srgb::from_u8(0, 0, 250));
    }
}
