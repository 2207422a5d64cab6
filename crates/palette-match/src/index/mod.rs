//! Unique-color deduplication.
//!
//! Sprite-style images use a handful of distinct colors across thousands of
//! pixels. [`UniqueColorTable`] collapses a pixel buffer to its distinct
//! colors plus an inverse index, so distance work is O(U·K) instead of
//! O(W·H·K) and reconstruction is a single O(W·H) lookup pass.

use std::collections::HashMap;

use crate::color::Srgb;

/// Distinct colors of a pixel buffer with an inverse pixel → slot index.
///
/// Colors are compared on their 8-bit value ([`Srgb::to_bytes`]), the
/// precision image files carry. Slots are numbered in order of first
/// occurrence, so building the table is deterministic.
///
/// # Example
///
/// ```
/// use palette_match::{Srgb, UniqueColorTable};
///
/// let red = Srgb::from_u8(255, 0, 0);
/// let blue = Srgb::from_u8(0, 0, 255);
/// let table = UniqueColorTable::build(&[red, blue, red, red]);
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.inverse(), &[0, 1, 0, 0]);
/// assert_eq!(table.count(0), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueColorTable {
    colors: Vec<Srgb>,
    counts: Vec<usize>,
    inverse: Vec<u32>,
}

impl UniqueColorTable {
    /// Scan `pixels` once and build the table.
    pub fn build(pixels: &[Srgb]) -> Self {
        let mut slots: HashMap<[u8; 3], u32> = HashMap::new();
        let mut colors = Vec::new();
        let mut counts = Vec::new();
        let mut inverse = Vec::with_capacity(pixels.len());

        for &pixel in pixels {
            let key = pixel.to_bytes();
            let slot = *slots.entry(key).or_insert_with(|| {
                colors.push(Srgb::from_bytes(key));
                counts.push(0);
                (colors.len() - 1) as u32
            });
            counts[slot as usize] += 1;
            inverse.push(slot);
        }

        Self {
            colors,
            counts,
            inverse,
        }
    }

    /// Number of distinct colors (U).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when built from an empty pixel buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of pixels the table was built from.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inverse.len()
    }

    /// Distinct colors, indexed by slot.
    #[inline]
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Pixel → slot index, in pixel order.
    #[inline]
    pub fn inverse(&self) -> &[u32] {
        &self.inverse
    }

    /// Number of pixels using the color in `slot`.
    #[inline]
    pub fn count(&self, slot: usize) -> usize {
        self.counts[slot]
    }

    /// Pixel positions (row-major indices) that share the color in `slot`.
    pub fn positions(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        let slot = slot as u32;
        self.inverse
            .iter()
            .enumerate()
            .filter(move |&(_, &s)| s == slot)
            .map(|(pos, _)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_buffer() {
        let table = UniqueColorTable::build(&[]);
        assert!(table.is_empty());
        assert_eq!(table.pixel_count(), 0);
    }

    #[test]
    fn test_first_occurrence_order() {
        let a = Srgb::from_u8(5, 5, 5);
        let b = Srgb::from_u8(200, 0, 0);
        let c = Srgb::from_u8(0, 0, 7);
        let table = UniqueColorTable::build(&[b, a, b, c, a]);

        assert_eq!(table.colors(), &[b, a, c]);
        assert_eq!(table.inverse(), &[0, 1, 0, 2, 1]);
        assert_eq!((table.count(0), table.count(1), table.count(2)), (2, 2, 1));
        assert_eq!(table.positions(1).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_reconstruction_through_inverse() {
        let pixels: Vec<Srgb> = (0..64u8).map(|i| Srgb::from_u8(i % 3, i % 5, 0)).collect();
        let table = UniqueColorTable::build(&pixels);

        assert_eq!(table.len(), 15);
        let rebuilt: Vec<Srgb> = table
            .inverse()
            .iter()
            .map(|&slot| table.colors()[slot as usize])
            .collect();
        assert_eq!(rebuilt, pixels);
    }

    #[test]
    fn test_fractional_colors_share_their_byte_slot() {
        let table = UniqueColorTable::build(&[Srgb::new(10.2, 0.0, 0.0), Srgb::new(9.8, 0.0, 0.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.colors()[0], Srgb::from_u8(10, 0, 0));
    }

    #[test]
    fn test_counts_sum_to_pixels() {
        let pixels: Vec<Srgb> = (0..100u8).map(|i| Srgb::from_u8(i / 10, 0, 0)).collect();
        let table = UniqueColorTable::build(&pixels);
        let total: usize = (0..table.len()).map(|s| table.count(s)).sum();
        assert_eq!(total, table.pixel_count());
    }
}
