//! Recolorer builder -- the primary entry point for the crate.
//!
//! [`Recolorer`] wraps the two-stage pipeline (optional color reduction,
//! then nearest-palette matching) behind a fluent configuration API.

use std::sync::Arc;

use crate::api::RecolorError;
use crate::distance::DistanceMetric;
use crate::image::Image;
use crate::index::UniqueColorTable;
use crate::matcher::PaletteMatcher;
use crate::output::RecoloredImage;
use crate::palette::Palette;
use crate::quantize::{MedianCut, Quantizer};

/// Remaps images onto a fixed palette.
///
/// # Design
///
/// - Constructor requires a [`Palette`], which cannot be empty
/// - Configuration methods consume and return `self`
/// - [`recolor()`](Self::recolor) takes `&self`, so one `Recolorer` can be
///   shared across threads and reused for a whole batch
///
/// # Example
///
/// ```
/// use palette_match::{DistanceMetric, Image, Palette, Recolorer, Srgb};
///
/// let palette = Palette::new(&[Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)]).unwrap();
/// let recolorer = Recolorer::new(palette)
///     .distance(DistanceMetric::Ciede2000)
///     .quantize_colors(None);
///
/// let image = Image::from_rgb8(2, 1, &[30, 30, 30, 220, 220, 220]);
/// let result = recolorer.recolor(&image).unwrap();
///
/// assert_eq!(result.indices(), &[0, 1]);
/// ```
#[derive(Clone)]
pub struct Recolorer {
    palette: Palette,
    metric: DistanceMetric,
    quantize_colors: Option<usize>,
    skip_quantize: bool,
    quantizer: Arc<dyn Quantizer>,
}

impl Recolorer {
    /// Default number of colors for the reduction stage.
    pub const DEFAULT_QUANTIZE_COLORS: usize = 128;

    /// Create a recolorer with the given palette.
    ///
    /// Defaults: Euclidean distance, median-cut reduction to
    /// [`DEFAULT_QUANTIZE_COLORS`](Self::DEFAULT_QUANTIZE_COLORS) colors.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            metric: DistanceMetric::default(),
            quantize_colors: Some(Self::DEFAULT_QUANTIZE_COLORS),
            skip_quantize: false,
            quantizer: Arc::new(MedianCut),
        }
    }

    /// Set the distance metric.
    #[inline]
    pub fn distance(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the reduction target. `None` or `Some(0)` disables the stage.
    #[inline]
    pub fn quantize_colors(mut self, colors: Option<usize>) -> Self {
        self.quantize_colors = colors.filter(|&n| n > 0);
        self
    }

    /// Skip the reduction stage regardless of the configured color count.
    #[inline]
    pub fn skip_quantize(mut self, skip: bool) -> Self {
        self.skip_quantize = skip;
        self
    }

    /// Replace the built-in median-cut reducer.
    #[inline]
    pub fn quantizer(mut self, quantizer: impl Quantizer + 'static) -> Self {
        self.quantizer = Arc::new(quantizer);
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Effective reduction target, `None` when the stage is off.
    #[inline]
    pub fn effective_quantize_colors(&self) -> Option<usize> {
        if self.skip_quantize {
            None
        } else {
            self.quantize_colors
        }
    }

    /// Recolor one image.
    ///
    /// 1. Validate the pixel and alpha buffer sizes
    /// 2. Reduce to N colors, unless disabled
    /// 3. Deduplicate colors and match each distinct color to the palette
    /// 4. Expand back to per-pixel indices; reattach alpha unchanged
    ///
    /// # Errors
    ///
    /// [`RecolorError::DimensionMismatch`] / [`RecolorError::AlphaMismatch`]
    /// for inconsistent buffers, [`RecolorError::QuantizerOutput`] if a
    /// custom quantizer breaks its contract.
    pub fn recolor(&self, image: &Image) -> Result<RecoloredImage, RecolorError> {
        let (width, height) = (image.width(), image.height());
        let expected = width * height;
        if image.pixels().len() != expected {
            return Err(RecolorError::DimensionMismatch {
                width,
                height,
                expected,
                actual: image.pixels().len(),
            });
        }
        // Alpha is set aside before any color work and never touched again
        let alpha = image.alpha().map(<[u8]>::to_vec);
        if let Some(a) = &alpha {
            if a.len() != expected {
                return Err(RecolorError::AlphaMismatch {
                    expected,
                    actual: a.len(),
                });
            }
        }

        let quantized;
        let pixels = match self.effective_quantize_colors() {
            Some(n) => {
                quantized = self.quantizer.quantize(image.pixels(), n);
                if quantized.len() != expected {
                    return Err(RecolorError::QuantizerOutput {
                        expected,
                        actual: quantized.len(),
                    });
                }
                &quantized[..]
            }
            None => image.pixels(),
        };

        let table = UniqueColorTable::build(pixels);
        let matcher = PaletteMatcher::new(&self.palette, self.metric);
        let mapping = matcher.match_table(&table);
        let indices = mapping.expand(&table);

        tracing::debug!(
            width,
            height,
            unique_colors = table.len(),
            quantize = ?self.effective_quantize_colors(),
            "Recolored image"
        );

        Ok(RecoloredImage::new(
            indices,
            width,
            height,
            self.palette.clone(),
            alpha,
        ))
    }
}

impl std::fmt::Debug for Recolorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recolorer")
            .field("palette", &self.palette.len())
            .field("metric", &self.metric)
            .field("quantize_colors", &self.quantize_colors)
            .field("skip_quantize", &self.skip_quantize)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use pretty_assertions::assert_eq;

    fn bw_palette() -> Palette {
        Palette::new(&[Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)]).unwrap()
    }

    /// Maps every pixel to mid grey; used to see whether stage A ran.
    struct Flatten;

    impl Quantizer for Flatten {
        fn quantize(&self, pixels: &[Srgb], _max_colors: usize) -> Vec<Srgb> {
            vec![Srgb::from_u8(200, 200, 200); pixels.len()]
        }
    }

    struct Broken;

    impl Quantizer for Broken {
        fn quantize(&self, _pixels: &[Srgb], _max_colors: usize) -> Vec<Srgb> {
            Vec::new()
        }
    }

    #[test]
    fn test_new_defaults() {
        let recolorer = Recolorer::new(bw_palette());
        assert_eq!(recolorer.metric(), DistanceMetric::euclidean());
        assert_eq!(
            recolorer.effective_quantize_colors(),
            Some(Recolorer::DEFAULT_QUANTIZE_COLORS)
        );
    }

    #[test]
    fn test_builder_chaining() {
        let recolorer = Recolorer::new(bw_palette())
            .distance(DistanceMetric::Ciede2000)
            .quantize_colors(Some(16));
        assert_eq!(recolorer.metric(), DistanceMetric::Ciede2000);
        assert_eq!(recolorer.effective_quantize_colors(), Some(16));

        assert_eq!(recolorer.clone().skip_quantize(true).effective_quantize_colors(), None);
        assert_eq!(recolorer.quantize_colors(Some(0)).effective_quantize_colors(), None);
    }

    #[test]
    fn test_quantizer_runs_unless_skipped() {
        let image = Image::from_rgb8(1, 1, &[10, 10, 10]);

        let with_stage = Recolorer::new(bw_palette()).quantizer(Flatten);
        assert_eq!(with_stage.recolor(&image).unwrap().indices(), &[1]);

        let skipped = with_stage.clone().skip_quantize(true);
        assert_eq!(skipped.recolor(&image).unwrap().indices(), &[0]);

        let disabled = with_stage.quantize_colors(None);
        assert_eq!(disabled.recolor(&image).unwrap().indices(), &[0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let image = Image::new(2, 2, vec![Srgb::from_u8(0, 0, 0); 3], None);
        let err = Recolorer::new(bw_palette()).recolor(&image).unwrap_err();
        assert!(matches!(
            err,
            RecolorError::DimensionMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_alpha_mismatch() {
        let image = Image::new(1, 1, vec![Srgb::from_u8(0, 0, 0)], Some(vec![1, 2]));
        let err = Recolorer::new(bw_palette()).recolor(&image).unwrap_err();
        assert!(matches!(
            err,
            RecolorError::AlphaMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_broken_quantizer_reported() {
        let image = Image::from_rgb8(1, 1, &[0, 0, 0]);
        let err = Recolorer::new(bw_palette())
            .quantizer(Broken)
            .recolor(&image)
            .unwrap_err();
        assert!(matches!(err, RecolorError::QuantizerOutput { .. }));
    }

    #[test]
    fn test_empty_image() {
        let image = Image::new(0, 0, Vec::new(), Some(Vec::new()));
        let result = Recolorer::new(bw_palette()).recolor(&image).unwrap();
        assert!(result.indices().is_empty());
        assert_eq!(result.alpha(), Some(&[][..]));
    }

    #[test]
    fn test_reusable() {
        let recolorer = Recolorer::new(bw_palette()).quantize_colors(Some(2));
        let rgb: Vec<u8> = (0..48u8).map(|i| i * 5).collect();
        let image = Image::from_rgb8(4, 4, &rgb);
        assert_eq!(
            recolorer.recolor(&image).unwrap(),
            recolorer.recolor(&image).unwrap()
        );
    }
}
