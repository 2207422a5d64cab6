use crate::error::ConfigError;
use palette_match::{DistanceConfigError, DistanceMetric, Palette, Recolorer, Weights};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a default config file.
pub const CONFIG_ENV_VAR: &str = "RECOLOR_CONFIG";

/// Recoloring configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecolorConfig {
    /// Quantize to N colors before palette mapping (0 disables)
    #[serde(default = "default_colors")]
    pub colors: usize,

    /// Distance metric name: euclidean, manhattan, weighted, ciede2000
    #[serde(default = "default_distance")]
    pub distance: String,

    /// Per-channel RGB weights for the RGB metrics
    #[serde(default)]
    pub weights: Option<[f64; 3]>,

    #[serde(default)]
    pub skip_quantize: bool,

    /// Descend into subdirectories in batch mode
    #[serde(default)]
    pub recursive: bool,

    /// Worker count for batch mode (defaults to available parallelism)
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Re-compress PNG output with oxipng
    #[serde(default)]
    pub optimize: bool,

    /// File extensions picked up in batch mode (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_colors() -> usize {
    Recolorer::DEFAULT_QUANTIZE_COLORS
}

fn default_distance() -> String {
    "euclidean".to_string()
}

fn default_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "bmp", "gif", "webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            distance: default_distance(),
            weights: None,
            skip_quantize: false,
            recursive: false,
            jobs: None,
            optimize: false,
            extensions: default_extensions(),
        }
    }
}

/// Command-line values layered on top of the file configuration.
///
/// `None` and `false` leave the file value alone.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub colors: Option<usize>,
    pub distance: Option<String>,
    pub perceptual: bool,
    pub weights: Option<[f64; 3]>,
    pub skip_quantize: bool,
    pub recursive: bool,
    pub jobs: Option<usize>,
    pub optimize: bool,
}

impl RecolorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            colors = config.colors,
            distance = %config.distance,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load the file named by `RECOLOR_CONFIG`, or defaults when unset
    pub fn load_default() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(&PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(colors) = overrides.colors {
            self.colors = colors;
        }
        if let Some(distance) = &overrides.distance {
            self.distance = distance.clone();
        }
        // --perceptual is a shortcut for `-d ciede2000`
        if overrides.perceptual {
            self.distance = "ciede2000".to_string();
        }
        if let Some(weights) = overrides.weights {
            self.weights = Some(weights);
        }
        self.skip_quantize |= overrides.skip_quantize;
        self.recursive |= overrides.recursive;
        if let Some(jobs) = overrides.jobs {
            self.jobs = Some(jobs);
        }
        self.optimize |= overrides.optimize;
    }

    /// Resolve the configured distance metric
    pub fn distance_metric(&self) -> Result<DistanceMetric, DistanceConfigError> {
        let weights = self.weights.map(Weights::try_from).transpose()?;
        DistanceMetric::from_name(&self.distance, weights)
    }

    /// Reduction target, `None` when quantization is off
    pub fn quantize_colors(&self) -> Option<usize> {
        if self.skip_quantize || self.colors == 0 {
            None
        } else {
            Some(self.colors)
        }
    }

    /// Number of batch workers, at least 1
    pub fn job_count(&self) -> usize {
        self.jobs
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(usize::from)
                    .unwrap_or(1)
            })
            .max(1)
    }

    /// Build a recolorer for `palette` from this configuration
    pub fn build_recolorer(&self, palette: Palette) -> Result<Recolorer, DistanceConfigError> {
        let metric = self.distance_metric()?;
        tracing::info!(
            distance = %metric,
            quantize = ?self.quantize_colors(),
            "Recolor settings"
        );
        Ok(Recolorer::new(palette)
            .distance(metric)
            .quantize_colors(self.quantize_colors()))
    }
}
