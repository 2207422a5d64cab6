pub mod config;

pub use config::{ConfigOverrides, RecolorConfig, CONFIG_ENV_VAR};
