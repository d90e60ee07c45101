use crate::error::AppError;
use crate::models::CodecKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "BOXQUANT_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Codec used when neither `--codec` nor the output extension decides
    pub codec: CodecKind,

    /// Box edge length in pixels
    pub box_size: u32,

    /// Gradient scale for the gradient codecs, in (0, 1]
    pub gradient_scale: f32,

    /// Re-compress decompressed PNG output with oxipng
    pub optimize_png: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            codec: CodecKind::Qimg,
            box_size: 8,
            gradient_scale: 0.5,
            optimize_png: false,
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Config file path: the explicit one, else `$BOXQUANT_CONFIG`
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load configuration, falling back to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        codec = %config.codec,
                        box_size = config.box_size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
