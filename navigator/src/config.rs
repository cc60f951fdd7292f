use crate::error::{NavigatorError, Result};
use crate::layout::Breakpoints;
use crate::retry::RetryPolicy;
use crate::scroll::ActivationBand;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "relnotes.toml";

/// Top-level configuration for the release notes browser
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotesConfig {
    pub data: DataConfig,
    pub layout: LayoutConfig,
    pub scroll: ScrollConfig,
    pub retry: RetryConfig,
    pub url: UrlConfig,
}

/// Location of the release data file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("releases.json"),
        }
    }
}

/// Viewport width thresholds for the navigation layouts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mobile_max_width: u32,
    pub desktop_min_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_max_width: 768,
            desktop_min_width: 1024,
        }
    }
}

/// Scroll tracking: activation band as fractions of the viewport height
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub band_top: f64,
    pub band_bottom: f64,
    pub settle_delay_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            band_top: 0.33,
            band_bottom: 0.66,
            settle_delay_ms: 100,
        }
    }
}

/// Bounded polling used while dependent markup is still rendering
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_attempts: 10,
        }
    }
}

/// Base URL that filter query strings are attached to
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UrlConfig {
    pub base: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            base: "http://localhost/".to_string(),
        }
    }
}

impl NotesConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(NavigatorError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            log::debug!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ScrollConfig {
            band_top,
            band_bottom,
            ..
        } = self.scroll;
        if !(0.0..=1.0).contains(&band_top) || !(0.0..=1.0).contains(&band_bottom) {
            return Err(NavigatorError::invalid_config(
                "scroll band fractions must lie between 0 and 1",
            ));
        }
        if band_top >= band_bottom {
            return Err(NavigatorError::invalid_config(
                "scroll.band_top must be above scroll.band_bottom",
            ));
        }
        if self.layout.desktop_min_width <= self.layout.mobile_max_width {
            return Err(NavigatorError::invalid_config(
                "layout.desktop_min_width must exceed layout.mobile_max_width",
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(NavigatorError::invalid_config(
                "retry.max_attempts must be at least 1",
            ));
        }
        url::Url::parse(&self.url.base)?;
        Ok(())
    }

    #[must_use]
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            mobile_max: self.layout.mobile_max_width,
            desktop_min: self.layout.desktop_min_width,
        }
    }

    #[must_use]
    pub fn activation_band(&self) -> ActivationBand {
        ActivationBand::new(self.scroll.band_top, self.scroll.band_bottom)
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.retry.interval_ms),
            self.retry.max_attempts,
        )
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.scroll.settle_delay_ms)
    }
}
