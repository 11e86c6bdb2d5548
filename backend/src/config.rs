//! Configuration file support.
//!
//! Settings are read from a `timeline.toml` file and then overridden by
//! environment variables:
//!
//! - `TIMELINE_CONFIG`: explicit path of the configuration file
//! - `HOST`, `PORT`: server bind address
//! - `TIMELINE_CATALOG`: substance catalog JSON file
//! - `TIMELINE_UTC_OFFSET_MINUTES`: time zone of axis labels
//!
//! Every field has a default, so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TimelineError};
use crate::services::{AxisOptions, TimelineOptions};

const CONFIG_ENV: &str = "TIMELINE_CONFIG";

/// Root of `timeline.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Visual tuning of the computed timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    #[serde(default = "default_padding_minutes")]
    pub padding_minutes: f64,
    #[serde(default = "default_fallback_width_hours")]
    pub fallback_width_hours: f64,
    #[serde(default = "default_bezier_ratio")]
    pub bezier_ratio: f64,
    #[serde(default = "default_expected_width_px")]
    pub expected_width_px: f64,
    #[serde(default = "default_min_tick_spacing_px")]
    pub min_tick_spacing_px: f64,
    #[serde(default = "default_char_width_px")]
    pub char_width_px: f64,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Substance catalog loaded at startup; the server starts empty without one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_padding_minutes() -> f64 {
    10.0
}

fn default_fallback_width_hours() -> f64 {
    2.0
}

fn default_bezier_ratio() -> f64 {
    crate::services::geometry::DEFAULT_BEZIER_RATIO
}

fn default_expected_width_px() -> f64 {
    400.0
}

fn default_min_tick_spacing_px() -> f64 {
    40.0
}

fn default_char_width_px() -> f64 {
    8.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            padding_minutes: default_padding_minutes(),
            fallback_width_hours: default_fallback_width_hours(),
            bezier_ratio: default_bezier_ratio(),
            expected_width_px: default_expected_width_px(),
            min_tick_spacing_px: default_min_tick_spacing_px(),
            char_width_px: default_char_width_px(),
            utc_offset_minutes: 0,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
        }
    }
}

impl TimelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TimelineError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_toml_str(&content)?;

        // A relative catalog path is relative to the file that names it
        let resolved = match (&config.server.catalog_path, path.parent()) {
            (Some(catalog), Some(dir)) if catalog.is_relative() => Some(dir.join(catalog)),
            _ => None,
        };
        if resolved.is_some() {
            config.server.catalog_path = resolved;
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            TimelineError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// `TIMELINE_CONFIG` wins when set (and must point at a readable file).
    /// Otherwise `timeline.toml` is searched in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns the defaults when no file is found.
    pub fn from_default_location() -> Result<Self> {
        if let Ok(explicit) = env::var(CONFIG_ENV) {
            return Self::from_file(explicit);
        }

        let search_paths = [
            PathBuf::from("timeline.toml"),
            PathBuf::from("backend/timeline.toml"),
            PathBuf::from("../timeline.toml"),
        ];
        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::info!("No timeline.toml found, using default configuration");
        Ok(Self::default())
    }

    /// Load from the default location, apply environment overrides and validate.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_default_location()?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override file settings with `HOST`, `PORT`, `TIMELINE_CATALOG` and
    /// `TIMELINE_UTC_OFFSET_MINUTES` when they are set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                TimelineError::Configuration(format!("PORT must be a valid port number, got {port}"))
            })?;
        }
        if let Ok(catalog) = env::var("TIMELINE_CATALOG") {
            self.server.catalog_path = Some(PathBuf::from(catalog));
        }
        if let Ok(offset) = env::var("TIMELINE_UTC_OFFSET_MINUTES") {
            self.timeline.utc_offset_minutes = offset.trim().parse().map_err(|_| {
                TimelineError::Configuration(format!(
                    "TIMELINE_UTC_OFFSET_MINUTES must be an integer, got {offset}"
                ))
            })?;
        }
        Ok(())
    }

    /// Reject settings the timeline cannot be computed with.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(TimelineError::Configuration(
                "server.host must not be empty".to_string(),
            ));
        }
        self.options()
            .validate()
            .map_err(|e| TimelineError::Configuration(format!("[timeline] {}", e)))
    }

    /// Options used by the timeline assembler.
    pub fn options(&self) -> TimelineOptions {
        let t = &self.timeline;
        TimelineOptions {
            padding: qtty::Seconds::new(t.padding_minutes * 60.0),
            fallback_width: qtty::Seconds::new(t.fallback_width_hours * 3600.0),
            bezier_ratio: t.bezier_ratio,
            axis: AxisOptions {
                expected_width_px: t.expected_width_px,
                min_tick_spacing_px: t.min_tick_spacing_px,
                char_width_px: t.char_width_px,
                utc_offset_minutes: t.utc_offset_minutes,
            },
        }
    }

    /// `host:port` to bind the server to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
