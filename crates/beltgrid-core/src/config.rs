//! Runtime configuration, loaded from RON, TOML or JSON.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides:
//!
//! ```ron
//! (
//!     sim: (tick_interval_secs: 0.25),
//!     view: (player_speed: 60.0),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scheduler::DEFAULT_TICK_INTERVAL;

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A value parsed but is unusable.
    #[error("invalid value for {field}: {detail}")]
    Invalid { field: &'static str, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Config types
// ===========================================================================

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square grid.
    pub world_size: u32,
    /// Seconds between steps.
    pub tick_interval_secs: f64,
    /// Ring buffer capacity per event kind.
    pub event_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_size: 50,
            tick_interval_secs: DEFAULT_TICK_INTERVAL,
            event_capacity: 1024,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size == 0 {
            return Err(ConfigError::Invalid {
                field: "world_size",
                detail: "must be at least 1".into(),
            });
        }
        if !self.tick_interval_secs.is_finite() || self.tick_interval_secs <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_secs",
                detail: format!("must be positive, got {}", self.tick_interval_secs),
            });
        }
        Ok(())
    }
}

/// Front-end parameters: window, player and camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// World units per cell edge.
    pub block_size: f32,
    pub player_size: f32,
    /// World units per second.
    pub player_speed: f32,
    /// Starting zoom factor.
    pub zoom: f32,
    /// Zoom change per mouse wheel line.
    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 450,
            block_size: 10.0,
            player_size: 8.0,
            player_speed: 30.0,
            zoom: 3.0,
            zoom_step: 0.05,
            zoom_min: 0.1,
            zoom_max: 3.0,
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.block_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "block_size",
                detail: format!("must be positive, got {}", self.block_size),
            });
        }
        if !(self.zoom_min > 0.0) || self.zoom_min > self.zoom_max {
            return Err(ConfigError::Invalid {
                field: "zoom_min",
                detail: format!(
                    "need 0 < zoom_min <= zoom_max, got {}..{}",
                    self.zoom_min, self.zoom_max
                ),
            });
        }
        Ok(())
    }
}

/// Top-level config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim: SimConfig,
    pub view: ViewConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        self.view.validate()
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// Parse config text in the given format and validate it.
pub fn parse_config(content: &str, format: Format, file: &Path) -> Result<Config, ConfigError> {
    let parse_err = |detail: String| ConfigError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    let config: Config = match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
    };
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content, format, path)?;
    log::info!(
        "loaded config from {}: {}x{} grid, {}s ticks",
        path.display(),
        config.sim.world_size,
        config.sim.world_size,
        config.sim.tick_interval_secs
    );
    Ok(config)
}

/// Load `path` if given, otherwise use defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}
