//! Configuration for the dustfield background.
//!
//! Settings live in `config.toml` under the platform configuration
//! directory. Every key is optional; a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use dustfield_core::{AnimationSpeed, DustPalette, Rgb};
use serde::{Deserialize, Serialize};

/// Default area, in square virtual pixels, that one particle accounts for.
pub const DEFAULT_DENSITY_DIVISOR: f32 = 15_000.0;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no home directory to place configuration in")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colors dust particles are drawn in.
    pub palette: DustPalette,
    /// Frame rate preset.
    pub animation_speed: AnimationSpeed,
    /// Area per particle; larger means sparser dust.
    pub density_divisor: f32,
    /// Fixed random seed, for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Color the dust is blended against.
    pub background: Rgb,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: DustPalette::default(),
            animation_speed: AnimationSpeed::default(),
            density_divisor: DEFAULT_DENSITY_DIVISOR,
            seed: None,
            background: Rgb(10, 10, 18),
        }
    }
}

impl Config {
    /// Platform directories for dustfield, if a home directory exists.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "dustfield")
    }

    /// Location of the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to default configuration");
            Self::default()
        })
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)
    }

    /// Replace out-of-range values with their defaults.
    fn sanitized(mut self) -> Self {
        if !self.density_divisor.is_finite() || self.density_divisor <= 0.0 {
            log::warn!(
                "density_divisor {} is not positive, using {}",
                self.density_divisor,
                DEFAULT_DENSITY_DIVISOR
            );
            self.density_divisor = DEFAULT_DENSITY_DIVISOR;
        }
        self
    }
}
