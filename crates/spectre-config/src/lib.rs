//! Spectre configuration
//!
//! Settings are read from `spectre.toml`, with `SPECTRE_*` environment variables
//! taking precedence over file values.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spectre_color::{ColoringMode, ColoringOptions};
use spectre_core::{BaseShape, DEFAULT_MAX_GENERATIONS, HiddenSet, Role, TilingError};
use thiserror::Error;
use tracing::warn;

/// Default file name looked up by [`SpectreConfig::load_or_default`].
pub const CONFIG_FILE: &str = "spectre.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] TilingError),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SpectreConfig {
    /// Base shape and how far to grow it
    pub tiling: TilingConfig,
    /// Hidden paths and pruning
    pub view: ViewConfig,
    /// Coloring mode, palette and seed
    pub coloring: ColoringOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TilingConfig {
    /// `spectre`, `spectre-curved`, `hat` or `hexagon`
    pub shape: String,
    /// Generation to grow to and display
    pub generations: usize,
    /// Hard cap on generations; tile count grows geometrically
    pub max_generations: usize,
    /// Role whose hierarchy is baked
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Hierarchical paths such as `"0:3"` hidden along with their subtrees
    pub hidden: Vec<String>,
    /// Drop hidden subtrees instead of keeping them as ghosts (default: true)
    pub prune_hidden: bool,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            shape: BaseShape::default().to_string(),
            generations: 2,
            max_generations: DEFAULT_MAX_GENERATIONS,
            role: Role::Delta.to_string(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            hidden: Vec::new(),
            prune_hidden: true,
        }
    }
}

impl TilingConfig {
    pub fn base_shape(&self) -> Result<BaseShape, ConfigError> {
        Ok(BaseShape::from_str(&self.shape)?)
    }

    pub fn active_role(&self) -> Result<Role, ConfigError> {
        Ok(Role::from_str(&self.role)?)
    }

    /// The requested generation, rejected when past the cap.
    pub fn target_generation(&self) -> Result<usize, ConfigError> {
        if self.generations > self.max_generations {
            return Err(TilingError::GenerationLimit {
                limit: self.max_generations,
            }
            .into());
        }
        Ok(self.generations)
    }
}

impl ViewConfig {
    pub fn hidden_set(&self) -> HiddenSet {
        self.hidden.iter().cloned().collect()
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl SpectreConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `Ok(None)` when `path` does not exist; read and parse failures of an existing file are errors
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from_file(path).map(Some)
    }

    /// Load `spectre.toml` from the current directory, or defaults if it is missing or invalid.
    /// An existing file that fails to load is reported with `warn!`.
    pub fn load_or_default() -> Self {
        Self::load_optional_or_default(CONFIG_FILE)
    }

    fn load_optional_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_optional(path) {
            Ok(found) => found.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "using default configuration");
                Self::default()
            }
        }
    }

    /// Apply `SPECTRE_*` environment overrides. Unparseable numbers and modes are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(shape) = std::env::var("SPECTRE_SHAPE") {
            self.tiling.shape = shape;
        }
        if let Ok(val) = std::env::var("SPECTRE_GENERATIONS") {
            if let Ok(generations) = val.parse::<usize>() {
                self.tiling.generations = generations;
            }
        }
        if let Ok(role) = std::env::var("SPECTRE_ROLE") {
            self.tiling.role = role;
        }
        if let Ok(val) = std::env::var("SPECTRE_PRUNE_HIDDEN") {
            self.view.prune_hidden = env_flag(&val);
        }
        if let Ok(val) = std::env::var("SPECTRE_COLOR_MODE") {
            if let Ok(mode) = val.parse::<ColoringMode>() {
                self.coloring.mode = mode;
            }
        }
        if let Ok(val) = std::env::var("SPECTRE_SEED") {
            if let Ok(seed) = val.parse::<u64>() {
                self.coloring.seed = seed;
            }
        }
    }

    /// Load `spectre.toml` (or defaults), then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
