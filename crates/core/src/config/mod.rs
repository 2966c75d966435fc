//! Settings for ummlink hosts.
//!
//! ```toml
//! stateFile = "/home/me/.local/state/ummlink/state.json"
//!
//! [registry]
//! hive = "HKEY_CURRENT_USER"
//! key = 'Software\UnityModManager'
//! name = "Path"
//!
//! [installPaths]
//! dawnofman = "/games/mods/dawnofman"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Error, Result, paths};

/// Registry hive Unity Mod Manager records its location under.
pub const REGISTRY_HIVE: &str = "HKEY_CURRENT_USER";

/// Registry key Unity Mod Manager records its location under.
pub const REGISTRY_KEY: &str = r"Software\UnityModManager";

/// Registry value holding the install directory.
pub const REGISTRY_VALUE: &str = "Path";

/// Main settings structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON state document; defaults to [`paths::state_file`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,

    /// Where to look for Unity Mod Manager's own install record.
    #[serde(default)]
    pub registry: RegistryLocation,

    /// Install roots to seed into the state document, per target.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub install_paths: BTreeMap<String, PathBuf>,
}

/// Location of a value in the OS registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryLocation {
    /// Hive, e.g. `HKEY_CURRENT_USER`.
    pub hive: String,
    /// Key below the hive.
    pub key: String,
    /// Value name.
    pub name: String,
}

impl Default for RegistryLocation {
    fn default() -> Self {
        Self {
            hive: REGISTRY_HIVE.to_string(),
            key: REGISTRY_KEY.to_string(),
            name: REGISTRY_VALUE.to_string(),
        }
    }
}

impl Config {
    /// Load settings from `path`.
    ///
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(?path, "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read settings: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse settings: {}", e)))
    }

    /// Load settings from `path`, or from [`paths::config_file`] if `None`.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load(&paths::config_file()?),
        }
    }

    /// State document location, falling back to the platform default.
    pub fn state_file(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(p) => Ok(p.clone()),
            None => paths::state_file(),
        }
    }
}
