//! Tool records as persisted by the configuration store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::anchor::{self, ANCHOR_FILE};

/// Default id under which a newly discovered Unity Mod Manager is registered.
pub const DEFAULT_TOOL_ID: &str = "UnityModManager";

/// Display name shown for the tool.
pub const TOOL_NAME: &str = "Unity Mod Manager";

/// Logo asset shipped with the integration.
pub const TOOL_LOGO: &str = "umm.png";

/// Registered tools for one target, keyed by tool id.
pub type ToolsTable = BTreeMap<String, ToolRecord>;

/// A tool registered for a target.
///
/// Mirrors `settings.gameMode.<target>.tools.<id>`. Records written by other
/// integrations may omit fields, so everything defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolRecord {
    /// Tool id; also the key in [`ToolsTable`].
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Logo asset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Executable file name, relative to the install directory.
    pub executable: String,
    /// Files that must exist for the tool to be considered present.
    pub required_files: Vec<String>,
    /// Full path of the executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Hidden from the tool list.
    pub hidden: bool,
    /// Added by the user rather than discovered.
    pub custom: bool,
    /// Directory the tool runs in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    /// Fields other integrations or the user attached, kept as is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ToolRecord {
    /// Record for Unity Mod Manager installed in `directory`.
    ///
    /// The tool is portable, so the working directory is the install
    /// directory.
    #[must_use]
    pub fn unity_mod_manager(id: impl Into<String>, directory: &Path) -> Self {
        let dir = directory.to_string_lossy().into_owned();
        Self {
            id: id.into(),
            name: TOOL_NAME.to_string(),
            logo: Some(TOOL_LOGO.to_string()),
            executable: ANCHOR_FILE.to_string(),
            required_files: vec![ANCHOR_FILE.to_string()],
            path: Some(directory.join(ANCHOR_FILE).to_string_lossy().into_owned()),
            hidden: false,
            custom: false,
            working_directory: Some(dir),
            extra: serde_json::Map::new(),
        }
    }

    /// This record moved to `directory` and stored under `id`.
    ///
    /// Location fields are replaced; display settings and unknown fields
    /// carry over.
    #[must_use]
    pub fn relocated(self, id: impl Into<String>, directory: &Path) -> Self {
        let fresh = Self::unity_mod_manager(id, directory);
        Self {
            id: fresh.id,
            name: if self.name.is_empty() { fresh.name } else { self.name },
            logo: self.logo.or(fresh.logo),
            executable: fresh.executable,
            required_files: fresh.required_files,
            path: fresh.path,
            working_directory: fresh.working_directory,
            hidden: self.hidden,
            custom: self.custom,
            extra: self.extra,
        }
    }

    /// Stored executable path, if set and non-empty.
    #[must_use]
    pub fn stored_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Directory the executable lives in, derived from the stored path.
    #[must_use]
    pub fn install_directory(&self) -> Option<&str> {
        self.stored_path().map(anchor::parent_dir)
    }

    /// Returns true if the stored path points at the anchor file.
    #[must_use]
    pub fn is_unity_mod_manager(&self) -> bool {
        self.stored_path().is_some_and(anchor::is_anchor)
    }
}
