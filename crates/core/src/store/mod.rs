//! Configuration store contract.
//!
//! The host application owns the persistent state; this crate only reads the
//! registered tools and install roots for a target and upserts tool records.
//! Two stores ship with the crate:
//!
//! - [`MemoryStore`] keeps the document in memory and counts writes
//! - [`JsonFileStore`] persists the document as a JSON file
//!
//! Both operate on a [`StateDocument`], whose layout mirrors the host's
//! `settings.gameMode.<target>.tools` and `settings.mods.installPath.<target>`
//! paths.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::Result;
use crate::tools::{ToolRecord, ToolsTable};

/// Read and upsert primitives of the host's configuration store.
///
/// Reads and writes are separate calls; a read followed by a write is not
/// atomic.
pub trait ConfigStore: Send + Sync {
    /// Registered tools for `target_id`, or `None` if the target has no
    /// tools table at all.
    fn tools(&self, target_id: &str) -> Result<Option<ToolsTable>>;

    /// Insert or replace the record stored under `(target_id, tool_id)`.
    fn upsert_tool(&self, target_id: &str, tool_id: &str, record: ToolRecord) -> Result<()>;

    /// Mod install root for `target_id`, if configured.
    fn install_path(&self, target_id: &str) -> Result<Option<PathBuf>>;
}

/// The persisted state document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Settings subtree.
    #[serde(default)]
    pub settings: Settings,
    /// Top-level keys owned by the host.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `settings` subtree of the state document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Per-target settings.
    #[serde(default)]
    pub game_mode: BTreeMap<String, TargetSettings>,
    /// Mod settings.
    #[serde(default)]
    pub mods: ModSettings,
    /// Other settings subtrees.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `settings.gameMode.<target>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSettings {
    /// Registered tools. Absent until the first tool is registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsTable>,
    /// Other per-target settings.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `settings.mods`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModSettings {
    /// Install root per target.
    #[serde(default)]
    pub install_path: BTreeMap<String, PathBuf>,
    /// Other mod settings.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StateDocument {
    /// Registered tools for a target.
    #[must_use]
    pub fn tools(&self, target_id: &str) -> Option<&ToolsTable> {
        self.settings
            .game_mode
            .get(target_id)
            .and_then(|t| t.tools.as_ref())
    }

    /// Insert or replace a tool record.
    ///
    /// Unknown fields of a replaced record survive unless `record` sets them.
    pub fn upsert_tool(&mut self, target_id: &str, tool_id: &str, mut record: ToolRecord) {
        let tools = self
            .settings
            .game_mode
            .entry(target_id.to_string())
            .or_default()
            .tools
            .get_or_insert_with(ToolsTable::new);

        if let Some(previous) = tools.remove(tool_id) {
            for (key, value) in previous.extra {
                record.extra.entry(key).or_insert(value);
            }
        }
        tools.insert(tool_id.to_string(), record);
    }

    /// Install root for a target.
    #[must_use]
    pub fn install_path(&self, target_id: &str) -> Option<&PathBuf> {
        self.settings.mods.install_path.get(target_id)
    }

    /// Set the install root for a target.
    pub fn set_install_path(&mut self, target_id: &str, path: PathBuf) {
        self.settings
            .mods
            .install_path
            .insert(target_id.to_string(), path);
    }
}
