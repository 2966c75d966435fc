//! JSON file backed configuration store.
//!
//! The whole [`StateDocument`] is loaded on every read and rewritten on
//! every upsert. Concurrent writers race and the last one wins.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::{ConfigStore, StateDocument};
use crate::tools::{ToolRecord, ToolsTable};
use crate::{Error, Result};

/// Configuration store persisted as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file is an empty document.
    pub fn load(&self) -> Result<StateDocument> {
        if !self.path.exists() {
            trace!(path = ?self.path, "State file missing, using empty document");
            return Ok(StateDocument::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::io(e, Some(self.path.clone()), "read state file")
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!(
                "Failed to parse state file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Write the document, creating parent directories.
    pub fn save(&self, document: &StateDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)
            .map_err(|e| Error::serialization(format!("Failed to serialize state: {}", e)))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(e, Some(parent.to_path_buf()), "create state directory")
            })?;
        }

        std::fs::write(&self.path, content)
            .map_err(|e| Error::io(e, Some(self.path.clone()), "write state file"))?;

        debug!(path = ?self.path, "Saved state file");
        Ok(())
    }

    /// Set the install root for a target and persist it.
    pub fn set_install_path(&self, target_id: &str, path: PathBuf) -> Result<()> {
        let mut doc = self.load()?;
        doc.set_install_path(target_id, path);
        self.save(&doc)
    }
}

impl ConfigStore for JsonFileStore {
    fn tools(&self, target_id: &str) -> Result<Option<ToolsTable>> {
        let doc = self
            .load()
            .map_err(|e| Error::store_read(e.to_string()))?;
        Ok(doc.tools(target_id).cloned())
    }

    fn upsert_tool(&self, target_id: &str, tool_id: &str, record: ToolRecord) -> Result<()> {
        let mut doc = self
            .load()
            .map_err(|e| Error::store_write(e.to_string()))?;
        doc.upsert_tool(target_id, tool_id, record);
        self.save(&doc)
            .map_err(|e| Error::store_write(e.to_string()))
    }

    fn install_path(&self, target_id: &str) -> Result<Option<PathBuf>> {
        let doc = self
            .load()
            .map_err(|e| Error::store_read(e.to_string()))?;
        Ok(doc.install_path(target_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("state.json"));

        assert!(store.tools("dawnofman").unwrap().is_none());
        assert!(store.install_path("dawnofman").unwrap().is_none());
    }

    #[test]
    fn test_upsert_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("state.json");
        let store = JsonFileStore::new(&path);

        store
            .upsert_tool(
                "dawnofman",
                "UnityModManager",
                ToolRecord::unity_mod_manager("UnityModManager", Path::new("/umm")),
            )
            .unwrap();

        assert!(path.exists());
        let reopened = JsonFileStore::new(&path);
        let tools = reopened.tools("dawnofman").unwrap().unwrap();
        assert_eq!(tools["UnityModManager"].install_directory(), Some("/umm"));
    }

    #[test]
    fn test_set_install_path() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("state.json"));

        store
            .set_install_path("gardenpaws", PathBuf::from("/mods/gardenpaws"))
            .unwrap();

        assert_eq!(
            store.install_path("gardenpaws").unwrap(),
            Some(PathBuf::from("/mods/gardenpaws"))
        );
    }

    #[test]
    fn test_corrupt_file_is_store_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.tools("dawnofman").unwrap_err();
        assert!(matches!(err, Error::StoreRead { .. }));
    }

    #[test]
    fn test_foreign_records_survive_upsert() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"settings":{"gameMode":{"dawnofman":{"tools":{"bepinex":{"id":"bepinex","path":"/b/BepInEx.exe"}}}}}}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        store
            .upsert_tool(
                "dawnofman",
                "UnityModManager",
                ToolRecord::unity_mod_manager("UnityModManager", Path::new("/umm")),
            )
            .unwrap();

        let tools = store.tools("dawnofman").unwrap().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools["bepinex"].stored_path(), Some("/b/BepInEx.exe"));
    }

    #[test]
    fn test_reconcile_preserves_host_data() {
        use crate::tools::{DEFAULT_TOOL_ID, ToolRegistry};
        use std::sync::Arc;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(
            &path,
            r#"{
                "persistent": {"downloads": {"files": {}}},
                "settings": {
                    "interface": {"language": "en"},
                    "gameMode": {"dawnofman": {"tools": {"bepinex": {
                        "id": "bepinex",
                        "path": "/b/BepInEx.exe",
                        "parameters": ["--console"],
                        "environment": {"DOORSTOP_ENABLE": "TRUE"}
                    }}}},
                    "mods": {"installPath": {}}
                }
            }"#,
        )
        .unwrap();

        let store = Arc::new(JsonFileStore::new(&path));
        ToolRegistry::new(store)
            .reconcile(Path::new("/umm"), "dawnofman", DEFAULT_TOOL_ID)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let bepinex = &json["settings"]["gameMode"]["dawnofman"]["tools"]["bepinex"];
        assert_eq!(bepinex["parameters"][0], "--console");
        assert_eq!(bepinex["environment"]["DOORSTOP_ENABLE"], "TRUE");
        assert_eq!(json["settings"]["interface"]["language"], "en");
        assert!(json["persistent"]["downloads"].is_object());
        assert!(
            json["settings"]["gameMode"]["dawnofman"]["tools"][DEFAULT_TOOL_ID].is_object()
        );
    }
}
