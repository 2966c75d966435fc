//! In-memory configuration store.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{ConfigStore, StateDocument};
use crate::tools::{ToolRecord, ToolsTable};
use crate::{Error, Result};

/// Configuration store backed by an in-memory [`StateDocument`].
///
/// Counts successful writes so callers can observe store churn, and can be
/// switched into a failing mode to exercise write-error propagation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<StateDocument>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `document`.
    #[must_use]
    pub fn with_document(document: StateDocument) -> Self {
        Self {
            document: Mutex::new(document),
            ..Self::default()
        }
    }

    /// Set the install root for a target. Not counted as a tool write.
    pub fn set_install_path(&self, target_id: &str, path: impl Into<PathBuf>) -> Result<()> {
        let mut doc = self
            .document
            .lock()
            .map_err(|_| Error::store_write("state lock poisoned"))?;
        doc.set_install_path(target_id, path.into());
        Ok(())
    }

    /// Make every subsequent upsert fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful tool upserts.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> Result<StateDocument> {
        self.document
            .lock()
            .map(|doc| doc.clone())
            .map_err(|_| Error::store_read("state lock poisoned"))
    }
}

impl ConfigStore for MemoryStore {
    fn tools(&self, target_id: &str) -> Result<Option<ToolsTable>> {
        let doc = self
            .document
            .lock()
            .map_err(|_| Error::store_read("state lock poisoned"))?;
        Ok(doc.tools(target_id).cloned())
    }

    fn upsert_tool(&self, target_id: &str, tool_id: &str, record: ToolRecord) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::store_write(format!(
                "upsert of {target_id}/{tool_id} rejected"
            )));
        }
        let mut doc = self
            .document
            .lock()
            .map_err(|_| Error::store_write("state lock poisoned"))?;
        doc.upsert_tool(target_id, tool_id, record);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn install_path(&self, target_id: &str) -> Result<Option<PathBuf>> {
        let doc = self
            .document
            .lock()
            .map_err(|_| Error::store_read("state lock poisoned"))?;
        Ok(doc.install_path(target_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.write_count(), 0);
        assert!(store.tools("dawnofman").unwrap().is_none());

        store
            .upsert_tool(
                "dawnofman",
                "UnityModManager",
                ToolRecord::unity_mod_manager("UnityModManager", Path::new("/umm")),
            )
            .unwrap();

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.tools("dawnofman").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let store = MemoryStore::new();
        store.fail_writes(true);

        let err = store
            .upsert_tool("dawnofman", "x", ToolRecord::default())
            .unwrap_err();
        assert!(matches!(err, Error::StoreWrite { .. }));
        assert_eq!(store.write_count(), 0);
        assert!(store.tools("dawnofman").unwrap().is_none());
    }

    #[test]
    fn test_install_path_not_counted() {
        let store = MemoryStore::new();
        store.set_install_path("gardenpaws", "/mods/gardenpaws").unwrap();

        assert_eq!(
            store.install_path("gardenpaws").unwrap(),
            Some(PathBuf::from("/mods/gardenpaws"))
        );
        assert_eq!(store.write_count(), 0);
    }
}
