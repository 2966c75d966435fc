//! Reconciliation of the Unity Mod Manager tool record.
//!
//! [`ToolRegistry::reconcile`] keeps the stored record's directory in line
//! with the most recently resolved install location. It reads the tools
//! table once and writes at most once.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::record::ToolRecord;
use crate::Result;
use crate::anchor;
use crate::store::ConfigStore;

/// What a reconciliation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No matching record existed; one was created.
    Created {
        /// Id the record was stored under.
        tool_id: String,
    },
    /// The existing record pointed elsewhere and was moved.
    Updated {
        /// Id of the existing record, kept as is.
        tool_id: String,
        /// Directory the record pointed at before.
        previous: String,
    },
    /// The existing record already pointed at the resolved directory.
    Unchanged {
        /// Id of the existing record.
        tool_id: String,
    },
}

impl Reconciliation {
    /// Returns true if the store was written.
    #[must_use]
    pub fn wrote(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// Id of the record that now describes the tool.
    #[must_use]
    pub fn tool_id(&self) -> &str {
        match self {
            Self::Created { tool_id }
            | Self::Updated { tool_id, .. }
            | Self::Unchanged { tool_id } => tool_id,
        }
    }
}

/// Reads and upserts Unity Mod Manager records in a [`ConfigStore`].
#[derive(Clone)]
pub struct ToolRegistry {
    store: Arc<dyn ConfigStore>,
}

impl ToolRegistry {
    /// Create a registry over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }

    /// Make the target's Unity Mod Manager record point at `resolved`.
    ///
    /// An existing record keeps its id so settings attached to it survive a
    /// move; `preferred_id` is only used when no record exists. Store errors
    /// are returned unchanged and nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the store's error if reading the tools table or writing the
    /// record fails.
    pub fn reconcile(
        &self,
        resolved: &Path,
        target_id: &str,
        preferred_id: &str,
    ) -> Result<Reconciliation> {
        let resolved_str = resolved.to_string_lossy();

        // The table key is the record's identity; the stored `id` field may
        // be missing or stale.
        let existing = self.store.tools(target_id)?.and_then(|tools| {
            tools
                .into_iter()
                .find(|(_, record)| record.is_unity_mod_manager())
        });

        let Some((tool_id, record)) = existing else {
            debug!(target_id, directory = %resolved_str, "No Unity Mod Manager record, creating one");
            self.write(
                target_id,
                preferred_id,
                ToolRecord::unity_mod_manager(preferred_id, resolved),
            )?;
            return Ok(Reconciliation::Created {
                tool_id: preferred_id.to_string(),
            });
        };

        let previous = record.install_directory().unwrap_or_default().to_string();
        if anchor::same_dir(&previous, &resolved_str) {
            debug!(target_id, %tool_id, "Tool record already current");
            return Ok(Reconciliation::Unchanged { tool_id });
        }

        debug!(
            target_id,
            %tool_id,
            %previous,
            directory = %resolved_str,
            "Tool record points elsewhere, updating"
        );
        let moved = record.relocated(tool_id.as_str(), resolved);
        self.write(target_id, &tool_id, moved)?;
        Ok(Reconciliation::Updated { tool_id, previous })
    }

    fn write(&self, target_id: &str, tool_id: &str, record: ToolRecord) -> Result<()> {
        let directory = record.working_directory.clone().unwrap_or_default();
        self.store.upsert_tool(target_id, tool_id, record)?;
        info!(target_id, tool_id, %directory, "Registered Unity Mod Manager");
        Ok(())
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").finish_non_exhaustive()
    }
}
