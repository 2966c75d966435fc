//! Registry-driven detection of externally installed Unity Mod Manager.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use ummlink_core::Result;
use ummlink_core::anchor::ANCHOR_FILE;
use ummlink_core::config::RegistryLocation;
use ummlink_core::store::ConfigStore;
use ummlink_core::targets;
use ummlink_core::tools::{DEFAULT_TOOL_ID, Reconciliation, ToolRegistry};

use crate::fs::FileSystem;
use crate::registry::RegistryAccessor;

/// Why a probe found nothing to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeUnavailable {
    /// The integration is not active for the target.
    UnsupportedTarget,
    /// The registry value is missing or empty.
    RegistryValueMissing,
    /// The registry names a directory without the executable in it.
    AnchorMissing {
        /// Path that was checked.
        path: PathBuf,
    },
}

/// Result of a probe that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A verified install was found and the tool record reconciled.
    Reconciled {
        /// Verified install directory.
        directory: PathBuf,
        /// What the reconciliation did.
        reconciliation: Reconciliation,
    },
    /// Nothing was found; the store was not touched.
    Unavailable(ProbeUnavailable),
}

/// Looks up Unity Mod Manager's self-recorded install directory and
/// reconciles the tool record with it.
///
/// Nothing is written unless the executable is present in the recorded
/// directory.
#[derive(Clone)]
pub struct ExternalInstallProbe {
    registry: ToolRegistry,
    accessor: Arc<dyn RegistryAccessor>,
    fs: Arc<dyn FileSystem>,
    location: RegistryLocation,
}

impl std::fmt::Debug for ExternalInstallProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalInstallProbe")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl ExternalInstallProbe {
    /// Create a probe reading the default registry location.
    #[must_use]
    pub fn new(
        store: Arc<dyn ConfigStore>,
        accessor: Arc<dyn RegistryAccessor>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            registry: ToolRegistry::new(store),
            accessor,
            fs,
            location: RegistryLocation::default(),
        }
    }

    /// Read the install directory from `location` instead.
    #[must_use]
    pub fn with_location(mut self, location: RegistryLocation) -> Self {
        self.location = location;
        self
    }

    /// Registry location this probe reads.
    #[must_use]
    pub fn location(&self) -> &RegistryLocation {
        &self.location
    }

    /// Probe for an external install and reconcile it for `target_id`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the reconciliation fails. Every other
    /// failure is reported as [`ProbeOutcome::Unavailable`].
    pub fn probe(&self, target_id: &str) -> Result<ProbeOutcome> {
        if !targets::is_supported(target_id) {
            debug!(target_id, "Target not supported, skipping probe");
            return Ok(ProbeOutcome::Unavailable(
                ProbeUnavailable::UnsupportedTarget,
            ));
        }

        let RegistryLocation { hive, key, name } = &self.location;
        let Some(value) = self.accessor.get(hive, key, name) else {
            debug!(target_id, %hive, %key, %name, "No install recorded in registry");
            return Ok(ProbeOutcome::Unavailable(
                ProbeUnavailable::RegistryValueMissing,
            ));
        };

        let directory = PathBuf::from(value);
        let executable = directory.join(ANCHOR_FILE);
        if !self.fs.exists(&executable) {
            debug!(target_id, path = %executable.display(), "Recorded install has no executable");
            return Ok(ProbeOutcome::Unavailable(ProbeUnavailable::AnchorMissing {
                path: executable,
            }));
        }

        let reconciliation = self
            .registry
            .reconcile(&directory, target_id, DEFAULT_TOOL_ID)?;
        info!(
            target_id,
            directory = %directory.display(),
            tool_id = reconciliation.tool_id(),
            wrote = reconciliation.wrote(),
            "Reconciled external Unity Mod Manager install"
        );

        Ok(ProbeOutcome::Reconciled {
            directory,
            reconciliation,
        })
    }
}
