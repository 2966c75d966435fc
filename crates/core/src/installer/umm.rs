use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::{InstallPlanBuilder, InstallResult, InstallSupport, Installer, classify};
use crate::Result;
use crate::store::ConfigStore;
use crate::tools::ToolRegistry;

/// Id the installer registers under.
pub const INSTALLER_ID: &str = "umm-installer";

/// Installer priority.
pub const INSTALLER_PRIORITY: i32 = 15;

/// Installs Unity Mod Manager distributions as mods.
#[derive(Debug, Clone)]
pub struct UmmInstaller {
    planner: InstallPlanBuilder,
}

impl UmmInstaller {
    /// Create an installer that records the tool in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            planner: InstallPlanBuilder::new(ToolRegistry::new(store)),
        }
    }
}

impl Installer for UmmInstaller {
    fn id(&self) -> &'static str {
        INSTALLER_ID
    }

    fn priority(&self) -> i32 {
        INSTALLER_PRIORITY
    }

    fn test(&self, payload: &[String], target_id: &str) -> InstallSupport {
        let support = classify(payload, target_id);
        debug!(target_id, files = payload.len(), supported = support.supported, "Tested payload");
        support
    }

    fn install(
        &self,
        payload: &[String],
        destination: &Path,
        target_id: &str,
    ) -> Result<InstallResult> {
        let instructions = self.planner.build_plan(payload, destination, target_id)?;
        Ok(InstallResult { instructions })
    }
}
