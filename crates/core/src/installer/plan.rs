//! Install planning.
//!
//! Every payload path is rebased by the same offset: the position where the
//! anchor's file name starts in the first anchor path. The anchor therefore
//! lands directly under the mod's install root, and everything next to or
//! below it keeps its relative layout.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use super::Instruction;
use crate::anchor::{self, is_anchor};
use crate::tools::{DEFAULT_TOOL_ID, ToolRegistry};
use crate::{Error, Result};

/// Suffix the host appends to a mod's staging directory while installing.
pub const STAGING_SUFFIX: &str = ".installing";

/// Rebase `paths` so the first anchor file sits at the install root.
///
/// Produces one copy instruction per path, in payload order.
///
/// # Errors
///
/// Returns [`Error::AnchorNotFound`] if no path is the anchor file.
pub fn rebase<S: AsRef<str>>(paths: &[S]) -> Result<Vec<Instruction>> {
    let anchor_path = paths
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|p| is_anchor(p))
        .ok_or_else(|| Error::anchor_not_found(paths.len()))?;

    let offset = anchor::file_name_offset(anchor_path);
    debug!(anchor = anchor_path, offset, "Rebasing payload");

    Ok(paths
        .iter()
        .map(|source| {
            let source = source.as_ref();
            let destination = match source.get(offset..) {
                Some(rest) if !rest.is_empty() => rest,
                _ => {
                    warn!(source, offset, "Payload path shorter than anchor prefix, using file name");
                    anchor::file_name(source)
                }
            };
            trace!(source, destination, "Rebased path");
            Instruction::copy(source, destination)
        })
        .collect())
}

/// Directory a mod staged at `destination` ends up in under `install_root`.
///
/// The staging suffix is dropped from the final segment of `destination`.
#[must_use]
pub fn resolve_install_dir(install_root: &Path, destination: &Path) -> PathBuf {
    let destination = destination.to_string_lossy();
    let name = anchor::file_name(&destination);
    let name = name
        .strip_suffix(STAGING_SUFFIX)
        .filter(|n| !n.is_empty())
        .unwrap_or(name);
    install_root.join(name)
}

/// Builds copy plans and keeps the tool record in sync with them.
#[derive(Debug, Clone)]
pub struct InstallPlanBuilder {
    registry: ToolRegistry,
}

impl InstallPlanBuilder {
    /// Create a builder that reconciles through `registry`.
    #[must_use]
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Plan the install of `paths` staged at `destination` for `target_id`.
    ///
    /// The resolved install directory comes from the target's install root
    /// and the staging directory name, not from the copy destinations. The
    /// tool record is reconciled against it before the plan is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AnchorNotFound`] if the payload has no anchor,
    /// [`Error::InstallRootMissing`] if the store has no install root for the
    /// target, and any store error from reconciliation.
    pub fn build_plan<S: AsRef<str>>(
        &self,
        paths: &[S],
        destination: &Path,
        target_id: &str,
    ) -> Result<Vec<Instruction>> {
        let instructions = rebase(paths)?;

        let install_root = self
            .registry
            .store()
            .install_path(target_id)?
            .ok_or_else(|| Error::install_root_missing(target_id))?;
        let resolved = resolve_install_dir(&install_root, destination);

        self.registry
            .reconcile(&resolved, target_id, DEFAULT_TOOL_ID)?;

        Ok(instructions)
    }
}
