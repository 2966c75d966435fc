//! Installer hook pair for Unity Mod Manager payloads.
//!
//! The host presents each candidate archive as a flat list of already
//! extracted paths. [`Installer::test`] decides whether a payload is ours;
//! [`Installer::install`] turns it into copy instructions.
//!
//! - [`classify`] - payload detection ([`InstallSupport`])
//! - [`InstallPlanBuilder`] - path rebasing plus tool record reconciliation
//! - [`UmmInstaller`] - the [`Installer`] registered with the host

mod classify;
mod plan;
mod umm;

pub use classify::{classify, contains_anchor};
pub use plan::{InstallPlanBuilder, STAGING_SUFFIX, rebase, resolve_install_dir};
pub use umm::{INSTALLER_ID, INSTALLER_PRIORITY, UmmInstaller};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// One step of an install, as understood by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    /// Copy a payload file to a path relative to the mod's install root.
    Copy {
        /// Payload path.
        source: String,
        /// Destination relative to the install root.
        destination: String,
    },
    /// Create a directory relative to the install root.
    Mkdir {
        /// Directory to create.
        destination: String,
    },
    /// Tag the mod with a deployment category.
    #[serde(rename = "setmodtype")]
    SetModType {
        /// Mod type id.
        value: String,
    },
    /// Attach an attribute to the mod.
    Attribute {
        /// Attribute name.
        key: String,
        /// Attribute value.
        value: serde_json::Value,
    },
}

impl Instruction {
    /// Copy instruction.
    pub fn copy(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Copy {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Destination of a copy instruction.
    #[must_use]
    pub fn copy_destination(&self) -> Option<&str> {
        match self {
            Self::Copy { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

/// Result of [`Installer::test`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallSupport {
    /// The installer handles this payload for this target.
    pub supported: bool,
    /// Files the payload must contain besides what was already checked.
    pub required_files: Vec<String>,
}

/// Result of [`Installer::install`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallResult {
    /// Instructions for the host to carry out.
    pub instructions: Vec<Instruction>,
}

/// Detect/transform hook pair the host's installer pipeline calls.
pub trait Installer: Send + Sync {
    /// Installer id.
    fn id(&self) -> &'static str;

    /// Lower runs first.
    fn priority(&self) -> i32;

    /// Decide whether this installer handles `payload` for `target_id`.
    ///
    /// Total: unsupported input yields `supported: false`, never an error.
    fn test(&self, payload: &[String], target_id: &str) -> InstallSupport;

    /// Turn `payload` into instructions for the staging directory
    /// `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload has no anchor file or the
    /// configuration store fails.
    fn install(&self, payload: &[String], destination: &Path, target_id: &str)
    -> Result<InstallResult>;
}
