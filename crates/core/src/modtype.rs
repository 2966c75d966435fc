//! Deployment category for Unity Mod Manager installs.
//!
//! A mod whose instructions copy the anchor file is Unity Mod Manager
//! itself, which the host deploys differently from regular mods.

use std::path::PathBuf;

use crate::anchor::is_anchor;
use crate::installer::Instruction;
use crate::targets::is_supported;

/// Id the mod type registers under.
pub const MOD_TYPE_ID: &str = "umm";

/// Mod type priority.
pub const MOD_TYPE_PRIORITY: i32 = 15;

/// A named deployment category the host can tag mods with.
pub trait ModType: Send + Sync {
    /// Mod type id.
    fn id(&self) -> &'static str;

    /// Lower is checked first.
    fn priority(&self) -> i32;

    /// Whether the category exists for `target_id`.
    fn matches(&self, target_id: &str) -> bool;

    /// Deployment root override for `target_id`, if any.
    fn path(&self, target_id: &str) -> Option<PathBuf>;

    /// Whether a mod with these instructions belongs to the category.
    fn classify(&self, instructions: &[Instruction]) -> bool;
}

/// Returns true if any copy instruction's destination is the anchor file.
#[must_use]
pub fn copies_anchor(instructions: &[Instruction]) -> bool {
    instructions
        .iter()
        .filter_map(Instruction::copy_destination)
        .any(is_anchor)
}

/// The `umm` mod type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmmModType;

impl ModType for UmmModType {
    fn id(&self) -> &'static str {
        MOD_TYPE_ID
    }

    fn priority(&self) -> i32 {
        MOD_TYPE_PRIORITY
    }

    fn matches(&self, target_id: &str) -> bool {
        is_supported(target_id)
    }

    fn path(&self, _target_id: &str) -> Option<PathBuf> {
        None
    }

    fn classify(&self, instructions: &[Instruction]) -> bool {
        copies_anchor(instructions)
    }
}
