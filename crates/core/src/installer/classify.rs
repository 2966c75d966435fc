//! Payload detection.

use super::InstallSupport;
use crate::anchor::is_anchor;
use crate::targets::is_supported;

/// Returns true if any payload path is the anchor file.
#[must_use]
pub fn contains_anchor<S: AsRef<str>>(paths: &[S]) -> bool {
    paths.iter().any(|p| is_anchor(p.as_ref()))
}

/// Decide whether `paths` is a Unity Mod Manager payload we handle for
/// `target_id`.
///
/// No extra required files are reported; the anchor check is the only
/// requirement.
#[must_use]
pub fn classify<S: AsRef<str>>(paths: &[S], target_id: &str) -> InstallSupport {
    InstallSupport {
        supported: is_supported(target_id) && contains_anchor(paths),
        required_files: Vec::new(),
    }
}
