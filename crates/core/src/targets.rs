//! Targets the integration is active for.

/// Target identifiers with Unity Mod Manager support.
///
/// Adding a target is a code change.
pub const SUPPORTED_TARGETS: &[&str] = &[
    "dawnofman",
    "gardenpaws",
    "pathfinderkingmaker",
    "oxygennotincluded",
];

/// Returns true if `target_id` is in [`SUPPORTED_TARGETS`].
#[must_use]
pub fn is_supported(target_id: &str) -> bool {
    SUPPORTED_TARGETS.contains(&target_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(is_supported("dawnofman"));
        assert!(is_supported("oxygennotincluded"));
        assert!(!is_supported("unsupported_game"));
        assert!(!is_supported("DawnOfMan"));
        assert!(!is_supported(""));
    }
}
