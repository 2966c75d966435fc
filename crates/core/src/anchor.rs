//! Anchor file matching.
//!
//! Every component that needs to find Unity Mod Manager inside a list of
//! paths goes through [`is_anchor`]. Payload paths and stored tool paths may
//! use either `/` or `\` as a separator regardless of the host OS, so the
//! helpers here split on both instead of relying on `std::path`.

/// File name of the Unity Mod Manager executable.
pub const ANCHOR_FILE: &str = "UnityModManager.exe";

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Returns true if the final segment of `path` is the anchor file.
///
/// Comparison is case-insensitive and exact on the whole segment, so
/// `MyUnityModManager.exe` does not match. Directory entries (a trailing
/// separator) never match.
#[must_use]
pub fn is_anchor(path: &str) -> bool {
    !path.ends_with(SEPARATORS) && file_name(path).eq_ignore_ascii_case(ANCHOR_FILE)
}

/// Final segment of a path, ignoring trailing separators.
#[must_use]
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATORS);
    trimmed
        .rsplit_once(SEPARATORS)
        .map_or(trimmed, |(_, name)| name)
}

/// Byte offset at which the final segment of `path` starts.
#[must_use]
pub fn file_name_offset(path: &str) -> usize {
    let trimmed = path.trim_end_matches(SEPARATORS);
    trimmed.rfind(SEPARATORS).map_or(0, |idx| idx + 1)
}

/// Everything before the final segment, without the separator.
///
/// Returns an empty string for a bare file name.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATORS);
    trimmed.rsplit_once(SEPARATORS).map_or("", |(dir, _)| dir)
}

/// Compare two directory strings, treating `/` and `\` alike and ignoring
/// trailing separators.
#[must_use]
pub fn same_dir(a: &str, b: &str) -> bool {
    let a = a.trim_end_matches(SEPARATORS);
    let b = b.trim_end_matches(SEPARATORS);
    a.len() == b.len()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y || (SEPARATORS.contains(&x) && SEPARATORS.contains(&y))
        })
}
