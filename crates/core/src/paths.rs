//! Platform-appropriate locations for ummlink data.
//!
//! | Platform | State Dir | Config Dir |
//! |----------|-----------|------------|
//! | **Linux** | `~/.local/state/ummlink` | `~/.config/ummlink` |
//! | **macOS** | `~/Library/Application Support/ummlink` | `~/Library/Application Support/ummlink` |
//! | **Windows** | `%APPDATA%\ummlink` | `%APPDATA%\ummlink` |
//!
//! Overrides for testing and CI:
//! - `UMMLINK_STATE_DIR` - Override state directory
//! - `UMMLINK_CONFIG` - Override settings file

use crate::{Error, Result};
use std::path::PathBuf;

/// Get the state directory for persistent ummlink data.
///
/// Resolution order:
/// 1. `UMMLINK_STATE_DIR` environment variable
/// 2. Platform state directory + `/ummlink`
///
/// # Errors
///
/// Returns an error if no state or data directory can be determined.
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("UMMLINK_STATE_DIR")
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    // state_dir() is None on macOS/Windows
    let base = dirs::state_dir()
        .or_else(dirs::data_dir)
        .ok_or_else(|| Error::configuration("Could not determine state directory"))?;

    Ok(base.join("ummlink"))
}

/// Default location of the JSON state document.
pub fn state_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("state.json"))
}

/// Location of the settings file.
///
/// Resolution order:
/// 1. `UMMLINK_CONFIG` environment variable
/// 2. Platform config directory + `/ummlink/config.toml`
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined.
pub fn config_file() -> Result<PathBuf> {
    if let Ok(file) = std::env::var("UMMLINK_CONFIG")
        && !file.is_empty()
    {
        return Ok(PathBuf::from(file));
    }

    let base = dirs::config_dir()
        .ok_or_else(|| Error::configuration("Could not determine config directory"))?;

    Ok(base.join("ummlink").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_dir_default() {
        temp_env::with_var_unset("UMMLINK_STATE_DIR", || {
            let dir = state_dir().expect("state_dir should succeed");
            assert!(dir.ends_with("ummlink"), "Should end with ummlink: {:?}", dir);
        });
    }

    #[test]
    fn test_state_dir_override() {
        let test_dir = "/tmp/ummlink-test-state";
        temp_env::with_var("UMMLINK_STATE_DIR", Some(test_dir), || {
            let dir = state_dir().expect("state_dir should succeed");
            assert_eq!(dir, PathBuf::from(test_dir));
            assert_eq!(
                state_file().expect("state_file should succeed"),
                PathBuf::from(test_dir).join("state.json")
            );
        });
    }

    #[test]
    fn test_config_file_override() {
        temp_env::with_var("UMMLINK_CONFIG", Some("/tmp/ummlink.toml"), || {
            let file = config_file().expect("config_file should succeed");
            assert_eq!(file, PathBuf::from("/tmp/ummlink.toml"));
        });
    }

    #[test]
    fn test_config_file_default() {
        temp_env::with_var_unset("UMMLINK_CONFIG", || {
            let file = config_file().expect("config_file should succeed");
            assert!(file.ends_with("ummlink/config.toml"), "{:?}", file);
        });
    }
}
