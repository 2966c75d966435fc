//! Read access to the OS registry.
//!
//! Only string values are ever read. Every failure mode (missing key,
//! missing value, wrong type, no registry on this OS) reads as `None`.

use std::collections::HashMap;
use std::process::Command;
use std::sync::Mutex;
use tracing::{debug, trace};

/// String-value lookup in a hierarchical key/value registry.
pub trait RegistryAccessor: Send + Sync {
    /// Value `name` under `hive\key`, or `None` if absent or empty.
    fn get(&self, hive: &str, key: &str, name: &str) -> Option<String>;
}

/// In-memory registry.
///
/// Lookups are case-insensitive on hive, key and value name, like the
/// Windows registry.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    values: Mutex<HashMap<(String, String, String), String>>,
}

fn entry_key(hive: &str, key: &str, name: &str) -> (String, String, String) {
    (
        hive.to_ascii_lowercase(),
        key.to_ascii_lowercase(),
        name.to_ascii_lowercase(),
    )
}

impl MemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryRegistry::set`].
    #[must_use]
    pub fn with_value(self, hive: &str, key: &str, name: &str, value: impl Into<String>) -> Self {
        self.set(hive, key, name, value);
        self
    }

    /// Set a value.
    pub fn set(&self, hive: &str, key: &str, name: &str, value: impl Into<String>) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(entry_key(hive, key, name), value.into());
        }
    }

    /// Remove a value.
    pub fn remove(&self, hive: &str, key: &str, name: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(&entry_key(hive, key, name));
        }
    }
}

impl RegistryAccessor for MemoryRegistry {
    fn get(&self, hive: &str, key: &str, name: &str) -> Option<String> {
        let values = self.values.lock().ok()?;
        values
            .get(&entry_key(hive, key, name))
            .filter(|v| !v.is_empty())
            .cloned()
    }
}

/// Reads the Windows registry through `reg query`.
///
/// `REG_EXPAND_SZ` data is returned as stored, without expanding
/// environment references.
#[derive(Debug, Clone)]
pub struct RegQueryRegistry {
    program: String,
}

impl Default for RegQueryRegistry {
    fn default() -> Self {
        Self {
            program: "reg".to_string(),
        }
    }
}

impl RegQueryRegistry {
    /// Create an accessor that runs the system `reg` tool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accessor that runs `program` instead of `reg`.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RegistryAccessor for RegQueryRegistry {
    fn get(&self, hive: &str, key: &str, name: &str) -> Option<String> {
        let full_key = format!(r"{hive}\{key}");
        debug!(key = %full_key, name, "Querying registry");

        let output = match Command::new(&self.program)
            .args(["query", &full_key, "/v", name])
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!(program = %self.program, error = %e, "Failed to run registry query");
                return None;
            }
        };

        // Missing keys and values exit non-zero
        if !output.status.success() {
            trace!(status = ?output.status, "Registry query found nothing");
            return None;
        }

        parse_reg_query(&String::from_utf8_lossy(&output.stdout), name)
    }
}

/// Extract the string data of value `name` from `reg query` output.
///
/// The relevant line looks like `    Path    REG_SZ    C:\Tools\UMM`.
fn parse_reg_query(output: &str, name: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| parse_value_line(line, name))
}

fn parse_value_line(line: &str, name: &str) -> Option<String> {
    let line = line.trim();
    let head = line.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }

    let rest = &line[name.len()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let (kind, data) = rest.trim_start().split_once(char::is_whitespace)?;
    if kind != "REG_SZ" && kind != "REG_EXPAND_SZ" {
        return None;
    }

    let data = data.trim();
    (!data.is_empty()).then(|| data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIVE: &str = "HKEY_CURRENT_USER";
    const KEY: &str = r"Software\UnityModManager";

    #[test]
    fn test_memory_registry_roundtrip() {
        let registry = MemoryRegistry::new().with_value(HIVE, KEY, "Path", r"C:\Tools\UMM");
        assert_eq!(
            registry.get(HIVE, KEY, "Path").as_deref(),
            Some(r"C:\Tools\UMM")
        );
        assert_eq!(
            registry
                .get("hkey_current_user", r"software\unitymodmanager", "path")
                .as_deref(),
            Some(r"C:\Tools\UMM")
        );

        registry.remove(HIVE, KEY, "Path");
        assert!(registry.get(HIVE, KEY, "Path").is_none());
    }

    #[test]
    fn test_memory_registry_empty_value_is_absent() {
        let registry = MemoryRegistry::new().with_value(HIVE, KEY, "Path", "");
        assert!(registry.get(HIVE, KEY, "Path").is_none());
    }

    #[test]
    fn test_parse_reg_sz() {
        let output = "\r\nHKEY_CURRENT_USER\\Software\\UnityModManager\r\n    Path    REG_SZ    C:\\Program Files\\UMM\r\n\r\n";
        assert_eq!(
            parse_reg_query(output, "Path").as_deref(),
            Some(r"C:\Program Files\UMM")
        );
    }

    #[test]
    fn test_parse_reg_expand_sz() {
        let output = "HKEY_CURRENT_USER\\Software\\UnityModManager\n    path    REG_EXPAND_SZ    %USERPROFILE%\\UMM\n";
        assert_eq!(
            parse_reg_query(output, "Path").as_deref(),
            Some(r"%USERPROFILE%\UMM")
        );
    }

    #[test]
    fn test_parse_ignores_other_types_and_names() {
        let output = "    Path    REG_DWORD    0x1\n    PathOld    REG_SZ    C:\\Old\n";
        assert!(parse_reg_query(output, "Path").is_none());
    }

    #[test]
    fn test_parse_empty_data() {
        assert!(parse_reg_query("    Path    REG_SZ    \n", "Path").is_none());
        assert!(parse_reg_query("", "Path").is_none());
    }

    #[test]
    fn test_missing_program_is_absent() {
        let registry = RegQueryRegistry::with_program("ummlink-no-such-reg-binary");
        assert!(registry.get(HIVE, KEY, "Path").is_none());
    }
}
