//! Filesystem presence checks used to verify a recorded install.

use std::path::Path;

/// Filesystem presence check.
pub trait FileSystem: Send + Sync {
    /// Returns true if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_exists() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("UnityModManager.exe");
        assert!(!RealFileSystem.exists(&file));

        std::fs::write(&file, b"").unwrap();
        assert!(RealFileSystem.exists(&file));
    }
}
