//! Error types for the ummlink core.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for ummlink core operations.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// An install plan was requested for a payload that has no anchor file.
    ///
    /// The installer test hook gates `install`, so this means an upstream
    /// invariant was broken.
    #[error("No {anchor} found in payload of {payload_len} file(s)")]
    #[diagnostic(
        code(ummlink::installer::anchor_not_found),
        help("Only call install for payloads the installer test accepted")
    )]
    AnchorNotFound {
        /// Anchor file name that was searched for
        anchor: &'static str,
        /// Number of paths in the payload
        payload_len: usize,
    },

    /// Reading from the configuration store failed
    #[error("Failed to read configuration store: {message}")]
    #[diagnostic(code(ummlink::store::read))]
    StoreRead {
        /// The error message from the store
        message: String,
    },

    /// Writing to the configuration store failed
    #[error("Failed to write configuration store: {message}")]
    #[diagnostic(code(ummlink::store::write))]
    StoreWrite {
        /// The error message from the store
        message: String,
    },

    /// No install root is configured for a target
    #[error("No install path configured for target '{target_id}'")]
    #[diagnostic(
        code(ummlink::store::install_root_missing),
        help("Record one with `ummlink set-install-path <target> <dir>`")
    )]
    InstallRootMissing {
        /// The target identifier
        target_id: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    #[diagnostic(code(ummlink::config::invalid))]
    Configuration {
        /// The error message describing the configuration issue
        message: String,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(ummlink::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<Path>>,
        /// Description of the operation that failed
        operation: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(code(ummlink::serialization))]
    Serialization {
        /// The error message describing the serialization issue
        message: String,
    },
}

impl Error {
    /// Create an anchor-not-found error for a payload of the given size
    #[must_use]
    pub fn anchor_not_found(payload_len: usize) -> Self {
        Self::AnchorNotFound {
            anchor: crate::anchor::ANCHOR_FILE,
            payload_len,
        }
    }

    /// Create a store read error
    pub fn store_read(message: impl Into<String>) -> Self {
        Self::StoreRead {
            message: message.into(),
        }
    }

    /// Create a store write error
    pub fn store_write(message: impl Into<String>) -> Self {
        Self::StoreWrite {
            message: message.into(),
        }
    }

    /// Create an install-root-missing error
    pub fn install_root_missing(target_id: impl Into<String>) -> Self {
        Self::InstallRootMissing {
            target_id: target_id.into(),
        }
    }

    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(PathBuf::into_boxed_path),
            operation: operation.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Result type for ummlink core operations
pub type Result<T> = std::result::Result<T, Error>;
