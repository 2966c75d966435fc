use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::tracing::{LogLevel, TracingFormat};

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Store, install or I/O error exit code
pub const EXIT_RUNTIME: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "ummlink")]
#[command(about = "Install, detect and register Unity Mod Manager for supported games")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (defaults to $UMMLINK_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "pretty",
        value_enum
    )]
    pub format: TracingFormat,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Check whether a payload is a Unity Mod Manager distribution")]
    Test {
        /// Target (game) id
        target: String,
        /// Payload paths, relative to the archive root
        #[arg(required = true)]
        paths: Vec<String>,
    },
    #[command(about = "Plan the install of a payload and register the tool")]
    Install {
        /// Target (game) id
        target: String,
        /// Staging directory the payload is deployed from
        destination: PathBuf,
        /// Payload paths, relative to the archive root
        #[arg(required = true)]
        paths: Vec<String>,
    },
    #[command(about = "Check whether an instruction list deploys Unity Mod Manager")]
    Classify {
        /// JSON file holding an instruction array or an install result
        instructions: PathBuf,
    },
    #[command(about = "Detect a Unity Mod Manager install recorded in the registry")]
    Probe {
        /// Target (game) id
        target: String,
    },
    #[command(about = "List the tools registered for a target")]
    Tools {
        /// Target (game) id
        target: String,
    },
    #[command(about = "Record the mod install root for a target")]
    SetInstallPath {
        /// Target (game) id
        target: String,
        /// Install root directory
        dir: PathBuf,
    },
}

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(ummlink::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Store, install or I/O error (exit code 3)
    #[error("{message}")]
    #[diagnostic(code(ummlink::cli::runtime))]
    Runtime {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new runtime error
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new runtime error with help text
    #[must_use]
    pub fn runtime_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Convert `ummlink_core::Error` to the matching `CliError` variant.
///
/// - Settings problems and missing install roots -> Config (exit code 2)
/// - Store, I/O, serialization and plan errors -> Runtime (exit code 3)
impl From<ummlink_core::Error> for CliError {
    fn from(err: ummlink_core::Error) -> Self {
        use ummlink_core::Error;

        match err {
            // Extract just the message to avoid "Configuration error: Configuration error:"
            Error::Configuration { message } => Self::config(message),
            Error::InstallRootMissing { ref target_id } => Self::Config {
                help: Some(format!(
                    "Record one with `ummlink set-install-path {target_id} <dir>`"
                )),
                message: err.to_string(),
            },
            Error::AnchorNotFound { .. } => Self::runtime_with_help(
                err.to_string(),
                "Run `ummlink test` first; only accepted payloads can be installed",
            ),
            Error::Io {
                source,
                path,
                operation,
            } => {
                let path_str = path
                    .as_ref()
                    .map_or(String::new(), |p| format!(" on {}", p.display()));
                Self::runtime_with_help(
                    format!("I/O {operation} failed{path_str}: {source}"),
                    "Check file permissions and ensure the path exists",
                )
            }
            Error::StoreRead { .. } | Error::StoreWrite { .. } | Error::Serialization { .. } => {
                Self::runtime(err.to_string())
            }
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Runtime { .. } => EXIT_RUNTIME,
    }
}

/// Render an error with miette on stderr.
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
    let _ = io::stderr().flush();
}

/// Success response envelope for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success
    pub status: &'static str,
    /// The actual data payload
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
