//! Detection of Unity Mod Manager installs made outside the managed install
//! flow.
//!
//! Unity Mod Manager can install itself. When it does, it records its
//! location in the OS registry. [`ExternalInstallProbe`] reads that value,
//! verifies the executable is really there and reconciles the tool record.
//! [`ProbeListener`] runs the probe every time a target's session starts.

mod fs;
mod listener;
mod probe;
mod registry;

pub use fs::{FileSystem, RealFileSystem};
pub use listener::ProbeListener;
pub use probe::{ExternalInstallProbe, ProbeOutcome, ProbeUnavailable};
pub use registry::{MemoryRegistry, RegQueryRegistry, RegistryAccessor};
