//! Registered tool records.
//!
//! # Architecture
//!
//! - [`ToolRecord`] - One registered tool, as the host persists it
//! - [`ToolsTable`] - Tools of one target, keyed by id
//! - [`ToolRegistry`] - Idempotent, drift-aware upsert of the Unity Mod
//!   Manager record
//! - [`Reconciliation`] - Which branch a reconciliation took
//!
//! # Example
//!
//! ```ignore
//! use ummlink_core::store::MemoryStore;
//! use ummlink_core::tools::{ToolRegistry, DEFAULT_TOOL_ID};
//!
//! let registry = ToolRegistry::new(Arc::new(MemoryStore::new()));
//! registry.reconcile(Path::new("/mods/umm"), "dawnofman", DEFAULT_TOOL_ID)?;
//! ```

mod record;
mod registry;

pub use record::{DEFAULT_TOOL_ID, TOOL_LOGO, TOOL_NAME, ToolRecord, ToolsTable};
pub use registry::{Reconciliation, ToolRegistry};
