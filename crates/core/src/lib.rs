//! Core of ummlink: detection, install planning and tool-record
//! reconciliation for Unity Mod Manager distributions.
//!
//! # Overview
//!
//! - [`anchor`] - the single anchor-file predicate every component shares
//! - [`targets`] - targets the integration is active for
//! - [`installer`] - installer hook pair: payload test and copy plan
//! - [`tools`] - tool records and their reconciliation
//! - [`modtype`] - deployment category for Unity Mod Manager itself
//! - [`store`] - configuration store contract and implementations
//! - [`context`] - registration with the host
//!
//! The host's configuration store is injected everywhere it is needed;
//! nothing here holds a process-wide handle to the host.

pub mod anchor;
pub mod config;
pub mod context;
pub mod installer;
pub mod modtype;
pub mod paths;
pub mod store;
pub mod targets;
pub mod tools;

mod error;

pub use error::{Error, Result};
