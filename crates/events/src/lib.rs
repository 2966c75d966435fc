//! Lifecycle signals for ummlink.
//!
//! The host publishes [`LifecycleSignal`]s on a [`LifecycleBus`]; ummlink
//! subscribes once per signal handler.
//!
//! ```rust,ignore
//! use ummlink_events::LifecycleBus;
//!
//! let bus = LifecycleBus::new();
//! let mut receiver = bus.subscribe();
//! bus.activate("dawnofman");
//! let event = receiver.recv().await;
//! ```

pub mod bus;
pub mod event;

pub use bus::{LifecycleBus, LifecycleReceiver};
pub use event::{GAMEMODE_ACTIVATED, LifecycleEvent, LifecycleSignal};
