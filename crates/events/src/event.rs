//! Lifecycle event definitions.
//!
//! The host publishes one event each time something happens that ummlink
//! reacts to. Events carry an id and a timestamp so handlers can correlate
//! their log output with the signal that triggered it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the signal published when a target's session begins.
pub const GAMEMODE_ACTIVATED: &str = "gamemode-activated";

/// A lifecycle event with metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub signal: LifecycleSignal,
}

impl LifecycleEvent {
    /// Create a new event for `signal`.
    #[must_use]
    pub fn new(signal: LifecycleSignal) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            signal,
        }
    }
}

/// Lifecycle signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum LifecycleSignal {
    /// A target's session began.
    #[serde(rename = "gamemode-activated")]
    GameModeActivated {
        /// The activated target.
        target_id: String,
    },
    /// The host is shutting down; listeners should stop.
    Shutdown,
}

impl LifecycleSignal {
    /// Signal name as the host knows it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GameModeActivated { .. } => GAMEMODE_ACTIVATED,
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        let signal = LifecycleSignal::GameModeActivated {
            target_id: "dawnofman".into(),
        };
        assert_eq!(signal.name(), "gamemode-activated");
        assert_eq!(LifecycleSignal::Shutdown.name(), "shutdown");
    }

    #[test]
    fn test_events_get_unique_ids() {
        let a = LifecycleEvent::new(LifecycleSignal::Shutdown);
        let b = LifecycleEvent::new(LifecycleSignal::Shutdown);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_signal_serialization() {
        let signal = LifecycleSignal::GameModeActivated {
            target_id: "gardenpaws".into(),
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["event"], "gamemode-activated");
        assert_eq!(json["target_id"], "gardenpaws");
    }
}
