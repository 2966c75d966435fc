//! Broadcast bus for lifecycle events.
//!
//! Every subscriber receives every event published after it subscribed.

use crate::event::{LifecycleEvent, LifecycleSignal};
use tokio::sync::broadcast;

/// Default channel capacity for the broadcast channel.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Multi-subscriber lifecycle bus.
#[derive(Debug, Clone)]
pub struct LifecycleBus {
    tx: broadcast::Sender<LifecycleEvent>,
}

impl LifecycleBus {
    /// Create a new bus.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a new bus with a specific broadcast capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish `signal` to all current subscribers.
    ///
    /// Returns the number of subscribers the event was delivered to.
    pub fn publish(&self, signal: LifecycleSignal) -> usize {
        let event = LifecycleEvent::new(signal);
        tracing::debug!(event_id = %event.id, signal = event.signal.name(), "Publishing lifecycle event");
        // Send only fails when nobody is subscribed
        self.tx.send(event).unwrap_or(0)
    }

    /// Publish [`LifecycleSignal::GameModeActivated`] for `target_id`.
    pub fn activate(&self, target_id: impl Into<String>) -> usize {
        self.publish(LifecycleSignal::GameModeActivated {
            target_id: target_id.into(),
        })
    }

    /// Publish [`LifecycleSignal::Shutdown`].
    pub fn shutdown(&self) -> usize {
        self.publish(LifecycleSignal::Shutdown)
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> LifecycleReceiver {
        LifecycleReceiver {
            inner: self.tx.subscribe(),
        }
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LifecycleBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver handle for a [`LifecycleBus`].
#[derive(Debug)]
pub struct LifecycleReceiver {
    inner: broadcast::Receiver<LifecycleEvent>,
}

impl LifecycleReceiver {
    /// Receive the next event.
    ///
    /// Returns `None` once every bus handle has been dropped.
    /// May skip events if the receiver falls behind.
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Lifecycle receiver lagged, skipped events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Try to receive an event without waiting.
    ///
    /// Returns `None` if no event is immediately available or the bus is closed.
    pub fn try_recv(&mut self) -> Option<LifecycleEvent> {
        loop {
            match self.inner.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Lifecycle receiver lagged, skipped events");
                }
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => {
                    return None;
                }
            }
        }
    }
}
