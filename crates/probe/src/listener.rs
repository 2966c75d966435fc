//! Runs the probe on every session start.

use tokio::task::JoinHandle;
use tracing::{debug, warn};
use ummlink_events::{LifecycleBus, LifecycleReceiver, LifecycleSignal};

use crate::probe::ExternalInstallProbe;

/// Single subscription that drives [`ExternalInstallProbe`].
///
/// Each probe runs on the blocking thread pool.
///
/// Probe failures are logged and never end the loop. The listener stops on
/// [`LifecycleSignal::Shutdown`] or once the bus is gone.
#[derive(Debug)]
pub struct ProbeListener {
    probe: ExternalInstallProbe,
    receiver: LifecycleReceiver,
}

impl ProbeListener {
    /// Subscribe `probe` to `bus`.
    ///
    /// Only events published after this call are seen.
    #[must_use]
    pub fn new(probe: ExternalInstallProbe, bus: &LifecycleBus) -> Self {
        Self {
            probe,
            receiver: bus.subscribe(),
        }
    }

    /// Handle events until shutdown. Returns the number of activations
    /// handled.
    pub async fn run(mut self) -> usize {
        let mut handled = 0;

        while let Some(event) = self.receiver.recv().await {
            match event.signal {
                LifecycleSignal::GameModeActivated { target_id } => {
                    handled += 1;
                    // Registry queries and store I/O block
                    let probe = self.probe.clone();
                    let target = target_id.clone();
                    match tokio::task::spawn_blocking(move || probe.probe(&target)).await {
                        Ok(Ok(outcome)) => {
                            debug!(event_id = %event.id, %target_id, ?outcome, "Probe finished");
                        }
                        Ok(Err(e)) => {
                            warn!(event_id = %event.id, %target_id, error = %e, "Probe failed to update tool record");
                        }
                        Err(e) => {
                            warn!(event_id = %event.id, %target_id, error = %e, "Probe task did not complete");
                        }
                    }
                }
                LifecycleSignal::Shutdown => {
                    debug!("Lifecycle shutdown, stopping probe listener");
                    return handled;
                }
            }
        }

        debug!("Lifecycle bus closed, stopping probe listener");
        handled
    }

    /// Run the listener on the current tokio runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(self.run())
    }
}
