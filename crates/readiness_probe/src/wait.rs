//! Fixed-interval polling until a probe reports ready, with cancellation and
//! an optional deadline.

use crate::ReadinessProbe;
use std::time::Duration;
use tokio::sync::watch;

/// Polling policy: one probe attempt every `interval`, with an optional
/// overall `timeout` measured from the start of the wait.
#[derive(Clone, Debug)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub timeout: Option<Duration>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: None,
        }
    }
}

/// Terminal state of a readiness wait. `attempts` counts probe calls issued.
#[derive(Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready { attempts: u32 },
    TimedOut { attempts: u32 },
    Cancelled { attempts: u32 },
}

impl WaitPolicy {
    /// Poll `probe` until it succeeds, the deadline elapses, or `cancel_rx`
    /// flips to `true`.
    ///
    /// Probe failures are logged and retried; they never escape this loop.
    /// Without a timeout the wait is unbounded, so callers that launched the
    /// probed service themselves should race this future against the
    /// service's exit.
    pub async fn wait_until_ready(
        &self,
        probe: &dyn ReadinessProbe,
        mut cancel_rx: watch::Receiver<bool>,
    ) -> WaitOutcome {
        let deadline = self.timeout.map(|t| tokio::time::Instant::now() + t);
        let mut attempts = 0u32;
        loop {
            if *cancel_rx.borrow() {
                return WaitOutcome::Cancelled { attempts };
            }
            attempts += 1;
            match probe.check().await {
                Ok(()) => return WaitOutcome::Ready { attempts },
                Err(e) => {
                    tracing::info!(attempt = attempts, error = %e, "dependency not ready, retrying");
                }
            }
            if let Some(deadline) = deadline {
                // The next attempt would land past the deadline.
                if tokio::time::Instant::now() + self.interval >= deadline {
                    tokio::time::sleep_until(deadline).await;
                    return WaitOutcome::TimedOut { attempts };
                }
            }
            tokio::select! {
                biased;
                changed = cancel_rx.changed() => {
                    match changed {
                        Ok(()) => {
                            if *cancel_rx.borrow() {
                                return WaitOutcome::Cancelled { attempts };
                            }
                        }
                        // Sender gone: no cancellation can arrive anymore.
                        Err(_) => tokio::time::sleep(self.interval).await,
                    }
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
