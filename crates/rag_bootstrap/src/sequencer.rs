//! The four-step boot sequence with a supervised readiness wait.
//!
//! `START → DOWNLOADING → LAUNCHING_DEP → POLLING → RUNNING_APP`, strictly
//! linear. The only loop is the readiness poll, and unlike the shell-era
//! version of this procedure the vector store child is supervised: if it
//! exits while we are still polling, the wait is cancelled instead of
//! spinning forever against a dead port.

use crate::BootstrapError;
use crate::command::ProcessRunner;
use crate::config::BootstrapConfig;
use readiness_probe::{ReadinessProbe, WaitOutcome};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

pub struct Sequencer {
    config: BootstrapConfig,
    runner: Arc<dyn ProcessRunner>,
    probe: Arc<dyn ReadinessProbe>,
}

impl Sequencer {
    pub fn new(
        config: BootstrapConfig,
        runner: Arc<dyn ProcessRunner>,
        probe: Arc<dyn ReadinessProbe>,
    ) -> Self {
        Self {
            config,
            runner,
            probe,
        }
    }

    /// Run the sequence to completion and return the backend's exit code.
    ///
    /// `cancel_rx` aborts the readiness wait when it flips to `true`; the
    /// vector store child is killed before the error is returned. Once the
    /// backend is running, the sequencer's lifetime is the backend's
    /// lifetime and cancellation no longer applies.
    pub async fn run(&self, cancel_rx: watch::Receiver<bool>) -> Result<i32, BootstrapError> {
        info!(command = %self.config.fetch, "fetching dataset");
        let status = self.runner.run(&self.config.fetch).await?;
        if !status.success() {
            return Err(BootstrapError::FetchFailed {
                code: status.code().unwrap_or(1),
            });
        }

        info!(command = %self.config.vector_store, "starting vector store");
        let mut child = self.runner.spawn(&self.config.vector_store).await?;

        let policy = self.config.probe.wait_policy();
        let wait = policy.wait_until_ready(self.probe.as_ref(), cancel_rx);
        tokio::pin!(wait);
        let outcome = tokio::select! {
            status = child.wait() => {
                let status = status?;
                return Err(BootstrapError::DependencyExited {
                    code: status.code(),
                });
            }
            outcome = &mut wait => outcome,
        };

        match outcome {
            WaitOutcome::Ready { attempts } => {
                info!(attempts, "vector store ready");
            }
            WaitOutcome::TimedOut { attempts } => {
                warn!(attempts, "vector store never became ready, stopping it");
                child.kill().await?;
                return Err(BootstrapError::ReadinessTimeout { attempts });
            }
            WaitOutcome::Cancelled { .. } => {
                child.kill().await?;
                return Err(BootstrapError::Cancelled);
            }
        }

        info!(command = %self.config.app, "starting backend");
        let status = self.runner.run(&self.config.app).await?;
        Ok(status.code().unwrap_or(1))
    }
}
