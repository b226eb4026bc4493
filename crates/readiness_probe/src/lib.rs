//! Readiness probing for a locally launched service that exposes an HTTP
//! health surface, plus a cancellable fixed-interval wait loop.

use async_trait::async_trait;
use thiserror::Error;

pub mod config;
pub mod http_probe;
pub mod wait;

pub use config::ProbeConfig;
pub use http_probe::HttpReadinessProbe;
pub use wait::{WaitOutcome, WaitPolicy};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service responded with status {0}")]
    NotReady(u16),
    #[error("configuration error: {0}")]
    Config(String),
}

/// A single readiness check against a dependent service.
///
/// `Ok(())` means the service is up. Any error means "not ready yet" and is
/// retryable from the perspective of [`WaitPolicy::wait_until_ready`].
#[async_trait]
pub trait ReadinessProbe: Send + Sync + 'static {
    async fn check(&self) -> Result<(), ProbeError>;
}
