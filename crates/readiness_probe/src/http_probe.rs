//! HTTP implementation of [`ReadinessProbe`] backed by reqwest.

use crate::{ProbeError, ReadinessProbe};
use async_trait::async_trait;
use std::time::Duration;

/// Probes a vector store by listing its collections.
///
/// Any 2xx response counts as ready; the body is ignored.
#[derive(Clone, Debug)]
pub struct HttpReadinessProbe {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpReadinessProbe {
    /// Create a probe for the service rooted at `base_url`
    /// (e.g. "http://127.0.0.1:6333").
    pub fn new(base_url: &str) -> Self {
        // A hung probe must not stall the wait loop past its interval budget.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("reqwest client build should not fail");
        Self {
            endpoint: format!("{}/collections", base_url.trim_end_matches('/')),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReadinessProbe for HttpReadinessProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        let resp = self.client.get(&self.endpoint).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeError::NotReady(status.as_u16()));
        }
        Ok(())
    }
}
