use crate::ProbeError;
use crate::wait::WaitPolicy;
use std::time::Duration;

/// Default vector store address (qdrant's REST port).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:6333";

const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Where and how often to probe the vector store.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    pub base_url: String,
    pub interval: Duration,
    /// `None` preserves the historical behavior of waiting forever.
    pub timeout: Option<Duration>,
}

impl ProbeConfig {
    pub fn from_env() -> Result<Self, ProbeError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ProbeError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url =
            get("RAG_BOOTSTRAP_VECTOR_STORE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let interval_secs = match get("RAG_BOOTSTRAP_PROBE_INTERVAL_SECS") {
            Some(raw) => parse_secs("RAG_BOOTSTRAP_PROBE_INTERVAL_SECS", &raw)?,
            None => DEFAULT_INTERVAL_SECS,
        };
        if interval_secs == 0 {
            return Err(ProbeError::Config(
                "RAG_BOOTSTRAP_PROBE_INTERVAL_SECS must be positive".into(),
            ));
        }
        let timeout = match get("RAG_BOOTSTRAP_READY_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_secs(
                "RAG_BOOTSTRAP_READY_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };
        Ok(Self {
            base_url,
            interval: Duration::from_secs(interval_secs),
            timeout,
        })
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            interval: self.interval,
            timeout: self.timeout,
        }
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, ProbeError> {
    raw.parse::<u64>().map_err(|_| {
        ProbeError::Config(format!(
            "{key} must be a whole number of seconds, got {raw:?}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let cfg = ProbeConfig::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.interval, Duration::from_secs(10));
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "RAG_BOOTSTRAP_VECTOR_STORE_URL" => Some("http://localhost:7000".into()),
            "RAG_BOOTSTRAP_PROBE_INTERVAL_SECS" => Some("3".into()),
            "RAG_BOOTSTRAP_READY_TIMEOUT_SECS" => Some("120".into()),
            _ => None,
        };
        let cfg = ProbeConfig::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://localhost:7000");
        assert_eq!(cfg.interval, Duration::from_secs(3));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let get = |k: &str| match k {
            "RAG_BOOTSTRAP_PROBE_INTERVAL_SECS" => Some("soon".into()),
            _ => None,
        };
        assert!(ProbeConfig::from_env_with(get).is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let get = |k: &str| match k {
            "RAG_BOOTSTRAP_PROBE_INTERVAL_SECS" => Some("0".into()),
            _ => None,
        };
        assert!(ProbeConfig::from_env_with(get).is_err());
    }

    #[test]
    fn wait_policy_carries_interval_and_timeout() {
        let cfg = ProbeConfig {
            base_url: DEFAULT_BASE_URL.into(),
            interval: Duration::from_secs(5),
            timeout: Some(Duration::from_secs(30)),
        };
        let policy = cfg.wait_policy();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.timeout, Some(Duration::from_secs(30)));
    }
}
