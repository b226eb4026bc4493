use crate::BootstrapError;
use crate::command::CommandSpec;
use readiness_probe::ProbeConfig;

/// Everything the sequencer needs, read from the environment.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    /// Synchronous dataset-fetch step; non-zero exit aborts the sequence.
    pub fetch: CommandSpec,
    /// Vector store server, spawned in the background.
    pub vector_store: CommandSpec,
    /// The RAG backend, run in the foreground once the store is ready.
    pub app: CommandSpec,
    pub probe: ProbeConfig,
}

impl BootstrapConfig {
    pub fn from_env() -> Result<Self, BootstrapError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never mutate the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, BootstrapError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let fetch = require_command(&mut get, "RAG_BOOTSTRAP_FETCH_CMD")?;
        let vector_store = require_command(&mut get, "RAG_BOOTSTRAP_VECTOR_STORE_CMD")?;
        let app = require_command(&mut get, "RAG_BOOTSTRAP_APP_CMD")?;
        let probe = ProbeConfig::from_env_with(&mut get)
            .map_err(|e| BootstrapError::Config(e.to_string()))?;
        Ok(Self {
            fetch,
            vector_store,
            app,
            probe,
        })
    }
}

fn require_command<F>(get: &mut F, key: &str) -> Result<CommandSpec, BootstrapError>
where
    F: FnMut(&str) -> Option<String>,
{
    let raw = get(key).ok_or_else(|| BootstrapError::Config(format!("{key} missing")))?;
    CommandSpec::parse(&raw).map_err(|_| BootstrapError::Config(format!("{key} must name a program")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn full_env(k: &str) -> Option<String> {
        match k {
            "RAG_BOOTSTRAP_FETCH_CMD" => Some("sh scripts/fetch_dataset.sh".into()),
            "RAG_BOOTSTRAP_VECTOR_STORE_CMD" => Some("qdrant".into()),
            "RAG_BOOTSTRAP_APP_CMD" => Some("uv run start-backend".into()),
            "RAG_BOOTSTRAP_PROBE_INTERVAL_SECS" => Some("10".into()),
            _ => None,
        }
    }

    #[test]
    fn from_env_reads_all_three_commands() {
        let cfg = BootstrapConfig::from_env_with(full_env).expect("cfg");
        assert_eq!(cfg.fetch.program, "sh");
        assert_eq!(cfg.vector_store.program, "qdrant");
        assert_eq!(cfg.app.to_string(), "uv run start-backend");
        assert_eq!(cfg.probe.interval, Duration::from_secs(10));
    }

    #[test]
    fn missing_fetch_command_is_an_error() {
        let get = |k: &str| {
            if k == "RAG_BOOTSTRAP_FETCH_CMD" {
                None
            } else {
                full_env(k)
            }
        };
        let err = BootstrapConfig::from_env_with(get).expect_err("missing fetch");
        assert!(err.to_string().contains("RAG_BOOTSTRAP_FETCH_CMD"));
    }

    #[test]
    fn blank_app_command_is_an_error() {
        let get = |k: &str| {
            if k == "RAG_BOOTSTRAP_APP_CMD" {
                Some("   ".into())
            } else {
                full_env(k)
            }
        };
        assert!(BootstrapConfig::from_env_with(get).is_err());
    }

    #[test]
    fn probe_parse_errors_surface_as_config_errors() {
        let get = |k: &str| {
            if k == "RAG_BOOTSTRAP_PROBE_INTERVAL_SECS" {
                Some("eventually".into())
            } else {
                full_env(k)
            }
        };
        let err = BootstrapConfig::from_env_with(get).expect_err("bad interval");
        assert!(matches!(err, BootstrapError::Config(_)));
    }
}
