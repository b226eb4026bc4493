use rag_bootstrap::{BootstrapConfig, Sequencer, TokioProcessRunner};
use readiness_probe::HttpReadinessProbe;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from env var `RAG_BOOTSTRAP_LOG_LEVEL` (or fallback
    // to `RUST_LOG`, default `info`).
    let log_env = std::env::var("RAG_BOOTSTRAP_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let config = match BootstrapConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration; aborting startup");
            std::process::exit(1);
        }
    };

    let probe: Arc<HttpReadinessProbe> = Arc::new(HttpReadinessProbe::new(&config.probe.base_url));
    info!(endpoint = probe.endpoint(), "vector store readiness endpoint");

    // Ctrl-C cancels the readiness wait; once the backend is in the
    // foreground its own signal handling takes over.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let sequencer = Sequencer::new(config, Arc::new(TokioProcessRunner), probe);
    match sequencer.run(cancel_rx).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "bootstrap failed");
            std::process::exit(e.exit_code());
        }
    }
}
