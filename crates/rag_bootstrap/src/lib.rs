//! Boot sequence for a local RAG stack: fetch the dataset, start the vector
//! store, wait for it to come up, then hand off to the backend.

use thiserror::Error;

pub mod command;
pub mod config;
pub mod sequencer;

pub use command::{ChildHandle, CommandSpec, ProcessRunner, TokioProcessRunner};
pub use config::BootstrapConfig;
pub use sequencer::Sequencer;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset fetch exited with status {code}")]
    FetchFailed { code: i32 },
    #[error("vector store exited before becoming ready (status {code:?})")]
    DependencyExited { code: Option<i32> },
    #[error("vector store not ready after {attempts} attempts, deadline elapsed")]
    ReadinessTimeout { attempts: u32 },
    #[error("bootstrap cancelled")]
    Cancelled,
    #[error("configuration error: {0}")]
    Config(String),
}

impl BootstrapError {
    /// Process exit code the sequencer should terminate with. A failed fetch
    /// propagates its own status; everything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::FetchFailed { code } => *code,
            _ => 1,
        }
    }
}
