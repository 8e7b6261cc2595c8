//! pat-core: Environment bootstrap for the embedding pipeline
//!
//! This library resolves where the pragmatic-auto-translator project lives
//! (hosted notebook runtime or local checkout), derives the corpus and vector
//! directories, and checks that the bilingual corpus databases are in place.

pub mod consts;
pub mod download;
pub mod environment;
pub mod layout;
pub mod runtime;
pub mod settings;
pub mod structure;
pub mod verify;

pub use consts::*;
pub use download::{DownloadReport, Downloader};
pub use environment::{BaseDir, EnvironmentConfig};
pub use runtime::{Environment, ExecutionContext, HostedRuntime, LocalRuntime};
pub use settings::PipelineSettings;
pub use verify::{CorpusReport, verify_corpus_files};

#[derive(Debug, thiserror::Error)]
pub enum PatError {
    #[error("Storage mount failed: {0}")]
    Mount(String),

    #[error("Not supported in {0} context: {1}")]
    Unsupported(ExecutionContext, &'static str),

    #[error("Context mismatch: configuration is {config}, environment is {env}")]
    ContextMismatch {
        config: ExecutionContext,
        env: ExecutionContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PatError>;
