use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or seeding a [`Corpus`](super::Corpus).
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("passage id must not be empty")]
    EmptyId,

    #[error("passage '{id}' has empty text")]
    EmptyText { id: String },

    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type CorpusResult<T> = Result<T, CorpusError>;
