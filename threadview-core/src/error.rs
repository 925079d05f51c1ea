use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThreadviewError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("archive file is empty: {path}")]
    EmptyArchiveFile { path: PathBuf },

    #[error("archive file is not valid UTF-8: {path}")]
    NonUtf8ArchiveFile { path: PathBuf },

    #[error("invalid archive {path}: {reason}")]
    InvalidArchive { path: PathBuf, reason: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ThreadviewError>;
