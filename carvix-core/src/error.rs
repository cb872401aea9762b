//! Error type shared by the stateful parts of carvix-core.
//!
//! The recommendation engine itself never fails; these errors come from
//! persistence and from the list screens' input validation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarvixError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl CarvixError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CarvixError::Validation(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CarvixError::NotFound { kind, id: id.into() }
    }
}

pub type Result<T, E = CarvixError> = std::result::Result<T, E>;
