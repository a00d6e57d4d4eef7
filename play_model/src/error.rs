//! Errors raised while loading play scripts.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or parse a play script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed script data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("play title must not be empty")]
    EmptyTitle,

    #[error("play title {0:?} is not a valid file name")]
    InvalidTitle(String),
}
