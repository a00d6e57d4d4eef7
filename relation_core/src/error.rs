//! Error types for relation processing and export.

use play_model::{SceneKey, ScriptError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from recording or reading back a temporal snapshot.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("scene {scene} captured after {previous}; scenes must be strictly increasing")]
    OutOfOrder { previous: SceneKey, scene: SceneKey },

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// Errors from loading pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors from running a play through the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error("GraphML error: {0}")]
    Graph(#[from] quick_xml::Error),

    #[error("failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Export {
            path: path.into(),
            source,
        }
    }
}
