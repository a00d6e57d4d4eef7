//! Pipeline configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Where and what the pipeline exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Root directory for all exports.
    pub output_dir: PathBuf,

    /// Snapshot JSON directory, relative to `output_dir`.
    pub snapshot_dir: PathBuf,

    /// GraphML directory, relative to `output_dir`.
    pub graph_dir: PathBuf,

    pub write_snapshots: bool,
    pub write_graphs: bool,

    /// Process independent plays on multiple threads.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            snapshot_dir: PathBuf::from("snapshots"),
            graph_dir: PathBuf::from("graphml"),
            write_snapshots: true,
            write_graphs: true,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_toml_str(&source),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Full snapshot export directory.
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join(&self.snapshot_dir)
    }

    /// Full GraphML export directory.
    pub fn graph_path(&self) -> PathBuf {
        self.output_dir.join(&self.graph_dir)
    }
}
