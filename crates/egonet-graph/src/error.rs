//! Errors raised while building a graph.

use egonet_core::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a build. The partially built graph is discarded.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to list {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("build aborted by an earlier error: {0}")]
    Aborted(String),
}
