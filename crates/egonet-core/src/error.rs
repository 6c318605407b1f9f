//! Error types for dataset parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the parsers.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A fatal problem with an input file.
///
/// Recoverable problems (a bad line in an edge list or a feature file) are
/// not errors; they show up as [`SkippedLine`](crate::SkippedLine) entries
/// on the parsed record instead.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{}: ego id `{stem}` is not a non-negative integer", path.display())]
    InvalidEgoId { path: PathBuf, stem: String },
}

impl ParseError {
    pub(crate) fn malformed(path: &std::path::Path, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Malformed { path, .. } | Self::InvalidEgoId { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_file_and_line() {
        let err = ParseError::malformed(std::path::Path::new("0.circles"), 3, "bad member");
        assert_eq!(err.to_string(), "0.circles:3: bad member");
        assert_eq!(err.path(), std::path::Path::new("0.circles"));
    }
}
