//! Parsed, not-yet-applied file contents.
//!
//! Parsers turn a file into one of these records without touching a graph.
//! Feature values stay keyed by their raw position so that names can be
//! resolved later, once every dictionary has been read.

use crate::kind::FileKind;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A line that was dropped because it could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

impl std::fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.reason)
    }
}

/// Contents of a `.edges` file.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    pub path: PathBuf,
    pub edges: Vec<(u64, u64)>,
    pub skipped: Vec<SkippedLine>,
}

/// One row of a `.feat` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub node: u64,
    /// Value at position `i` belongs to feature index `i`.
    pub values: Vec<i64>,
}

/// Contents of a `.feat` file.
#[derive(Debug, Clone, Default)]
pub struct FeatureRows {
    pub path: PathBuf,
    pub rows: Vec<FeatureRow>,
    pub skipped: Vec<SkippedLine>,
}

/// Contents of a `.egofeat` file.
#[derive(Debug, Clone, Default)]
pub struct EgoFeatures {
    pub path: PathBuf,
    pub ego: u64,
    pub values: Vec<i64>,
}

/// One line of a `.circles` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleLine {
    pub name: String,
    pub members: Vec<u64>,
}

/// Contents of a `.circles` file.
#[derive(Debug, Clone, Default)]
pub struct CircleList {
    pub path: PathBuf,
    pub circles: Vec<CircleLine>,
}

/// Contents of a `.featnames` file, in file order.
#[derive(Debug, Clone, Default)]
pub struct FeatureNames {
    pub path: PathBuf,
    pub entries: Vec<(usize, String)>,
}

/// Any parsed dataset file.
#[derive(Debug, Clone)]
pub enum ParsedFile {
    FeatureNames(FeatureNames),
    Edges(EdgeList),
    Features(FeatureRows),
    EgoFeatures(EgoFeatures),
    Circles(CircleList),
}

impl ParsedFile {
    pub fn kind(&self) -> FileKind {
        match self {
            Self::FeatureNames(_) => FileKind::FeatureNames,
            Self::Edges(_) => FileKind::Edges,
            Self::Features(_) => FileKind::Features,
            Self::EgoFeatures(_) => FileKind::EgoFeatures,
            Self::Circles(_) => FileKind::Circles,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::FeatureNames(f) => &f.path,
            Self::Edges(f) => &f.path,
            Self::Features(f) => &f.path,
            Self::EgoFeatures(f) => &f.path,
            Self::Circles(f) => &f.path,
        }
    }

    /// Lines dropped while parsing. Only edge and feature files skip lines.
    pub fn skipped(&self) -> &[SkippedLine] {
        match self {
            Self::Edges(f) => &f.skipped,
            Self::Features(f) => &f.skipped,
            _ => &[],
        }
    }
}
