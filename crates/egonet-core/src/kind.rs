//! File kinds recognised in a dataset directory.
//!
//! A dataset is a flat directory of per-ego files. The extension decides
//! how a file is parsed; anything we don't recognise is ignored.

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The kind of an input file, decided by its extension.
///
/// Variants are declared in the order their contents are applied to a
/// graph during a deferred build, so sorting by kind yields the apply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `.featnames`: feature index to description dictionary.
    FeatureNames,

    /// `.edges`: one undirected edge per line.
    Edges,

    /// `.feat`: one node id followed by its feature vector per line.
    Features,

    /// `.egofeat`: a single feature vector for the ego node.
    EgoFeatures,

    /// `.circles`: circle name followed by its member ids per line.
    Circles,
}

impl FileKind {
    /// All kinds, in apply order.
    pub const ALL: [FileKind; 5] = [
        FileKind::FeatureNames,
        FileKind::Edges,
        FileKind::Features,
        FileKind::EgoFeatures,
        FileKind::Circles,
    ];

    /// Classifies a bare extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "featnames" => Some(Self::FeatureNames),
            "edges" => Some(Self::Edges),
            "feat" => Some(Self::Features),
            "egofeat" => Some(Self::EgoFeatures),
            "circles" => Some(Self::Circles),
            _ => None,
        }
    }

    /// Classifies a path by its final extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// The extension this kind is recognised by.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::FeatureNames => "featnames",
            Self::Edges => "edges",
            Self::Features => "feat",
            Self::EgoFeatures => "egofeat",
            Self::Circles => "circles",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FeatureNames => "feature_names",
            Self::Edges => "edges",
            Self::Features => "features",
            Self::EgoFeatures => "ego_features",
            Self::Circles => "circles",
        };
        write!(f, "{}", s)
    }
}

/// Derives the ego node id from a file name.
///
/// The id is the part of the file name before the first `.`, so both
/// `107.egofeat` and `107.tar.egofeat` belong to ego `107`.
pub fn ego_id_from_path(path: &Path) -> Result<u64> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();

    stem.parse::<u64>().map_err(|_| ParseError::InvalidEgoId {
        path: path.to_path_buf(),
        stem: stem.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(FileKind::from_path(Path::new("0.edges")), Some(FileKind::Edges));
        assert_eq!(FileKind::from_path(Path::new("0.feat")), Some(FileKind::Features));
        assert_eq!(
            FileKind::from_path(Path::new("data/0.egofeat")),
            Some(FileKind::EgoFeatures)
        );
        assert_eq!(FileKind::from_path(Path::new("0.circles")), Some(FileKind::Circles));
        assert_eq!(
            FileKind::from_path(Path::new("0.featnames")),
            Some(FileKind::FeatureNames)
        );
        assert_eq!(FileKind::from_path(Path::new("README.md")), None);
        assert_eq!(FileKind::from_path(Path::new("edges")), None);
    }

    #[test]
    fn test_kinds_sort_into_apply_order() {
        let mut kinds = vec![
            FileKind::Circles,
            FileKind::Features,
            FileKind::FeatureNames,
            FileKind::EgoFeatures,
            FileKind::Edges,
        ];
        kinds.sort();
        assert_eq!(kinds, FileKind::ALL.to_vec());
    }

    #[test]
    fn test_ego_id_from_path() {
        assert_eq!(ego_id_from_path(Path::new("dir/107.egofeat")).unwrap(), 107);
        assert_eq!(ego_id_from_path(Path::new("3437.tar.egofeat")).unwrap(), 3437);

        let err = ego_id_from_path(&PathBuf::from("ego.egofeat")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidEgoId { ref stem, .. } if stem == "ego"));
    }
}
