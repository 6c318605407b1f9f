//! Build configuration.

use crate::error::BuildError;
use crate::ingest::FeatureMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// When parsed files are applied to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestOrder {
    /// Parse everything first, then apply by kind: feature names, edges,
    /// feature files, ego feature files, circles. Files of the same kind are
    /// applied in path order. Feature names never depend on listing order.
    /// If several files fail to parse, the first failure in path order is
    /// reported.
    #[default]
    Deferred,

    /// Parse and apply each file in the order it is given (for a directory,
    /// the order the filesystem lists it). Feature files applied before the
    /// name dictionary keep positional `feature_<i>` keys.
    Listing,
}

/// Options for building a graph from a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub order: IngestOrder,

    /// How `.feat` rows combine with existing feature maps.
    pub feature_mode: FeatureMode,

    /// Parse files on the rayon pool before applying them. Only used with
    /// [`IngestOrder::Deferred`]; application is always single threaded.
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            order: IngestOrder::Deferred,
            feature_mode: FeatureMode::Overwrite,
            parallel: true,
        }
    }
}

impl BuildConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, BuildError> {
        let text = fs::read_to_string(path).map_err(|source| BuildError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| BuildError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_order(mut self, order: IngestOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_feature_mode(mut self, mode: FeatureMode) -> Self {
        self.feature_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("egonet.json");
        fs::write(&path, r#"{ "feature_mode": "merge" }"#).unwrap();

        let config = BuildConfig::from_json_file(&path).unwrap();
        assert_eq!(config.feature_mode, FeatureMode::Merge);
        assert_eq!(config.order, IngestOrder::Deferred);
        assert!(config.parallel);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("egonet.json");
        fs::write(&path, r#"{ "order": "random" }"#).unwrap();

        let err = BuildConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
    }
}
