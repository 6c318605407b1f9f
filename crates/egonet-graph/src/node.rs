//! Node attributes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Named feature values of a node, ordered by name.
pub type FeatureMap = BTreeMap<String, i64>;

/// A person in the social graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonNode {
    /// Dataset node id.
    pub id: u64,

    /// Named features, if any feature file mentioned this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureMap>,

    /// Names of the circles this node belongs to.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub circles: BTreeSet<String>,
}

impl PersonNode {
    /// Creates a bare node with no features and no circles.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            features: None,
            circles: BTreeSet::new(),
        }
    }

    /// Looks up a single feature value by name.
    pub fn feature(&self, name: &str) -> Option<i64> {
        self.features.as_ref()?.get(name).copied()
    }

    pub fn in_circle(&self, circle: &str) -> bool {
        self.circles.contains(circle)
    }
}
