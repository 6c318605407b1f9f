//! Applying parsed dataset files to a graph.
//!
//! Each method takes a record produced by `egonet-core` and mutates the
//! graph in place. Feature names are resolved against the registry at the
//! moment a record is applied, which is why the builder applies name
//! dictionaries before anything that carries feature vectors.

use crate::circles::CircleMembership;
use crate::graph::SocialGraph;
use crate::node::FeatureMap;
use crate::registry::FeatureNameRegistry;
use egonet_core::{CircleList, EdgeList, EgoFeatures, FeatureNames, FeatureRows, ParsedFile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a feature row combines with a feature map the node already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMode {
    /// Replace the existing map wholesale.
    #[default]
    Overwrite,

    /// Keep the larger of the existing and incoming value per key, treating
    /// a missing existing value as 0. Keys only present on the existing side
    /// are dropped.
    Merge,
}

/// Names a raw feature vector against the registry.
pub fn name_features(registry: &FeatureNameRegistry, values: &[i64]) -> FeatureMap {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| (registry.resolve(i).into_owned(), *value))
        .collect()
}

/// Combines `incoming` with `existing` according to `mode`.
pub fn combine_features(
    existing: Option<FeatureMap>,
    incoming: FeatureMap,
    mode: FeatureMode,
) -> FeatureMap {
    match mode {
        FeatureMode::Overwrite => incoming,
        FeatureMode::Merge => {
            let current = existing.unwrap_or_default();
            incoming
                .into_iter()
                .map(|(key, value)| {
                    let previous = current.get(&key).copied().unwrap_or(0);
                    (key, previous.max(value))
                })
                .collect()
        }
    }
}

impl SocialGraph {
    /// Adds every entry of a name dictionary to the registry.
    ///
    /// Returns the number of new names; indexes that already have a name
    /// keep it.
    pub fn ingest_feature_names(&mut self, names: &FeatureNames) -> usize {
        let added = self.registry.extend(names.entries.iter().cloned());
        debug!(
            "Registered {} of {} feature names from {}",
            added,
            names.entries.len(),
            names.path.display()
        );
        added
    }

    /// Adds the edges of an edge list. Returns the number of new edges.
    pub fn ingest_edges(&mut self, list: &EdgeList) -> usize {
        let mut added = 0;
        for &(a, b) in &list.edges {
            if self.add_edge(a, b) {
                added += 1;
            }
        }
        debug!(
            "Added {} edges from {} ({} skipped lines)",
            added,
            list.path.display(),
            list.skipped.len()
        );
        added
    }

    /// Attaches a named feature map to every node in a feature file.
    ///
    /// Returns the number of rows applied.
    pub fn ingest_features(&mut self, rows: &FeatureRows, mode: FeatureMode) -> usize {
        for row in &rows.rows {
            let named = name_features(&self.registry, &row.values);
            self.set_features(row.node, named, mode);
        }
        debug!(
            "Applied {} feature rows from {} ({:?})",
            rows.rows.len(),
            rows.path.display(),
            mode
        );
        rows.rows.len()
    }

    /// Replaces the ego node's feature map with the ego vector.
    pub fn ingest_ego_features(&mut self, ego: &EgoFeatures) {
        let named = name_features(&self.registry, &ego.values);
        self.set_features(ego.ego, named, FeatureMode::Overwrite);
        debug!(
            "Applied {} ego features to node {} from {}",
            ego.values.len(),
            ego.ego,
            ego.path.display()
        );
    }

    /// Adds circle memberships and returns the mapping found in this file.
    ///
    /// Members are added to both the node's own circle set and the graph-wide
    /// circle index; neither is cleared first, so memberships from several
    /// files accumulate.
    pub fn ingest_circles(&mut self, list: &CircleList) -> CircleMembership {
        let mut membership = CircleMembership::default();

        for circle in &list.circles {
            self.circles.ensure(&circle.name);
            let members = membership
                .circle_to_nodes
                .entry(circle.name.clone())
                .or_default();

            for &id in &circle.members {
                members.insert(id);
                membership
                    .node_to_circles
                    .entry(id)
                    .or_default()
                    .insert(circle.name.clone());

                self.ensure_node(id);
                if let Some(node) = self.node_mut(id) {
                    node.circles.insert(circle.name.clone());
                }
                self.circles.add_member(&circle.name, id);
            }
        }

        debug!(
            "Applied {} circles covering {} nodes from {}",
            membership.circle_to_nodes.len(),
            membership.node_to_circles.len(),
            list.path.display()
        );
        membership
    }

    /// Applies any parsed file. `mode` only affects `.feat` files.
    pub fn ingest(&mut self, parsed: &ParsedFile, mode: FeatureMode) {
        match parsed {
            ParsedFile::FeatureNames(names) => {
                self.ingest_feature_names(names);
            }
            ParsedFile::Edges(list) => {
                self.ingest_edges(list);
            }
            ParsedFile::Features(rows) => {
                self.ingest_features(rows, mode);
            }
            ParsedFile::EgoFeatures(ego) => self.ingest_ego_features(ego),
            ParsedFile::Circles(list) => {
                self.ingest_circles(list);
            }
        }
    }

    fn set_features(&mut self, id: u64, incoming: FeatureMap, mode: FeatureMode) {
        self.ensure_node(id);
        if let Some(node) = self.node_mut(id) {
            let existing = node.features.take();
            node.features = Some(combine_features(existing, incoming, mode));
        }
    }
}
