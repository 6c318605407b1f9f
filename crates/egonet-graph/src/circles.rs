//! Circle membership bookkeeping.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Graph-wide circle name to member ids index.
///
/// Circle names are not namespaced by the file they came from, so two ego
/// networks that both define `circle0` end up sharing one member set.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CircleIndex {
    members: BTreeMap<String, BTreeSet<u64>>,
}

impl CircleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a circle, even if it ends up with no members.
    pub fn ensure(&mut self, circle: &str) {
        if !self.members.contains_key(circle) {
            self.members.insert(circle.to_string(), BTreeSet::new());
        }
    }

    pub fn add_member(&mut self, circle: &str, node: u64) {
        self.ensure(circle);
        if let Some(set) = self.members.get_mut(circle) {
            set.insert(node);
        }
    }

    /// Members of a circle, if the circle exists.
    pub fn members(&self, circle: &str) -> Option<&BTreeSet<u64>> {
        self.members.get(circle)
    }

    /// Iterates circles in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<u64>)> {
        self.members.iter().map(|(name, set)| (name.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Both directions of the membership found in one circle file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CircleMembership {
    pub node_to_circles: BTreeMap<u64, BTreeSet<String>>,
    pub circle_to_nodes: BTreeMap<String, BTreeSet<u64>>,
}
