//! egonet Graph - attributed social graph construction
//!
//! This crate turns an ego-network dataset directory into a single
//! [`SocialGraph`]: undirected friendship edges between people, a named
//! feature map on every person that has one, and the circles each person
//! belongs to.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with additional structures for:
//! - Dataset id to node lookups
//! - The graph-wide feature name registry
//! - Circle name to member lookups
//!
//! Parsing lives in `egonet-core`; this crate applies parsed records and
//! orchestrates whole-directory builds.
//!
//! # Example
//!
//! ```no_run
//! use egonet_graph::{build_directory, BuildConfig};
//! use std::path::Path;
//!
//! let result = build_directory(Path::new("facebook"), &BuildConfig::default())?;
//! println!("{}", result.report);
//!
//! if let Some(ego) = result.graph.node(0) {
//!     println!("ego 0 is in {} circles", ego.circles.len());
//! }
//! # Ok::<(), egonet_graph::BuildError>(())
//! ```

mod builder;
mod circles;
mod config;
mod error;
mod graph;
mod ingest;
mod node;
mod registry;

pub use builder::{
    build_directory, build_files, list_directory, BuildReport, BuildResult, GraphBuilder,
};
pub use circles::{CircleIndex, CircleMembership};
pub use config::{BuildConfig, IngestOrder};
pub use error::BuildError;
pub use graph::{GraphStats, SocialGraph};
pub use ingest::{combine_features, name_features, FeatureMode};
pub use node::{FeatureMap, PersonNode};
pub use registry::{fallback_name, FeatureNameRegistry};
