//! egonet Core - dataset file formats
//!
//! An ego-network dataset is a flat directory of small text files, one group
//! of files per ego. This crate knows how to recognise each file and how to
//! turn it into a typed record. It never builds a graph itself; that is the
//! job of `egonet-graph`.
//!
//! # Example
//!
//! ```no_run
//! use egonet_core::{parse_file, ParsedFile};
//! use std::path::Path;
//!
//! if let Some(ParsedFile::Edges(list)) = parse_file(Path::new("facebook/0.edges"))? {
//!     println!("{} edges, {} skipped lines", list.edges.len(), list.skipped.len());
//! }
//! # Ok::<(), egonet_core::ParseError>(())
//! ```

mod error;
mod kind;
mod parser;
mod records;

pub use error::{ParseError, Result};
pub use kind::{ego_id_from_path, FileKind};
pub use parser::{
    parse_circles, parse_edges, parse_ego_features, parse_feature_names, parse_features,
    parse_file,
};
pub use records::{
    CircleLine, CircleList, EdgeList, EgoFeatures, FeatureNames, FeatureRow, FeatureRows,
    ParsedFile, SkippedLine,
};
