//! Graph builder for constructing the social graph from a dataset directory.
//!
//! The builder classifies each file by extension, parses it, and applies it
//! to one shared [`SocialGraph`]. By default it works in two passes:
//! 1. Parse every file (optionally in parallel) into raw records
//! 2. Apply the records in a fixed order, name dictionaries first
//!
//! so feature names never depend on the order the filesystem lists files.
//! [`IngestOrder::Listing`] keeps the single-pass behaviour where each file
//! is applied as soon as it is read.

use crate::config::{BuildConfig, IngestOrder};
use crate::error::BuildError;
use crate::graph::{GraphStats, SocialGraph};
use egonet_core::{parse_file, FileKind, ParsedFile, SkippedLine};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Summary of a finished build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Number of files applied, per kind.
    pub files: BTreeMap<FileKind, usize>,

    /// Files that are not part of a dataset.
    pub files_ignored: usize,

    /// Lines dropped from edge and feature files.
    pub skipped_lines: Vec<SkippedLine>,

    #[serde(flatten)]
    pub stats: GraphStats,

    pub duration_ms: u64,
}

impl BuildReport {
    /// Total number of dataset files applied.
    pub fn files_applied(&self) -> usize {
        self.files.values().sum()
    }
}

impl std::fmt::Display for BuildReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total number of nodes: {}", self.stats.node_count)?;
        write!(f, "Total number of edges: {}", self.stats.edge_count)
    }
}

/// A built graph together with its report.
#[derive(Debug)]
pub struct BuildResult {
    pub graph: SocialGraph,
    pub report: BuildReport,
}

/// Builds a [`SocialGraph`] from dataset files.
///
/// Feed it files with [`add_file`](Self::add_file) or
/// [`add_files`](Self::add_files), then call [`build`](Self::build). A fatal
/// parse error is returned from the `add_*` call and poisons the builder:
/// later `add_*` calls and [`build`](Self::build) fail with
/// [`BuildError::Aborted`], since the graph may hold part of the dataset.
pub struct GraphBuilder {
    graph: SocialGraph,
    poisoned: Option<String>,
    config: BuildConfig,
    files: BTreeMap<FileKind, usize>,
    files_ignored: usize,
    skipped_lines: Vec<SkippedLine>,
    started: Instant,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a builder with the default config.
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            graph: SocialGraph::new(),
            poisoned: None,
            config,
            files: BTreeMap::new(),
            files_ignored: 0,
            skipped_lines: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Applies an already parsed file.
    pub fn apply(&mut self, parsed: &ParsedFile) {
        self.skipped_lines.extend_from_slice(parsed.skipped());
        *self.files.entry(parsed.kind()).or_default() += 1;
        self.graph.ingest(parsed, self.config.feature_mode);
    }

    /// Parses and immediately applies one file.
    ///
    /// Returns the file's kind, or `None` if the file was ignored.
    pub fn add_file(&mut self, path: &Path) -> Result<Option<FileKind>, BuildError> {
        self.check_poisoned()?;
        let parsed = parse_file(path).map_err(|err| self.poison(err.into()))?;
        match parsed {
            Some(parsed) => {
                let kind = parsed.kind();
                self.apply(&parsed);
                Ok(Some(kind))
            }
            None => {
                debug!("Ignoring {}", path.display());
                self.files_ignored += 1;
                Ok(None)
            }
        }
    }

    /// Adds a batch of files according to the configured [`IngestOrder`].
    pub fn add_files(&mut self, paths: &[PathBuf]) -> Result<(), BuildError> {
        self.check_poisoned()?;
        match self.config.order {
            IngestOrder::Listing => {
                for path in paths {
                    self.add_file(path)?;
                }
            }
            IngestOrder::Deferred => {
                let parsed = self.parse_all(paths).map_err(|err| self.poison(err))?;
                for parsed in parsed {
                    self.apply(&parsed);
                }
            }
        }
        Ok(())
    }

    fn poison(&mut self, err: BuildError) -> BuildError {
        self.poisoned = Some(err.to_string());
        err
    }

    fn check_poisoned(&self) -> Result<(), BuildError> {
        match &self.poisoned {
            Some(reason) => Err(BuildError::Aborted(reason.clone())),
            None => Ok(()),
        }
    }

    /// First pass of a deferred build: parse everything, then sort into
    /// apply order.
    fn parse_all(&mut self, paths: &[PathBuf]) -> Result<Vec<ParsedFile>, BuildError> {
        let (mut dataset, ignored): (Vec<&PathBuf>, Vec<&PathBuf>) = paths
            .iter()
            .partition(|path| FileKind::from_path(path).is_some());
        dataset.sort();

        for path in &ignored {
            debug!("Ignoring {}", path.display());
        }
        self.files_ignored += ignored.len();

        // Collect every outcome before failing so the reported error is the
        // first in path order, not the first to finish.
        let outcomes: Vec<_> = if self.config.parallel {
            dataset.par_iter().map(|path| parse_file(path)).collect()
        } else {
            dataset.iter().map(|path| parse_file(path)).collect()
        };

        let mut parsed = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            parsed.extend(outcome?);
        }
        parsed.sort_by(|a, b| {
            a.kind()
                .cmp(&b.kind())
                .then_with(|| a.path().cmp(b.path()))
        });
        Ok(parsed)
    }

    /// Finishes building and returns the graph with its report.
    ///
    /// Fails with [`BuildError::Aborted`] if an earlier `add_*` call failed.
    pub fn build(self) -> Result<BuildResult, BuildError> {
        self.check_poisoned()?;
        let stats = self.graph.stats();
        let duration_ms = self.started.elapsed().as_millis() as u64;

        info!(
            "Built graph with {} nodes and {} edges from {} files in {}ms",
            stats.node_count,
            stats.edge_count,
            self.files.values().sum::<usize>(),
            duration_ms
        );

        Ok(BuildResult {
            graph: self.graph,
            report: BuildReport {
                files: self.files,
                files_ignored: self.files_ignored,
                skipped_lines: self.skipped_lines,
                stats,
                duration_ms,
            },
        })
    }
}

/// Lists the regular files directly inside `dir`, in filesystem order.
pub fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let to_error = |source: std::io::Error| BuildError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_error)? {
        let path = entry.map_err(to_error)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Builds a graph from the given files.
pub fn build_files(paths: &[PathBuf], config: &BuildConfig) -> Result<BuildResult, BuildError> {
    let mut builder = GraphBuilder::with_config(config.clone());
    builder.add_files(paths)?;
    builder.build()
}

/// Builds a graph from every dataset file in `dir`.
pub fn build_directory(dir: &Path, config: &BuildConfig) -> Result<BuildResult, BuildError> {
    info!("Building graph from {} ({:?} order)", dir.display(), config.order);
    let paths = list_directory(dir)?;
    build_files(&paths, config)
}
