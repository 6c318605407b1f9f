//! Line parsers for the five dataset formats.
//!
//! Every format is whitespace separated and line oriented. Parsers work on
//! the file contents as a `&str` so they can be exercised without touching
//! the filesystem; [`parse_file`] is the path-based entry point.
//!
//! Two severities apply. Edge lists and feature files are noisy in the wild,
//! so a bad line there is recorded as a [`SkippedLine`] and parsing goes on.
//! Name dictionaries, ego vectors and circle files feed state that everything
//! else depends on, so a bad line there fails the whole file.

use crate::error::{ParseError, Result};
use crate::kind::{ego_id_from_path, FileKind};
use crate::records::{
    CircleLine, CircleList, EdgeList, EgoFeatures, FeatureNames, FeatureRow, FeatureRows,
    ParsedFile, SkippedLine,
};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Yields `(line_number, trimmed_line)` for every non-blank line.
fn content_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn skip(path: &Path, line: usize, reason: String) -> SkippedLine {
    warn!("Skipping malformed line {}:{}: {}", path.display(), line, reason);
    SkippedLine {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Formats
// ─────────────────────────────────────────────────────────────────────────────

/// Parses an edge list. Lines that are not exactly two node ids are skipped.
pub fn parse_edges(path: &Path, source: &str) -> EdgeList {
    let mut list = EdgeList {
        path: path.to_path_buf(),
        ..Default::default()
    };

    for (line_no, line) in content_lines(source) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            let reason = format!("expected 2 node ids, found {} tokens", parts.len());
            list.skipped.push(skip(path, line_no, reason));
            continue;
        }

        match (parts[0].parse::<u64>(), parts[1].parse::<u64>()) {
            (Ok(a), Ok(b)) => list.edges.push((a, b)),
            _ => {
                let reason = format!("`{}` is not a pair of node ids", line);
                list.skipped.push(skip(path, line_no, reason));
            }
        }
    }

    list
}

/// Parses a per-node feature file.
///
/// Each line is a node id followed by at least one value. Short lines and
/// lines with non-integer tokens are skipped.
pub fn parse_features(path: &Path, source: &str) -> FeatureRows {
    let mut rows = FeatureRows {
        path: path.to_path_buf(),
        ..Default::default()
    };

    for (line_no, line) in content_lines(source) {
        let mut parts = line.split_whitespace();
        let Some(first) = parts.next() else { continue };
        let rest: Vec<&str> = parts.collect();

        if rest.is_empty() {
            let reason = "expected a node id followed by feature values".to_string();
            rows.skipped.push(skip(path, line_no, reason));
            continue;
        }

        let Ok(node) = first.parse::<u64>() else {
            let reason = format!("`{}` is not a node id", first);
            rows.skipped.push(skip(path, line_no, reason));
            continue;
        };

        match parse_values(&rest) {
            Ok(values) => rows.rows.push(FeatureRow { node, values }),
            Err(bad) => {
                let reason = format!("`{}` is not an integer feature value", bad);
                rows.skipped.push(skip(path, line_no, reason));
            }
        }
    }

    rows
}

/// Parses an ego feature file for `ego`.
///
/// Only the first non-blank line is read. An empty file yields an empty
/// vector; a non-integer value is fatal.
pub fn parse_ego_features(path: &Path, source: &str, ego: u64) -> Result<EgoFeatures> {
    let mut lines = content_lines(source);

    let values = match lines.next() {
        Some((line_no, line)) => {
            let parts: Vec<&str> = line.split_whitespace().collect();
            parse_values(&parts).map_err(|bad| {
                ParseError::malformed(
                    path,
                    line_no,
                    format!("`{}` is not an integer feature value", bad),
                )
            })?
        }
        None => Vec::new(),
    };

    let extra = lines.count();
    if extra > 0 {
        warn!(
            "Ignoring {} extra line(s) in ego feature file {}",
            extra,
            path.display()
        );
    }

    Ok(EgoFeatures {
        path: path.to_path_buf(),
        ego,
        values,
    })
}

/// Parses a circle membership file.
///
/// Each line is a circle name followed by member ids. A member that is not a
/// node id fails the whole file, so callers never see a partial circle.
pub fn parse_circles(path: &Path, source: &str) -> Result<CircleList> {
    let mut list = CircleList {
        path: path.to_path_buf(),
        ..Default::default()
    };

    for (line_no, line) in content_lines(source) {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else { continue };

        let members = parts
            .map(|token| {
                token.parse::<u64>().map_err(|_| {
                    ParseError::malformed(
                        path,
                        line_no,
                        format!("circle `{}` member `{}` is not a node id", name, token),
                    )
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        list.circles.push(CircleLine {
            name: name.to_string(),
            members,
        });
    }

    Ok(list)
}

/// Parses a feature-name dictionary.
///
/// Each line is an index, a whitespace run, then a description that may
/// itself contain whitespace.
pub fn parse_feature_names(path: &Path, source: &str) -> Result<FeatureNames> {
    let mut names = FeatureNames {
        path: path.to_path_buf(),
        ..Default::default()
    };

    for (line_no, line) in content_lines(source) {
        let Some((index, description)) = line.split_once(char::is_whitespace) else {
            return Err(ParseError::malformed(
                path,
                line_no,
                "expected `<index> <description>`",
            ));
        };

        let index = index.parse::<usize>().map_err(|_| {
            ParseError::malformed(
                path,
                line_no,
                format!("`{}` is not a feature index", index),
            )
        })?;

        let description = description.trim_start();
        if description.is_empty() {
            return Err(ParseError::malformed(
                path,
                line_no,
                "expected `<index> <description>`",
            ));
        }

        names.entries.push((index, description.to_string()));
    }

    Ok(names)
}

/// Parses every token as an integer, returning the first offending token.
fn parse_values<'a>(tokens: &[&'a str]) -> std::result::Result<Vec<i64>, &'a str> {
    tokens
        .iter()
        .map(|token| token.parse::<i64>().map_err(|_| *token))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Reads and parses a file according to its extension.
///
/// Returns `Ok(None)` for files that are not part of a dataset.
pub fn parse_file(path: &Path) -> Result<Option<ParsedFile>> {
    let Some(kind) = FileKind::from_path(path) else {
        return Ok(None);
    };

    debug!("Parsing {} as {}", path.display(), kind);

    let parsed = match kind {
        FileKind::FeatureNames => {
            ParsedFile::FeatureNames(parse_feature_names(path, &read_source(path)?)?)
        }
        FileKind::Edges => ParsedFile::Edges(parse_edges(path, &read_source(path)?)),
        FileKind::Features => ParsedFile::Features(parse_features(path, &read_source(path)?)),
        FileKind::EgoFeatures => {
            // A misnamed ego file fails before it is read.
            let ego = ego_id_from_path(path)?;
            ParsedFile::EgoFeatures(parse_ego_features(path, &read_source(path)?, ego)?)
        }
        FileKind::Circles => ParsedFile::Circles(parse_circles(path, &read_source(path)?)?),
    };

    Ok(Some(parsed))
}
