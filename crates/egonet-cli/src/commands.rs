//! CLI command implementations.

use colored::Colorize;
use egonet_graph::{
    build_directory, BuildConfig, BuildResult, FeatureMap, FeatureMode, IngestOrder,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Build options collected from the command line.
pub struct BuildOptions {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub order: Option<IngestOrder>,
    pub merge_features: bool,
    pub sequential: bool,
}

/// Loads the config file, if any, and applies flag overrides.
fn resolve_config(opts: &BuildOptions) -> Result<BuildConfig> {
    let mut config = match &opts.config {
        Some(path) => BuildConfig::from_json_file(path)?,
        None => BuildConfig::default(),
    };

    if let Some(order) = opts.order {
        config.order = order;
    }
    if opts.merge_features {
        config.feature_mode = FeatureMode::Merge;
    }
    if opts.sequential {
        config.parallel = false;
    }

    debug!("Resolved build config: {:?}", config);
    Ok(config)
}

fn build_graph(opts: &BuildOptions) -> Result<BuildResult> {
    let config = resolve_config(opts)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Reading {}...", opts.path.display()));

    let result = build_directory(&opts.path, &config);
    spinner.finish_and_clear();

    Ok(result?)
}

/// Build the graph and print the report.
pub fn build(opts: &BuildOptions, json: bool) -> Result<()> {
    let result = build_graph(opts)?;
    let report = &result.report;

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{} Built graph from {} files in {}ms",
        "✓".green(),
        report.files_applied().to_string().cyan(),
        report.duration_ms
    );
    println!("{}", report);

    for (kind, count) in &report.files {
        println!("  {} {}", format!("{}:", kind).dimmed(), count);
    }
    println!("  {} {}", "circles:".dimmed(), report.stats.circle_count);
    println!("  {} {}", "feature names:".dimmed(), report.stats.feature_names);

    if !report.skipped_lines.is_empty() {
        println!("\n{} {} malformed lines skipped:", "⚠".yellow(), report.skipped_lines.len());
        for skipped in report.skipped_lines.iter().take(5) {
            println!("  {}", skipped.to_string().red());
        }
        if report.skipped_lines.len() > 5 {
            println!("  ... and {} more", report.skipped_lines.len() - 5);
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct NodeView<'a> {
    id: u64,
    degree: usize,
    neighbors: Vec<u64>,
    features: Option<&'a FeatureMap>,
    circles: &'a BTreeSet<String>,
}

/// Show a single node.
pub fn node(opts: &BuildOptions, id: u64, json: bool) -> Result<()> {
    let result = build_graph(opts)?;
    let graph = &result.graph;

    let Some(node) = graph.node(id) else {
        return Err(format!("node {} not found in {}", id, opts.path.display()).into());
    };

    let neighbors = graph.neighbors(id);
    let view = NodeView {
        id,
        degree: neighbors.len(),
        neighbors,
        features: node.features.as_ref(),
        circles: &node.circles,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} {}", "Node".cyan().bold(), id.to_string().cyan().bold());
    println!("  {} {}", "Degree:".dimmed(), view.degree);

    match view.features {
        Some(features) => {
            let active = features.values().filter(|v| **v != 0).count();
            println!(
                "  {} {} ({} non-zero)",
                "Features:".dimmed(),
                features.len(),
                active
            );
            for (name, value) in features.iter().filter(|(_, v)| **v != 0) {
                println!("    {} = {}", name, value);
            }
        }
        None => println!("  {} none", "Features:".dimmed()),
    }

    if view.circles.is_empty() {
        println!("  {} none", "Circles:".dimmed());
    } else {
        let circles: Vec<&str> = view.circles.iter().map(String::as_str).collect();
        println!("  {} {}", "Circles:".dimmed(), circles.join(", "));
    }

    Ok(())
}

/// List circles with their sizes.
pub fn circles(opts: &BuildOptions, json: bool) -> Result<()> {
    let result = build_graph(opts)?;
    let circles = result.graph.circles();

    if json {
        println!("{}", serde_json::to_string_pretty(circles)?);
        return Ok(());
    }

    if circles.is_empty() {
        println!("No circles found in {}", opts.path.display());
        return Ok(());
    }

    println!("Found {} circles:\n", circles.len());
    for (name, members) in circles.iter() {
        println!("  {} {}", name.cyan(), format!("({} members)", members.len()).dimmed());
    }

    Ok(())
}

/// List the feature name registry.
pub fn names(opts: &BuildOptions) -> Result<()> {
    let result = build_graph(opts)?;
    let registry = result.graph.registry();

    if registry.is_empty() {
        println!(
            "No feature names in {}; features use positional keys",
            opts.path.display()
        );
        return Ok(());
    }

    for (index, name) in registry.iter() {
        println!("  {} {}", format!("{:>4}", index).yellow(), name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn options(config: Option<PathBuf>) -> BuildOptions {
        BuildOptions {
            path: PathBuf::from("."),
            config,
            order: None,
            merge_features: false,
            sequential: false,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("egonet.json");
        fs::write(&path, r#"{ "order": "listing", "parallel": true }"#).unwrap();

        let mut opts = options(Some(path));
        opts.merge_features = true;
        opts.sequential = true;

        let config = resolve_config(&opts).unwrap();
        assert_eq!(config.order, IngestOrder::Listing);
        assert_eq!(config.feature_mode, FeatureMode::Merge);
        assert!(!config.parallel);
    }

    #[test]
    fn test_defaults_without_config() {
        let config = resolve_config(&options(None)).unwrap();
        assert_eq!(config, BuildConfig::default());
    }
}
