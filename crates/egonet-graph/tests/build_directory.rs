use egonet_graph::{build_directory, build_files, BuildConfig, FeatureMode, IngestOrder};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const NAMES: &str = "0 birthday;anonymized feature 0\n\
                     1 education;school;id;anonymized feature 1\n\
                     2 gender;anonymized feature 2\n";

fn write_dataset(dir: &Path) {
    fs::write(dir.join("0.edges"), "1 2\n1 3\n2 3\n3 4\n5 6\n").unwrap();
    fs::write(dir.join("0.featnames"), NAMES).unwrap();
    fs::write(
        dir.join("0.feat"),
        "1 1 0 0\n2 0 1 0\n3 0 0 1\n4 1 1 0\n5 0 1 1\n6 1 1 1\n",
    )
    .unwrap();
    fs::write(dir.join("0.circles"), "circle0 1 2 3\ncircle1 4 5\n").unwrap();
    fs::write(dir.join("README"), "ignored").unwrap();
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_end_to_end_build() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());

    let result = build_directory(dir.path(), &BuildConfig::default()).unwrap();
    let graph = &result.graph;

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(result.report.stats.node_count, 6);
    assert_eq!(result.report.stats.edge_count, 5);
    assert_eq!(result.report.files_applied(), 4);
    assert_eq!(result.report.files_ignored, 1);
    assert!(result.report.skipped_lines.is_empty());

    let expected_keys = names(&[
        "birthday;anonymized feature 0",
        "education;school;id;anonymized feature 1",
        "gender;anonymized feature 2",
    ]);
    for node in graph.nodes() {
        let features = node.features.as_ref().expect("every node has features");
        let keys: BTreeSet<String> = features.keys().cloned().collect();
        assert_eq!(keys, expected_keys, "node {}", node.id);
    }
    assert_eq!(
        graph.node(6).unwrap().feature("gender;anonymized feature 2"),
        Some(1)
    );

    assert_eq!(graph.node(3).unwrap().circles, names(&["circle0"]));
    assert_eq!(graph.node(4).unwrap().circles, names(&["circle1"]));
    assert!(graph.node(6).unwrap().circles.is_empty());
    assert_eq!(
        graph.circles().members("circle1").unwrap(),
        &[4, 5].into_iter().collect::<BTreeSet<u64>>()
    );
}

#[test]
fn test_dictionary_order_changes_keys_in_listing_mode() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());
    let featnames = dir.path().join("0.featnames");
    let feat = dir.path().join("0.feat");
    let config = BuildConfig::default().with_order(IngestOrder::Listing);

    let first = build_files(&[featnames.clone(), feat.clone()], &config).unwrap();
    let last = build_files(&[feat, featnames], &config).unwrap();

    let keys = |graph: &egonet_graph::SocialGraph| -> BTreeSet<String> {
        graph.node(1).unwrap().features.as_ref().unwrap().keys().cloned().collect()
    };
    assert_ne!(keys(&first.graph), keys(&last.graph));
    assert_eq!(
        keys(&last.graph),
        names(&["feature_0", "feature_1", "feature_2"])
    );
    // The dictionary still lands in the registry, it just came too late.
    assert_eq!(last.graph.registry().len(), 3);
}

#[test]
fn test_merge_mode_across_feature_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("0.featnames"), "0 a\n1 b\n2 c\n").unwrap();
    fs::write(dir.path().join("0.feat"), "1 2 0\n").unwrap();
    fs::write(dir.path().join("1.feat"), "1 1 5 3\n").unwrap();

    let merge = BuildConfig::default().with_feature_mode(FeatureMode::Merge);
    let merged = build_directory(dir.path(), &merge).unwrap();
    let node = merged.graph.node(1).unwrap();
    assert_eq!(node.feature("a"), Some(2));
    assert_eq!(node.feature("b"), Some(5));
    assert_eq!(node.feature("c"), Some(3));

    let overwritten = build_directory(dir.path(), &BuildConfig::default()).unwrap();
    let node = overwritten.graph.node(1).unwrap();
    assert_eq!(node.feature("a"), Some(1));
    assert_eq!(node.feature("b"), Some(5));
    assert_eq!(node.feature("c"), Some(3));
}

#[test]
fn test_ego_feature_file_creates_isolated_node() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("0.featnames"), "0 a\n1 b\n").unwrap();
    fs::write(dir.path().join("42.egofeat"), "1 0\n").unwrap();

    let result = build_directory(dir.path(), &BuildConfig::default()).unwrap();

    assert_eq!(result.graph.node_count(), 1);
    assert_eq!(result.graph.degree(42), Some(0));
    assert_eq!(result.graph.node(42).unwrap().feature("a"), Some(1));
}
