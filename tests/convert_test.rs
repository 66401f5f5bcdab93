use std::fs;
use std::path::Path;

use gexf_convert::convert::{convert, ConvertConfig};
use gexf_convert::graph::AttrValue;
use gexf_convert::graph_io::gexf_io::parse_gexf;
use gexf_convert::graph_io::graphml_io::parse_graphml;
use tempfile::TempDir;

const TWO_NODES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="name" attr.type="string"/>
  <graph edgedefault="directed">
    <node id="n0"><data key="d0">first</data></node>
    <node id="n1"><data key="d0">second</data></node>
    <edge source="n0" target="n1"/>
  </graph>
</graphml>"#;

const TYPED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="label" for="node" attr.name="label" attr.type="string"/>
  <key id="pages" for="node" attr.name="pages" attr.type="long">
    <default>1</default>
  </key>
  <key id="seed" for="node" attr.name="seed" attr.type="boolean"/>
  <key id="w" for="edge" attr.name="weight" attr.type="double"/>
  <graph edgedefault="undirected">
    <node id="example.org"><data key="label">Example &lt;home&gt;</data><data key="pages">42</data><data key="seed">true</data></node>
    <node id="example.net"><data key="pages">0</data></node>
    <node id="lonely"/>
    <edge id="link" source="example.org" target="example.net"><data key="w">1.25</data></edge>
    <edge source="example.net" target="example.org" directed="true"/>
  </graph>
</graphml>"#;

fn setup(dir: &TempDir) -> ConvertConfig {
    let config = ConvertConfig {
        source_dir: dir.path().join("OUT"),
        dest_dir: dir.path().join("GEXF"),
        ..Default::default()
    };
    fs::create_dir(&config.source_dir).unwrap();
    config
}

fn dir_names(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn converts_only_graphml_files() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    fs::write(config.source_dir.join("A.graphml"), TWO_NODES).unwrap();
    fs::write(config.source_dir.join("B.txt"), "not a graph").unwrap();

    let report = convert(&config).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(dir_names(&config.dest_dir), vec!["A.gexf"]);
    assert_eq!(
        fs::read_to_string(config.source_dir.join("B.txt")).unwrap(),
        "not a graph"
    );

    let gexf = parse_gexf(&fs::read_to_string(config.dest_dir.join("A.gexf")).unwrap()).unwrap();
    assert_eq!(gexf.node_count(), 2);
    assert_eq!(gexf.edge_count(), 1);
    assert_eq!(
        gexf.get_node("n1").unwrap().attributes.get("name"),
        Some(&AttrValue::String("second".to_string()))
    );
}

#[test]
fn gexf_keeps_nodes_edges_and_attribute_values() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    fs::write(config.source_dir.join("typed.graphml"), TYPED).unwrap();

    let report = convert(&config).unwrap();
    assert!(report.is_success());

    let original = parse_graphml(TYPED).unwrap();
    let content = fs::read_to_string(config.dest_dir.join("typed.gexf")).unwrap();
    let converted = parse_gexf(&content).unwrap();

    assert_eq!(converted.directed, original.directed);
    assert_eq!(converted.nodes, original.nodes);
    assert_eq!(converted.edge_count(), original.edge_count());
    for (before, after) in original.edges.iter().zip(&converted.edges) {
        assert_eq!(after.source, before.source);
        assert_eq!(after.target, before.target);
        assert_eq!(after.directed, before.directed);
        assert_eq!(after.attributes, before.attributes);
    }
    assert_eq!(converted.edges[0].id.as_deref(), Some("link"));
    assert_eq!(
        converted.node_keys.get("pages").unwrap().default,
        Some(AttrValue::Integer(1))
    );
}

#[test]
fn rerun_overwrites_existing_results() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    fs::write(config.source_dir.join("A.graphml"), TWO_NODES).unwrap();
    fs::create_dir(&config.dest_dir).unwrap();
    fs::write(config.dest_dir.join("A.gexf"), "stale").unwrap();
    fs::write(config.dest_dir.join("keep.gexf"), "untouched").unwrap();

    let first = convert(&config).unwrap();
    let second = convert(&config).unwrap();

    assert!(first.is_success() && second.is_success());
    let content = fs::read_to_string(config.dest_dir.join("A.gexf")).unwrap();
    assert!(content.contains("<gexf"));
    assert_eq!(
        fs::read_to_string(config.dest_dir.join("keep.gexf")).unwrap(),
        "untouched"
    );
}

#[test]
fn missing_destination_is_created_with_parents() {
    let dir = TempDir::new().unwrap();
    let mut config = setup(&dir);
    config.dest_dir = dir.path().join("nested").join("GEXF");
    fs::write(config.source_dir.join("A.graphml"), TWO_NODES).unwrap();

    let report = convert(&config).unwrap();

    assert_eq!(report.converted, vec![config.dest_dir.join("A.gexf")]);
    assert!(config.dest_dir.join("A.gexf").is_file());
}

#[test]
fn missing_source_reports_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = ConvertConfig {
        source_dir: dir.path().join("absent"),
        dest_dir: dir.path().join("GEXF"),
        ..Default::default()
    };

    let err = convert(&config).unwrap_err();

    assert!(err.to_string().contains("Cannot list source directory"));
    assert!(err.to_string().contains("absent"));
    assert!(!config.dest_dir.exists());
}

#[test]
fn malformed_file_does_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    fs::write(config.source_dir.join("broken.graphml"), "<graphml><graph><node").unwrap();
    fs::write(config.source_dir.join("A.graphml"), TWO_NODES).unwrap();
    fs::write(config.source_dir.join("typed.graphml"), TYPED).unwrap();

    let report = convert(&config).unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].file, config.source_dir.join("broken.graphml"));
    assert_eq!(report.failures[0].stage, "parse");
    assert_eq!(dir_names(&config.dest_dir), vec!["A.gexf", "typed.gexf"]);
}

#[test]
fn result_names_strip_only_the_final_suffix() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    fs::write(config.source_dir.join("x.graphml.graphml"), TWO_NODES).unwrap();
    fs::write(config.source_dir.join("ab.graphml"), TWO_NODES).unwrap();

    let report = convert(&config).unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(dir_names(&config.dest_dir), vec!["ab.gexf", "x.graphml.gexf"]);
}

#[test]
fn empty_source_directory_succeeds_without_output() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);

    let report = convert(&config).unwrap();

    assert!(report.is_success());
    assert_eq!(report.succeeded(), 0);
    assert!(!config.dest_dir.exists());
}

#[test]
fn keys_sharing_a_name_with_different_types_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    fs::write(
        config.source_dir.join("mixed.graphml"),
        r#"<graphml>
  <key id="a" for="node" attr.name="score" attr.type="int"/>
  <key id="b" for="node" attr.name="score" attr.type="string"/>
  <graph>
    <node id="n1"><data key="a">3</data></node>
    <node id="n2"><data key="b">high</data></node>
    <edge source="n1" target="n2"/>
    <edge id="0" source="n2" target="n1"/>
  </graph>
</graphml>"#,
    )
    .unwrap();

    let report = convert(&config).unwrap();
    assert!(report.is_success());

    let content = fs::read_to_string(config.dest_dir.join("mixed.gexf")).unwrap();
    let converted = parse_gexf(&content).unwrap();
    assert_eq!(
        converted.get_node("n2").unwrap().attributes.get("score_b"),
        Some(&AttrValue::String("high".to_string()))
    );
    assert_eq!(
        converted.get_node("n1").unwrap().attributes.get("score"),
        Some(&AttrValue::Integer(3))
    );
    assert!(converted.verify_graph_integrity().is_ok());
}
