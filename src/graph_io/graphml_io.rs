//! GraphML import functionality

use anyhow::{Context, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::{attribute_value, local_name, ImportOptions, ImportResult};
use crate::errors::{GraphIoError, GraphIoResult};
use crate::graph::{AttrType, AttributeKey, Edge, Graph, Node};

/// Import graph from GraphML format
pub fn import_graphml(file_path: &Path, options: &ImportOptions) -> Result<(Graph, ImportResult)> {
    debug!("Importing GraphML from: {}", file_path.display());

    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Cannot read {}", file_path.display()))?;
    let (graph, warnings) = read_graphml(&content).context("Invalid GraphML")?;

    debug!("Parsed GraphML {}", graph.stats());
    let result = ImportResult::for_graph(&graph, options, warnings);
    Ok((graph, result))
}

/// Parse a GraphML document, discarding warnings
pub fn parse_graphml(content: &str) -> GraphIoResult<Graph> {
    read_graphml(content).map(|(graph, _)| graph)
}

/// Parse a GraphML document, returning the graph and any warnings about
/// content that was skipped
pub fn read_graphml(content: &str) -> GraphIoResult<(Graph, Vec<String>)> {
    GraphmlReader::new(content).read()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyDomain {
    Graph,
    Node,
    Edge,
    All,
}

#[derive(Debug, Clone)]
struct KeyDecl {
    domain: KeyDomain,
    key: AttributeKey,
}

#[derive(Debug, Clone)]
enum Owner {
    Graph,
    Node(String),
    Edge(usize),
}

struct PendingData {
    key_id: String,
    owner: Owner,
    text: String,
}

struct PendingKey {
    id: String,
    decl: KeyDecl,
    default_text: Option<String>,
}

struct GraphmlReader<'a> {
    reader: Reader<&'a [u8]>,
    keys: IndexMap<String, KeyDecl>,
    ignored_keys: HashSet<String>,
    graph: Option<Graph>,
    graph_closed: bool,
    stack: Vec<String>,
    owners: Vec<Owner>,
    skip_depth: usize,
    pending_key: Option<PendingKey>,
    in_default: bool,
    pending_data: Option<PendingData>,
    warnings: Vec<String>,
}

impl<'a> GraphmlReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            reader: Reader::from_str(content),
            keys: IndexMap::new(),
            ignored_keys: HashSet::new(),
            graph: None,
            graph_closed: false,
            stack: Vec::new(),
            owners: Vec::new(),
            skip_depth: 0,
            pending_key: None,
            in_default: false,
            pending_data: None,
            warnings: Vec::new(),
        }
    }

    fn read(mut self) -> GraphIoResult<(Graph, Vec<String>)> {
        let mut seen_root = false;
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    seen_root = true;
                    self.open(&e, false)?;
                }
                Event::Empty(e) => {
                    seen_root = true;
                    self.open(&e, true)?;
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.close(&name)?;
                }
                Event::Text(t) => {
                    if self.collecting_text() {
                        let text = t.unescape()?;
                        self.push_text(&text);
                    }
                }
                Event::CData(c) => {
                    if self.collecting_text() {
                        let bytes = c.into_inner();
                        let text = std::str::from_utf8(&bytes)
                            .map_err(|e| GraphIoError::malformed(format!("CDATA is not UTF-8: {}", e)))?
                            .to_string();
                        self.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(GraphIoError::malformed("document has no root element"));
        }
        if let Some(open) = self.stack.last() {
            return Err(GraphIoError::malformed(format!(
                "unexpected end of document inside <{}>",
                open
            )));
        }

        let mut graph = self
            .graph
            .take()
            .ok_or_else(|| GraphIoError::malformed("no <graph> element found"))?;

        for decl in self.keys.values() {
            let target = match decl.domain {
                KeyDomain::Graph => vec![&mut graph.graph_keys],
                KeyDomain::Node => vec![&mut graph.node_keys],
                KeyDomain::Edge => vec![&mut graph.edge_keys],
                KeyDomain::All => vec![&mut graph.node_keys, &mut graph.edge_keys],
            };
            for keys in target {
                if let Some(previous) = keys.get(&decl.key.name) {
                    if previous.kind != decl.key.kind {
                        let msg = format!(
                            "Attribute '{}' is declared twice with types {} and {}",
                            decl.key.name, previous.kind, decl.key.kind
                        );
                        warn!("{}", msg);
                        self.warnings.push(msg);
                    }
                    continue;
                }
                keys.insert(decl.key.name.clone(), decl.key.clone());
            }
        }

        Ok((graph, self.warnings))
    }

    fn collecting_text(&self) -> bool {
        self.skip_depth == 0 && (self.pending_data.is_some() || self.in_default)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(data) = self.pending_data.as_mut() {
            data.text.push_str(text);
        } else if let Some(key) = self.pending_key.as_mut() {
            key.default_text.get_or_insert_with(String::new).push_str(text);
        }
    }

    fn skip(&mut self, e: &BytesStart, empty: bool, reason: &str) {
        debug!("Skipping <{}>: {}", String::from_utf8_lossy(e.local_name().as_ref()), reason);
        if !empty {
            self.skip_depth = 1;
        }
    }

    fn open(&mut self, e: &BytesStart, empty: bool) -> GraphIoResult<()> {
        if self.skip_depth > 0 {
            if !empty {
                self.skip_depth += 1;
            }
            return Ok(());
        }

        let name = local_name(e);
        let parent = self.stack.last().cloned();

        match (parent.as_deref(), name.as_str()) {
            (None, "graphml") => {}
            (None, other) => {
                return Err(GraphIoError::malformed(format!(
                    "expected <graphml> root element, found <{}>",
                    other
                )))
            }
            (Some("graphml"), "key") => {
                if !self.open_key(e)? {
                    self.skip(e, empty, "key for an unsupported domain");
                    return Ok(());
                }
            }
            (Some("key"), "default") => {
                self.in_default = true;
                if let Some(key) = self.pending_key.as_mut() {
                    key.default_text = Some(String::new());
                }
            }
            (Some("graphml"), "graph") => {
                if self.graph.is_some() {
                    let msg = "Document contains more than one graph, only the first was read";
                    warn!("{}", msg);
                    self.warnings.push(msg.to_string());
                    self.skip(e, empty, "additional graph");
                    return Ok(());
                }
                let directed = attribute_value(e, b"edgedefault")?.as_deref() != Some("undirected");
                let mut graph = Graph::new(directed);
                graph.id = attribute_value(e, b"id")?;
                self.graph = Some(graph);
                self.owners.push(Owner::Graph);
            }
            (Some("node" | "edge"), "graph") | (Some("graph"), "graph") => {
                return Err(GraphIoError::Unsupported("nested graphs".to_string()));
            }
            (Some("graph"), "node") => {
                let id = attribute_value(e, b"id")?
                    .ok_or_else(|| GraphIoError::malformed("<node> without id"))?;
                self.graph_mut()?.add_node(Node::new(&id));
                self.owners.push(Owner::Node(id));
            }
            (Some("graph"), "edge") => {
                let source = attribute_value(e, b"source")?
                    .ok_or_else(|| GraphIoError::malformed("<edge> without source"))?;
                let target = attribute_value(e, b"target")?
                    .ok_or_else(|| GraphIoError::malformed("<edge> without target"))?;
                let mut edge = Edge::new(&source, &target);
                edge.id = attribute_value(e, b"id")?;
                edge.directed = match attribute_value(e, b"directed")? {
                    Some(raw) => Some(parse_directed(&raw)?),
                    None => None,
                };
                let graph = self.graph_mut()?;
                graph.add_edge(edge);
                let idx = graph.edges.len() - 1;
                self.owners.push(Owner::Edge(idx));
            }
            (Some("graph"), "hyperedge") => {
                return Err(GraphIoError::Unsupported("hyperedges".to_string()));
            }
            (Some("graph" | "node" | "edge"), "data") => {
                let key_id = attribute_value(e, b"key")?
                    .ok_or_else(|| GraphIoError::malformed("<data> without key"))?;
                let owner = self
                    .owners
                    .last()
                    .cloned()
                    .ok_or_else(|| GraphIoError::malformed("<data> outside of a graph"))?;
                self.pending_data = Some(PendingData {
                    key_id,
                    owner,
                    text: String::new(),
                });
            }
            _ => {
                self.skip(e, empty, "not part of the attributed graph");
                return Ok(());
            }
        }

        self.stack.push(name.clone());
        if empty {
            self.close(&name)?;
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> GraphIoResult<()> {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }
        self.stack.pop();

        match name {
            "key" => self.close_key()?,
            "default" => self.in_default = false,
            "graph" => {
                self.owners.pop();
                self.graph_closed = true;
            }
            "node" | "edge" => {
                self.owners.pop();
            }
            "data" => self.close_data()?,
            _ => {}
        }
        Ok(())
    }

    /// Start a key declaration; returns false for keys of domains that
    /// carry no graph, node or edge data (ports, hyperedges, yEd resources).
    fn open_key(&mut self, e: &BytesStart) -> GraphIoResult<bool> {
        let id = attribute_value(e, b"id")?.ok_or_else(|| GraphIoError::malformed("<key> without id"))?;
        let domain = match attribute_value(e, b"for")?.as_deref() {
            Some("node") => KeyDomain::Node,
            Some("edge") => KeyDomain::Edge,
            Some("graph") => KeyDomain::Graph,
            Some("all") | None => KeyDomain::All,
            Some(other) => {
                debug!("Ignoring key {:?} declared for domain {:?}", id, other);
                self.ignored_keys.insert(id);
                return Ok(false);
            }
        };
        let name = attribute_value(e, b"attr.name")?.unwrap_or_else(|| id.clone());
        let kind = match attribute_value(e, b"attr.type")? {
            Some(raw) => AttrType::from_graphml(&raw).ok_or(GraphIoError::UnknownType(raw))?,
            None => AttrType::String,
        };

        self.pending_key = Some(PendingKey {
            id,
            decl: KeyDecl {
                domain,
                key: AttributeKey::new(&name, kind),
            },
            default_text: None,
        });
        Ok(true)
    }

    fn close_key(&mut self) -> GraphIoResult<()> {
        let Some(PendingKey {
            id,
            mut decl,
            default_text,
        }) = self.pending_key.take()
        else {
            return Ok(());
        };

        if let Some(raw) = default_text {
            decl.key.default = Some(decl.key.kind.parse_value(&raw).ok_or_else(|| {
                GraphIoError::InvalidValue {
                    key: decl.key.name.clone(),
                    value: raw.clone(),
                    kind: decl.key.kind,
                }
            })?);
        }

        let name = self.unique_attribute_name(&id, &decl);
        if name != decl.key.name {
            let msg = format!(
                "Attribute '{}' of key '{}' conflicts with an earlier {} declaration, stored as '{}'",
                decl.key.name, id, decl.key.kind, name
            );
            warn!("{}", msg);
            self.warnings.push(msg);
            decl.key.name = name;
        }

        if self.keys.insert(id.clone(), decl).is_some() {
            let msg = format!("Key id '{}' is declared more than once, the last declaration wins", id);
            warn!("{}", msg);
            self.warnings.push(msg);
        }
        Ok(())
    }

    /// Attribute name for a new key. Keys sharing a name and an attribute
    /// table must agree on the type; otherwise the later key is renamed
    /// after its id.
    fn unique_attribute_name(&self, id: &str, decl: &KeyDecl) -> String {
        let clashes = |name: &str| {
            self.keys.iter().any(|(other_id, other)| {
                other_id != id
                    && other.key.name == name
                    && domains_overlap(other.domain, decl.domain)
                    && other.key.kind != decl.key.kind
            })
        };

        let mut name = decl.key.name.clone();
        let mut suffix = 1;
        while clashes(&name) {
            name = if suffix == 1 {
                format!("{}_{}", decl.key.name, id)
            } else {
                format!("{}_{}_{}", decl.key.name, id, suffix)
            };
            suffix += 1;
        }
        name
    }

    fn close_data(&mut self) -> GraphIoResult<()> {
        let Some(data) = self.pending_data.take() else {
            return Ok(());
        };
        if self.ignored_keys.contains(&data.key_id) {
            return Ok(());
        }

        let decl = self
            .keys
            .get(&data.key_id)
            .ok_or_else(|| GraphIoError::UnknownKey(data.key_id.clone()))?;
        let name = decl.key.name.clone();
        let value = decl
            .key
            .kind
            .parse_value(&data.text)
            .ok_or_else(|| GraphIoError::InvalidValue {
                key: name.clone(),
                value: data.text.clone(),
                kind: decl.key.kind,
            })?;

        let graph = self.graph_mut()?;
        let attributes = match &data.owner {
            Owner::Graph => &mut graph.graph_attributes,
            Owner::Node(id) => &mut graph.ensure_node(id).attributes,
            Owner::Edge(idx) => match graph.edges.get_mut(*idx) {
                Some(edge) => &mut edge.attributes,
                None => return Err(GraphIoError::malformed("<data> refers to a missing edge")),
            },
        };
        attributes.insert(name, value);
        Ok(())
    }

    fn graph_mut(&mut self) -> GraphIoResult<&mut Graph> {
        if self.graph_closed {
            return Err(GraphIoError::malformed("content after the end of <graph>"));
        }
        self.graph
            .as_mut()
            .ok_or_else(|| GraphIoError::malformed("element outside of <graph>"))
    }
}

fn domains_overlap(a: KeyDomain, b: KeyDomain) -> bool {
    a == b || a == KeyDomain::All || b == KeyDomain::All
}

fn parse_directed(raw: &str) -> GraphIoResult<bool> {
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(GraphIoError::malformed(format!(
            "edge attribute directed=\"{}\" is not a boolean",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AttrValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="name" attr.type="string"/>
  <key id="d1" for="node" attr.name="rank" attr.type="int">
    <default>7</default>
  </key>
  <key id="d2" for="edge" attr.name="weight" attr.type="double"/>
  <key id="d3" for="graph" attr.name="description" attr.type="string"/>
  <graph id="G" edgedefault="undirected">
    <data key="d3">crawl of example.org</data>
    <node id="n0"><data key="d0">Alice &amp; Co</data><data key="d1">3</data></node>
    <node id="n1"/>
    <edge id="e0" source="n0" target="n1"><data key="d2">0.5</data></edge>
    <edge source="n1" target="n2" directed="true"/>
  </graph>
</graphml>"#;

    #[test]
    fn parses_nodes_edges_and_typed_attributes() {
        let graph = parse_graphml(SAMPLE).unwrap();

        assert!(!graph.directed);
        assert_eq!(graph.id.as_deref(), Some("G"));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let n0 = graph.get_node("n0").unwrap();
        assert_eq!(
            n0.attributes.get("name"),
            Some(&AttrValue::String("Alice & Co".to_string()))
        );
        assert_eq!(n0.attributes.get("rank"), Some(&AttrValue::Integer(3)));
        assert_eq!(
            graph.edges[0].attributes.get("weight"),
            Some(&AttrValue::Double(0.5))
        );
        assert_eq!(graph.edges[0].id.as_deref(), Some("e0"));
        assert_eq!(graph.edges[1].id, None);
        assert_eq!(graph.edges[1].directed, Some(true));
        assert_eq!(
            graph.graph_attributes.get("description"),
            Some(&AttrValue::String("crawl of example.org".to_string()))
        );
    }

    #[test]
    fn records_key_declarations_with_defaults() {
        let graph = parse_graphml(SAMPLE).unwrap();

        let rank = graph.node_keys.get("rank").unwrap();
        assert_eq!(rank.kind, AttrType::Int);
        assert_eq!(rank.default, Some(AttrValue::Integer(7)));
        assert_eq!(graph.node_keys.keys().collect::<Vec<_>>(), vec!["name", "rank"]);
        assert_eq!(graph.edge_keys.len(), 1);
        assert_eq!(graph.graph_keys.len(), 1);
    }

    #[test]
    fn edges_create_undeclared_nodes() {
        let graph = parse_graphml(SAMPLE).unwrap();
        assert!(graph.get_node("n2").is_some());
        assert!(graph.verify_graph_integrity().is_ok());
    }

    #[test]
    fn missing_edgedefault_means_directed() {
        let graph = parse_graphml(r#"<graphml><graph><node id="a"/></graph></graphml>"#).unwrap();
        assert!(graph.directed);
    }

    #[test]
    fn key_for_all_applies_to_nodes_and_edges() {
        let doc = r#"<graphml>
  <key id="c" for="all" attr.name="color"/>
  <graph edgedefault="directed">
    <node id="a"><data key="c">red</data></node>
    <edge source="a" target="a"><data key="c">blue</data></edge>
  </graph>
</graphml>"#;
        let graph = parse_graphml(doc).unwrap();
        assert_eq!(graph.node_keys.get("color").unwrap().kind, AttrType::String);
        assert!(graph.edge_keys.contains_key("color"));
        assert_eq!(
            graph.edges[0].attributes.get("color"),
            Some(&AttrValue::String("blue".to_string()))
        );
    }

    #[test]
    fn undeclared_key_is_an_error() {
        let doc = r#"<graphml><graph><node id="a"><data key="nope">x</data></node></graph></graphml>"#;
        let err = parse_graphml(doc).unwrap_err();
        assert!(matches!(err, GraphIoError::UnknownKey(ref k) if k == "nope"));
    }

    #[test]
    fn value_of_wrong_type_is_an_error() {
        let doc = r#"<graphml>
  <key id="w" for="edge" attr.name="weight" attr.type="double"/>
  <graph><edge source="a" target="b"><data key="w">heavy</data></edge></graph>
</graphml>"#;
        let err = parse_graphml(doc).unwrap_err();
        assert!(matches!(err, GraphIoError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_attribute_type_is_an_error() {
        let doc = r#"<graphml><key id="x" for="node" attr.name="x" attr.type="complex"/><graph/></graphml>"#;
        let err = parse_graphml(doc).unwrap_err();
        assert!(matches!(err, GraphIoError::UnknownType(ref t) if t == "complex"));
    }

    #[test]
    fn rejects_documents_that_are_not_graphml() {
        let err = parse_graphml(r#"<gexf><graph/></gexf>"#).unwrap_err();
        assert!(err.to_string().contains("expected <graphml> root element"));

        let err = parse_graphml(r#"<graphml><key id="d0"/></graphml>"#).unwrap_err();
        assert!(err.to_string().contains("no <graph> element"));

        assert!(parse_graphml("").is_err());
        assert!(parse_graphml("<graphml><graph><node id=\"a\">").is_err());
        assert!(parse_graphml("<graphml><graph></node></graph></graphml>").is_err());
    }

    #[test]
    fn rejects_nested_graphs_and_hyperedges() {
        let nested = r#"<graphml><graph><node id="a"><graph/></node></graph></graphml>"#;
        assert!(matches!(
            parse_graphml(nested).unwrap_err(),
            GraphIoError::Unsupported(_)
        ));

        let hyper = r#"<graphml><graph><hyperedge><endpoint node="a"/></hyperedge></graph></graphml>"#;
        assert!(matches!(
            parse_graphml(hyper).unwrap_err(),
            GraphIoError::Unsupported(_)
        ));
    }

    #[test]
    fn ignores_ports_and_descriptions() {
        let doc = r#"<graphml>
  <desc>A <b>rich</b> description</desc>
  <graph>
    <desc>graph desc</desc>
    <node id="a"><port name="p0"><port name="inner"/></port></node>
  </graph>
</graphml>"#;
        let graph = parse_graphml(doc).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.get_node("a").unwrap().attributes.is_empty());
    }

    #[test]
    fn warns_about_additional_graphs() {
        let doc = r#"<graphml><graph><node id="a"/></graph><graph><node id="b"/></graph></graphml>"#;
        let (graph, warnings) = read_graphml(doc).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn keeps_whitespace_and_cdata_in_string_values() {
        let doc = r#"<graphml>
  <key id="t" for="node" attr.name="text"/>
  <graph><node id="a"><data key="t">  padded <![CDATA[<raw>]]></data></node></graph>
</graphml>"#;
        let graph = parse_graphml(doc).unwrap();
        assert_eq!(
            graph.get_node("a").unwrap().attributes.get("text"),
            Some(&AttrValue::String("  padded <raw>".to_string()))
        );
    }

    #[test]
    fn empty_data_element_is_an_empty_string() {
        let doc = r#"<graphml><key id="t" for="node" attr.name="text"/><graph><node id="a"><data key="t"/></node></graph></graphml>"#;
        let graph = parse_graphml(doc).unwrap();
        assert_eq!(
            graph.get_node("a").unwrap().attributes.get("text"),
            Some(&AttrValue::String(String::new()))
        );
    }

    #[test]
    fn conflicting_key_types_keep_both_attributes() {
        let doc = r#"<graphml>
  <key id="a" for="node" attr.name="score" attr.type="int"/>
  <key id="b" for="node" attr.name="score" attr.type="string"/>
  <key id="c" for="edge" attr.name="score" attr.type="double"/>
  <graph>
    <node id="n1"><data key="a">3</data></node>
    <node id="n2"><data key="b">high</data></node>
    <edge source="n1" target="n2"><data key="c">0.5</data></edge>
  </graph>
</graphml>"#;
        let (graph, warnings) = read_graphml(doc).unwrap();

        assert_eq!(graph.node_keys.get("score").unwrap().kind, AttrType::Int);
        assert_eq!(graph.node_keys.get("score_b").unwrap().kind, AttrType::String);
        assert_eq!(
            graph.get_node("n1").unwrap().attributes.get("score"),
            Some(&AttrValue::Integer(3))
        );
        assert_eq!(
            graph.get_node("n2").unwrap().attributes.get("score_b"),
            Some(&AttrValue::String("high".to_string()))
        );
        // separate tables, no clash
        assert_eq!(graph.edge_keys.get("score").unwrap().kind, AttrType::Double);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("score_b"));
    }

    #[test]
    fn keys_of_the_same_type_share_a_name() {
        let doc = r#"<graphml>
  <key id="x" for="node" attr.name="tag"/>
  <key id="y" for="all" attr.name="tag"/>
  <graph><node id="a"><data key="x">one</data></node><node id="b"><data key="y">two</data></node></graph>
</graphml>"#;
        let (graph, warnings) = read_graphml(doc).unwrap();
        assert_eq!(graph.node_keys.len(), 1);
        assert_eq!(
            graph.get_node("b").unwrap().attributes.get("tag"),
            Some(&AttrValue::String("two".to_string()))
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn keys_for_other_domains_are_ignored() {
        let doc = r#"<graphml xmlns:y="http://www.yworks.com/xml/graphml">
  <key for="graphml" id="d7" yfiles.type="resources"/>
  <key for="port" id="d8" attr.name="side" attr.type="string"><default>left</default></key>
  <key for="node" id="d0" attr.name="name" attr.type="string"/>
  <graph>
    <node id="a"><data key="d0">A</data><port name="p"><data key="d8">right</data></port></node>
  </graph>
  <data key="d7"><y:Resources/></data>
</graphml>"#;
        let graph = parse_graphml(doc).unwrap();
        assert_eq!(graph.node_keys.keys().collect::<Vec<_>>(), vec!["name"]);
        assert!(graph.edge_keys.is_empty());
        assert!(graph.graph_keys.is_empty());
    }

    #[test]
    fn import_reports_counts_and_warnings() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let (graph, result) = import_graphml(file.path(), &ImportOptions::default()).unwrap();
        assert_eq!(result.nodes_imported, graph.node_count());
        assert_eq!(result.edges_imported, 2);
        assert!(result.warnings.is_empty());
    }
}
