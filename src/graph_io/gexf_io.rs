//! GEXF import/export functionality

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::{attribute_value, local_name, ExportOptions, ExportResult, ImportOptions, ImportResult};
use crate::common::write_string_to_file;
use crate::errors::{GraphIoError, GraphIoResult};
use crate::export::to_gexf;
use crate::graph::{AttrType, AttrValue, AttributeKey, Edge, Graph, Node};

/// Import graph from GEXF format
pub fn import_gexf(file_path: &Path, options: &ImportOptions) -> Result<(Graph, ImportResult)> {
    debug!("Importing GEXF from: {}", file_path.display());

    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Cannot read {}", file_path.display()))?;
    let (graph, warnings) = read_gexf(&content).context("Invalid GEXF")?;

    let result = ImportResult::for_graph(&graph, options, warnings);
    Ok((graph, result))
}

/// Export graph to GEXF format
pub fn export_gexf(graph: &Graph, file_path: &Path, options: &ExportOptions) -> Result<ExportResult> {
    debug!("Exporting GEXF to: {}", file_path.display());

    let (document, warnings) = to_gexf::render(graph, options).context("GEXF rendering failed")?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    write_string_to_file(file_path, &document)
        .with_context(|| format!("Cannot write {}", file_path.display()))?;

    Ok(ExportResult {
        output_path: file_path.display().to_string(),
        nodes_exported: graph.node_count(),
        edges_exported: graph.edge_count(),
        warnings,
    })
}

/// Parse a GEXF document, discarding warnings
pub fn parse_gexf(content: &str) -> GraphIoResult<Graph> {
    read_gexf(content).map(|(graph, _)| graph)
}

/// Parse a GEXF document, returning the graph and any warnings
pub fn read_gexf(content: &str) -> GraphIoResult<(Graph, Vec<String>)> {
    GexfReader::new(content).read()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AttrClass {
    Node,
    Edge,
}

enum Owner {
    Node(String),
    Edge(usize),
}

/// Values carried as XML attributes or viz elements, applied when the
/// owning element closes so attvalues take precedence
#[derive(Default)]
struct Deferred {
    label: Option<String>,
    weight: Option<f64>,
    viz: Vec<(&'static str, AttrValue)>,
}

struct PendingAttribute {
    class: AttrClass,
    key: AttributeKey,
    default_text: Option<String>,
}

enum TextTarget {
    Default,
    Description,
}

struct GexfReader<'a> {
    reader: Reader<&'a [u8]>,
    graph: Option<Graph>,
    stack: Vec<String>,
    skip_depth: usize,
    class: Option<AttrClass>,
    attribute_ids: HashMap<(AttrClass, String), String>,
    pending_attribute: Option<PendingAttribute>,
    owner: Option<Owner>,
    deferred: Deferred,
    text_target: Option<TextTarget>,
    text: String,
    description: Option<String>,
    warnings: Vec<String>,
}

impl<'a> GexfReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            reader: Reader::from_str(content),
            graph: None,
            stack: Vec::new(),
            skip_depth: 0,
            class: None,
            attribute_ids: HashMap::new(),
            pending_attribute: None,
            owner: None,
            deferred: Deferred::default(),
            text_target: None,
            text: String::new(),
            description: None,
            warnings: Vec::new(),
        }
    }

    fn read(mut self) -> GraphIoResult<(Graph, Vec<String>)> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => self.open(&e, false)?,
                Event::Empty(e) => self.open(&e, true)?,
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.close(&name)?;
                }
                Event::Text(t) => {
                    if self.skip_depth == 0 && self.text_target.is_some() {
                        self.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if self.skip_depth == 0 && self.text_target.is_some() {
                        self.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
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

        if let Some(description) = self.description.take() {
            graph.graph_keys.insert(
                "description".to_string(),
                AttributeKey::new("description", AttrType::String),
            );
            graph
                .graph_attributes
                .insert("description".to_string(), AttrValue::String(description));
        }

        Ok((graph, self.warnings))
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
            (None, "gexf") => {}
            (None, other) => {
                return Err(GraphIoError::malformed(format!(
                    "expected <gexf> root element, found <{}>",
                    other
                )))
            }
            (Some("gexf"), "meta") => {}
            (Some("meta"), "description") => {
                self.text_target = Some(TextTarget::Description);
                self.text.clear();
            }
            (Some("gexf"), "graph") => {
                if self.graph.is_some() {
                    let msg = "Document contains more than one graph, only the first was read";
                    warn!("{}", msg);
                    self.warnings.push(msg.to_string());
                    return self.skip(empty);
                }
                if attribute_value(e, b"mode")?.as_deref() == Some("dynamic") {
                    let msg = "Dynamic graph, time intervals are ignored";
                    warn!("{}", msg);
                    self.warnings.push(msg.to_string());
                }
                let directed =
                    attribute_value(e, b"defaultedgetype")?.as_deref() != Some("undirected");
                self.graph = Some(Graph::new(directed));
            }
            (Some("graph"), "attributes") => {
                self.class = match attribute_value(e, b"class")?.as_deref() {
                    Some("node") => Some(AttrClass::Node),
                    Some("edge") => Some(AttrClass::Edge),
                    other => {
                        debug!("Ignoring attributes of class {:?}", other);
                        return self.skip(empty);
                    }
                };
            }
            (Some("attributes"), "attribute") => self.open_attribute(e)?,
            (Some("attribute"), "default") => {
                self.text_target = Some(TextTarget::Default);
                self.text.clear();
            }
            (Some("graph"), "nodes") | (Some("graph"), "edges") => {}
            (Some("node"), "nodes") | (Some("node"), "edges") => {
                return Err(GraphIoError::Unsupported("hierarchical nodes".to_string()));
            }
            (Some("nodes"), "node") => {
                let id = attribute_value(e, b"id")?
                    .ok_or_else(|| GraphIoError::malformed("<node> without id"))?;
                self.deferred = Deferred {
                    label: attribute_value(e, b"label")?,
                    ..Default::default()
                };
                self.graph_mut()?.add_node(Node::new(&id));
                self.owner = Some(Owner::Node(id));
            }
            (Some("edges"), "edge") => self.open_edge(e)?,
            (Some("node" | "edge"), "attvalues") => {}
            (Some("attvalues"), "attvalue") => self.read_attvalue(e)?,
            (Some("node"), "color") => {
                for channel in ["r", "g", "b"] {
                    if let Some(raw) = attribute_value(e, channel.as_bytes())? {
                        let value = AttrType::Int.parse_value(&raw).ok_or_else(|| {
                            GraphIoError::InvalidValue {
                                key: channel.to_string(),
                                value: raw.clone(),
                                kind: AttrType::Int,
                            }
                        })?;
                        self.deferred.viz.push((channel, value));
                    }
                }
            }
            (Some("node"), "size") => {
                if let Some(value) = viz_number(e, "value")? {
                    self.deferred.viz.push(("size", value));
                }
            }
            (Some("node"), "position") => {
                for axis in ["x", "y"] {
                    if let Some(value) = viz_number(e, axis)? {
                        self.deferred.viz.push((axis, value));
                    }
                }
            }
            _ => return self.skip(empty),
        }

        self.stack.push(name.clone());
        if empty {
            self.close(&name)?;
        }
        Ok(())
    }

    fn skip(&mut self, empty: bool) -> GraphIoResult<()> {
        if !empty {
            self.skip_depth = 1;
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
            "description" if matches!(self.text_target, Some(TextTarget::Description)) => {
                self.text_target = None;
                self.description = Some(std::mem::take(&mut self.text));
            }
            "default" => {
                self.text_target = None;
                if let Some(pending) = self.pending_attribute.as_mut() {
                    pending.default_text = Some(std::mem::take(&mut self.text));
                }
            }
            "attribute" => self.close_attribute()?,
            "attributes" => self.class = None,
            "node" => self.close_node()?,
            "edge" => self.close_edge()?,
            _ => {}
        }
        Ok(())
    }

    fn open_attribute(&mut self, e: &BytesStart) -> GraphIoResult<()> {
        let Some(class) = self.class else {
            return Ok(());
        };
        let id = attribute_value(e, b"id")?
            .ok_or_else(|| GraphIoError::malformed("<attribute> without id"))?;
        let title = attribute_value(e, b"title")?.unwrap_or_else(|| id.clone());
        let kind = match attribute_value(e, b"type")? {
            Some(raw) => AttrType::from_gexf(&raw).ok_or(GraphIoError::UnknownType(raw))?,
            None => AttrType::String,
        };

        self.attribute_ids.insert((class, id), title.clone());
        self.pending_attribute = Some(PendingAttribute {
            class,
            key: AttributeKey::new(&title, kind),
            default_text: None,
        });
        Ok(())
    }

    fn close_attribute(&mut self) -> GraphIoResult<()> {
        let Some(PendingAttribute {
            class,
            mut key,
            default_text,
        }) = self.pending_attribute.take()
        else {
            return Ok(());
        };

        if let Some(raw) = default_text {
            key.default = Some(parse_typed(&key.name, key.kind, &raw)?);
        }

        let graph = self.graph_mut()?;
        let keys = match class {
            AttrClass::Node => &mut graph.node_keys,
            AttrClass::Edge => &mut graph.edge_keys,
        };
        keys.insert(key.name.clone(), key);
        Ok(())
    }

    fn open_edge(&mut self, e: &BytesStart) -> GraphIoResult<()> {
        let source = attribute_value(e, b"source")?
            .ok_or_else(|| GraphIoError::malformed("<edge> without source"))?;
        let target = attribute_value(e, b"target")?
            .ok_or_else(|| GraphIoError::malformed("<edge> without target"))?;

        let mut edge = Edge::new(&source, &target);
        edge.id = attribute_value(e, b"id")?;
        edge.directed = match attribute_value(e, b"type")?.as_deref() {
            Some("directed") => Some(true),
            Some("undirected") | Some("mutual") => Some(false),
            Some(other) => {
                return Err(GraphIoError::malformed(format!("unknown edge type \"{}\"", other)))
            }
            None => None,
        };

        let weight = match attribute_value(e, b"weight")? {
            Some(raw) => match parse_typed("weight", AttrType::Double, &raw)? {
                AttrValue::Double(w) => Some(w),
                _ => None,
            },
            None => None,
        };
        self.deferred = Deferred {
            label: attribute_value(e, b"label")?,
            weight,
            viz: Vec::new(),
        };

        let graph = self.graph_mut()?;
        graph.add_edge(edge);
        self.owner = Some(Owner::Edge(graph.edges.len() - 1));
        Ok(())
    }

    fn read_attvalue(&mut self, e: &BytesStart) -> GraphIoResult<()> {
        let attr_id = match attribute_value(e, b"for")? {
            Some(id) => id,
            None => attribute_value(e, b"id")?
                .ok_or_else(|| GraphIoError::malformed("<attvalue> without for"))?,
        };
        let raw = attribute_value(e, b"value")?
            .ok_or_else(|| GraphIoError::malformed("<attvalue> without value"))?;

        let class = match self.owner {
            Some(Owner::Node(_)) => AttrClass::Node,
            Some(Owner::Edge(_)) => AttrClass::Edge,
            None => return Err(GraphIoError::malformed("<attvalue> outside of a node or edge")),
        };
        let name = self
            .attribute_ids
            .get(&(class, attr_id.clone()))
            .cloned()
            .ok_or(GraphIoError::UnknownKey(attr_id))?;

        let graph = self
            .graph
            .as_mut()
            .ok_or_else(|| GraphIoError::malformed("<attvalue> outside of <graph>"))?;
        let keys = match class {
            AttrClass::Node => &graph.node_keys,
            AttrClass::Edge => &graph.edge_keys,
        };
        let kind = keys.get(&name).map(|k| k.kind).unwrap_or(AttrType::String);
        let value = parse_typed(&name, kind, &raw)?;

        let attributes = match &self.owner {
            Some(Owner::Node(id)) => &mut graph.ensure_node(id).attributes,
            Some(Owner::Edge(idx)) => match graph.edges.get_mut(*idx) {
                Some(edge) => &mut edge.attributes,
                None => return Err(GraphIoError::malformed("<attvalue> refers to a missing edge")),
            },
            None => return Ok(()),
        };
        attributes.insert(name, value);
        Ok(())
    }

    fn close_node(&mut self) -> GraphIoResult<()> {
        let Some(Owner::Node(id)) = self.owner.take() else {
            return Ok(());
        };
        let deferred = std::mem::take(&mut self.deferred);
        let graph = self.graph_mut()?;

        if let Some(label) = deferred.label {
            if label != id {
                let node = graph.ensure_node(&id);
                if !node.attributes.contains_key("label") {
                    node.attributes.insert("label".to_string(), AttrValue::String(label));
                    declare(&mut graph.node_keys, "label", AttrType::String);
                }
            }
        }

        for (name, value) in deferred.viz {
            let node = graph.ensure_node(&id);
            if !node.attributes.contains_key(name) {
                let kind = match value {
                    AttrValue::Integer(_) => AttrType::Int,
                    _ => AttrType::Double,
                };
                node.attributes.insert(name.to_string(), value);
                declare(&mut graph.node_keys, name, kind);
            }
        }
        Ok(())
    }

    fn close_edge(&mut self) -> GraphIoResult<()> {
        let Some(Owner::Edge(idx)) = self.owner.take() else {
            return Ok(());
        };
        let deferred = std::mem::take(&mut self.deferred);
        let graph = self.graph_mut()?;
        let Some(edge) = graph.edges.get_mut(idx) else {
            return Ok(());
        };

        let mut declared = Vec::new();
        if let Some(label) = deferred.label {
            if !edge.attributes.contains_key("label") {
                edge.attributes.insert("label".to_string(), AttrValue::String(label));
                declared.push(("label", AttrType::String));
            }
        }
        if let Some(weight) = deferred.weight {
            if !edge.attributes.contains_key("weight") {
                edge.attributes.insert("weight".to_string(), AttrValue::Double(weight));
                declared.push(("weight", AttrType::Double));
            }
        }
        for (name, kind) in declared {
            declare(&mut graph.edge_keys, name, kind);
        }
        Ok(())
    }

    fn graph_mut(&mut self) -> GraphIoResult<&mut Graph> {
        self.graph
            .as_mut()
            .ok_or_else(|| GraphIoError::malformed("element outside of <graph>"))
    }
}

fn declare(keys: &mut indexmap::IndexMap<String, AttributeKey>, name: &str, kind: AttrType) {
    keys.entry(name.to_string())
        .or_insert_with(|| AttributeKey::new(name, kind));
}

fn parse_typed(name: &str, kind: AttrType, raw: &str) -> GraphIoResult<AttrValue> {
    kind.parse_value(raw).ok_or_else(|| GraphIoError::InvalidValue {
        key: name.to_string(),
        value: raw.to_string(),
        kind,
    })
}

fn viz_number(e: &BytesStart, name: &'static str) -> GraphIoResult<Option<AttrValue>> {
    match attribute_value(e, name.as_bytes())? {
        Some(raw) => parse_typed(name, AttrType::Double, &raw).map(Some),
        None => Ok(None),
    }
}
