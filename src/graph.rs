use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Declared type of an attribute key.
///
/// The variants follow the `attr.type` values GraphML allows; GEXF has a
/// matching type for each of them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl AttrType {
    pub fn from_graphml(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(AttrType::Boolean),
            "int" => Some(AttrType::Int),
            "long" => Some(AttrType::Long),
            "float" => Some(AttrType::Float),
            "double" => Some(AttrType::Double),
            "string" => Some(AttrType::String),
            _ => None,
        }
    }

    pub fn from_gexf(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(AttrType::Int),
            // liststring and anyURI carry no structure we can use
            "liststring" | "anyURI" => Some(AttrType::String),
            other => Self::from_graphml(other),
        }
    }

    pub fn graphml_name(&self) -> &'static str {
        match self {
            AttrType::Boolean => "boolean",
            AttrType::Int => "int",
            AttrType::Long => "long",
            AttrType::Float => "float",
            AttrType::Double => "double",
            AttrType::String => "string",
        }
    }

    pub fn gexf_name(&self) -> &'static str {
        match self {
            AttrType::Int => "integer",
            other => other.graphml_name(),
        }
    }

    /// Parse a raw attribute value according to this type.
    pub fn parse_value(&self, raw: &str) -> Option<AttrValue> {
        match self {
            AttrType::Boolean => parse_bool(raw).map(AttrValue::Boolean),
            AttrType::Int | AttrType::Long => raw.trim().parse().ok().map(AttrValue::Integer),
            AttrType::Float | AttrType::Double => parse_double(raw).map(AttrValue::Double),
            AttrType::String => Some(AttrValue::String(raw.to_string())),
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphml_name())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_double(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => trimmed.parse().ok(),
    }
}

/// A single attribute value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum AttrValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Integer(i) => Some(*i as f64),
            AttrValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Double(d) if d.is_nan() => f.write_str("NaN"),
            AttrValue::Double(d) if d.is_infinite() => {
                f.write_str(if *d > 0.0 { "INF" } else { "-INF" })
            }
            AttrValue::Double(d) => write!(f, "{}", d),
            AttrValue::String(s) => f.write_str(s),
        }
    }
}

/// Declaration of a named attribute, with an optional default value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttributeKey {
    pub name: String,
    pub kind: AttrType,
    pub default: Option<AttrValue>,
}

impl AttributeKey {
    pub fn new(name: &str, kind: AttrType) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub attributes: IndexMap<String, AttrValue>,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            attributes: IndexMap::new(),
        }
    }

    /// The text shown for this node: its `label` attribute, or its id.
    pub fn label(&self) -> String {
        self.attributes
            .get("label")
            .map(|l| l.to_string())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// Per-edge override of the graph's default direction.
    pub directed: Option<bool>,
    pub attributes: IndexMap<String, AttrValue>,
}

impl Edge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: None,
            source: source.to_string(),
            target: target.to_string(),
            directed: None,
            attributes: IndexMap::new(),
        }
    }
}

/// In-memory attributed graph shared by the readers and writers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Graph {
    pub id: Option<String>,
    pub directed: bool,
    pub graph_attributes: IndexMap<String, AttrValue>,
    pub graph_keys: IndexMap<String, AttributeKey>,
    pub node_keys: IndexMap<String, AttributeKey>,
    pub edge_keys: IndexMap<String, AttributeKey>,
    pub nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            id: None,
            directed: true,
            graph_attributes: IndexMap::new(),
            graph_keys: IndexMap::new(),
            node_keys: IndexMap::new(),
            edge_keys: IndexMap::new(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Default::default()
        }
    }

    /// Add a node, merging attributes into an existing node with the same id.
    pub fn add_node(&mut self, node: Node) {
        if let Some(existing) = self.nodes.get_mut(&node.id) {
            warn!("Duplicate node id {:?}, merging attributes", node.id);
            existing.attributes.extend(node.attributes);
        } else {
            self.nodes.insert(node.id.clone(), node);
        }
    }

    /// Get a node, creating an attribute-less one if the id is unknown.
    pub fn ensure_node(&mut self, id: &str) -> &mut Node {
        if !self.nodes.contains_key(id) {
            debug!("Creating implicit node {:?}", id);
        }
        self.nodes
            .entry(id.to_string())
            .or_insert_with(|| Node::new(id))
    }

    /// Add an edge; endpoints that do not exist yet are created.
    pub fn add_edge(&mut self, edge: Edge) {
        self.ensure_node(&edge.source);
        self.ensure_node(&edge.target);
        self.edges.push(edge);
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn stats(&self) -> String {
        format!(
            "Nodes: {}, Edges: {}, Node keys: {}, Edge keys: {}",
            self.nodes.len(),
            self.edges.len(),
            self.node_keys.len(),
            self.edge_keys.len()
        )
    }

    pub fn verify_graph_integrity(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (key, node) in &self.nodes {
            if key != &node.id {
                errors.push(format!(
                    "Node id:[{}] is stored under a different key {:?}",
                    node.id, key
                ));
            }
        }

        let mut edge_ids = HashSet::new();
        for (idx, edge) in self.edges.iter().enumerate() {
            let edge_ref = edge.id.clone().unwrap_or_else(|| idx.to_string());
            if !self.nodes.contains_key(&edge.source) {
                errors.push(format!(
                    "Edge id:[{}] source {:?} not found in nodes",
                    edge_ref, edge.source
                ));
            }
            if !self.nodes.contains_key(&edge.target) {
                errors.push(format!(
                    "Edge id:[{}] target {:?} not found in nodes",
                    edge_ref, edge.target
                ));
            }
            if let Some(id) = &edge.id {
                if !edge_ids.insert(id.as_str()) {
                    errors.push(format!("Edge id:[{}] is not unique", id));
                }
            }
        }

        if errors.is_empty() {
            debug!("Graph integrity verified: {}", self.stats());
            Ok(())
        } else {
            warn!("Graph has {} integrity problem(s)", errors.len());
            Err(errors)
        }
    }
}
