use indexmap::IndexMap;
use std::collections::HashSet;
use serde::Serialize;

use crate::errors::GraphIoResult;
use crate::graph::{AttrType, AttrValue, AttributeKey, Graph, Node};
use crate::graph_io::ExportOptions;

#[derive(Serialize)]
struct GexfContext {
    meta: Option<MetaContext>,
    defaultedgetype: &'static str,
    node_attributes: Vec<AttributeContext>,
    edge_attributes: Vec<AttributeContext>,
    nodes: Vec<NodeContext>,
    edges: Vec<EdgeContext>,
}

#[derive(Serialize)]
struct MetaContext {
    date: String,
    creator: String,
    description: Option<String>,
}

#[derive(Serialize)]
struct AttributeContext {
    id: String,
    title: String,
    kind: &'static str,
    default: Option<String>,
}

#[derive(Serialize)]
struct AttValueContext {
    attr: String,
    value: String,
}

#[derive(Serialize)]
struct ColorContext {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Serialize)]
struct PositionContext {
    x: String,
    y: String,
}

#[derive(Serialize)]
struct NodeContext {
    id: String,
    label: String,
    attvalues: Vec<AttValueContext>,
    color: Option<ColorContext>,
    size: Option<String>,
    position: Option<PositionContext>,
}

#[derive(Serialize)]
struct EdgeContext {
    id: String,
    source: String,
    target: String,
    kind: Option<&'static str>,
    label: Option<String>,
    weight: Option<String>,
    attvalues: Vec<AttValueContext>,
}

/// Render a graph as a GEXF 1.2 document.
///
/// Returns the document and warnings for graph content GEXF cannot hold.
pub fn render(graph: &Graph, options: &ExportOptions) -> GraphIoResult<(String, Vec<String>)> {
    let mut warnings = Vec::new();

    for name in graph.graph_attributes.keys() {
        if name != "description" {
            warnings.push(format!(
                "Graph attribute '{}' has no GEXF equivalent and was dropped",
                name
            ));
        }
    }

    let node_table = attribute_table(&graph.node_keys, graph.nodes.values().map(|n| &n.attributes));
    let edge_table = attribute_table(&graph.edge_keys, graph.edges.iter().map(|e| &e.attributes));

    let meta = options.include_metadata.then(|| MetaContext {
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        creator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        description: graph.graph_attributes.get("description").map(|d| d.to_string()),
    });

    let nodes = graph
        .nodes
        .values()
        .map(|node| NodeContext {
            id: node.id.clone(),
            label: node.label(),
            attvalues: attvalues(&node_table, &node.attributes),
            color: options.viz.then(|| viz_color(node)).flatten(),
            size: options
                .viz
                .then(|| numeric(node, "size"))
                .flatten()
                .map(|s| AttrValue::Double(s).to_string()),
            position: options.viz.then(|| viz_position(node)).flatten(),
        })
        .collect();

    let edge_ids = edge_ids(graph);
    let edges = graph
        .edges
        .iter()
        .zip(edge_ids)
        .map(|(edge, id)| EdgeContext {
            id,
            source: edge.source.clone(),
            target: edge.target.clone(),
            kind: edge.directed.map(edge_type),
            label: edge.attributes.get("label").map(|l| l.to_string()),
            weight: edge
                .attributes
                .get("weight")
                .and_then(AttrValue::as_f64)
                .map(|w| AttrValue::Double(w).to_string()),
            attvalues: attvalues(&edge_table, &edge.attributes),
        })
        .collect();

    let context = GexfContext {
        meta,
        defaultedgetype: edge_type(graph.directed),
        node_attributes: declarations(&node_table),
        edge_attributes: declarations(&edge_table),
        nodes,
        edges,
    };

    let document = super::renderer::render_template(&get_template(), &context)?;
    Ok((document, warnings))
}

pub fn get_template() -> String {
    include_str!("to_gexf.hbs").to_string()
}

/// Edge ids, using the ordinal for edges without one unless another edge
/// already claims it
fn edge_ids(graph: &Graph) -> Vec<String> {
    let taken: HashSet<&str> = graph.edges.iter().filter_map(|e| e.id.as_deref()).collect();
    let mut assigned = HashSet::new();

    graph
        .edges
        .iter()
        .enumerate()
        .map(|(idx, edge)| match &edge.id {
            Some(id) => id.clone(),
            None => {
                let mut ordinal = idx;
                while taken.contains(ordinal.to_string().as_str())
                    || assigned.contains(&ordinal)
                {
                    ordinal += 1;
                }
                assigned.insert(ordinal);
                ordinal.to_string()
            }
        })
        .collect()
}

fn edge_type(directed: bool) -> &'static str {
    if directed {
        "directed"
    } else {
        "undirected"
    }
}

/// Declared keys followed by any attribute names used without a declaration
fn attribute_table<'a>(
    declared: &IndexMap<String, AttributeKey>,
    values: impl Iterator<Item = &'a IndexMap<String, AttrValue>>,
) -> IndexMap<String, AttributeKey> {
    let mut table = declared.clone();
    for attributes in values {
        for (name, value) in attributes {
            if !table.contains_key(name) {
                let kind = match value {
                    AttrValue::Boolean(_) => AttrType::Boolean,
                    AttrValue::Integer(_) => AttrType::Long,
                    AttrValue::Double(_) => AttrType::Double,
                    AttrValue::String(_) => AttrType::String,
                };
                table.insert(name.clone(), AttributeKey::new(name, kind));
            }
        }
    }
    table
}

fn declarations(table: &IndexMap<String, AttributeKey>) -> Vec<AttributeContext> {
    table
        .values()
        .enumerate()
        .map(|(idx, key)| AttributeContext {
            id: idx.to_string(),
            title: key.name.clone(),
            kind: key.kind.gexf_name(),
            default: key.default.as_ref().map(|d| d.to_string()),
        })
        .collect()
}

fn attvalues(
    table: &IndexMap<String, AttributeKey>,
    attributes: &IndexMap<String, AttrValue>,
) -> Vec<AttValueContext> {
    attributes
        .iter()
        .filter_map(|(name, value)| {
            table.get_index_of(name).map(|idx| AttValueContext {
                attr: idx.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

fn numeric(node: &Node, name: &str) -> Option<f64> {
    node.attributes.get(name).and_then(AttrValue::as_f64)
}

fn viz_color(node: &Node) -> Option<ColorContext> {
    let channel = |name| numeric(node, name).map(|v| v.round().clamp(0.0, 255.0) as u8);
    Some(ColorContext {
        r: channel("r")?,
        g: channel("g")?,
        b: channel("b")?,
    })
}

fn viz_position(node: &Node) -> Option<PositionContext> {
    Some(PositionContext {
        x: AttrValue::Double(numeric(node, "x")?).to_string(),
        y: AttrValue::Double(numeric(node, "y")?).to_string(),
    })
}
