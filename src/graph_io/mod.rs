//! Graph file import/export functionality
//!
//! Reading is supported for GraphML and GEXF, writing for GEXF. Every
//! format goes through the same [`Graph`] model so a file read in one
//! format can be written in another.

pub mod gexf_io;
pub mod graphml_io;

use anyhow::{bail, Result};
use quick_xml::events::BytesStart;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::GraphIoResult;
use crate::graph::Graph;

/// Graph file formats known to the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphFormat {
    /// GraphML, read only
    GraphML,
    /// GEXF 1.2, read and written
    GEXF,
}

impl GraphFormat {
    /// File name suffix for this format, including the leading dot
    pub fn suffix(&self) -> &'static str {
        match self {
            GraphFormat::GraphML => ".graphml",
            GraphFormat::GEXF => ".gexf",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GraphFormat::GraphML => "Graph Markup Language (XML-based)",
            GraphFormat::GEXF => "Graph Exchange XML Format",
        }
    }
}

/// How a graph file is read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Format of the file being read
    pub format: GraphFormat,
    /// Report integrity problems as warnings
    pub validate: bool,
}

/// How a graph file is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Format of the file being written
    pub format: GraphFormat,
    /// Write a `<meta>` block with date and creator
    pub include_metadata: bool,
    /// Whether to write colour, size and position attributes as visualization elements
    pub viz: bool,
}

/// Summary of a file read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    /// Nodes in the graph, including implicit ones
    pub nodes_imported: usize,
    pub edges_imported: usize,
    /// Content that was skipped or looks inconsistent
    pub warnings: Vec<String>,
}

impl ImportResult {
    pub(crate) fn for_graph(graph: &Graph, options: &ImportOptions, mut warnings: Vec<String>) -> Self {
        if options.validate {
            if let Err(errors) = graph.verify_graph_integrity() {
                warnings.extend(
                    errors
                        .into_iter()
                        .map(|e| format!("Validation warning: {}", e)),
                );
            }
        }

        Self {
            nodes_imported: graph.node_count(),
            edges_imported: graph.edge_count(),
            warnings,
        }
    }
}

/// Summary of a file write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    pub output_path: String,
    pub nodes_exported: usize,
    pub edges_exported: usize,
    /// Graph content the output format could not hold
    pub warnings: Vec<String>,
}

/// Dispatches reads and writes to the format modules
pub struct GraphIO;

impl GraphIO {
    /// Read a graph, logging any import warnings
    pub fn import_from_file<P: AsRef<Path>>(
        file_path: P,
        options: &ImportOptions,
    ) -> Result<(Graph, ImportResult)> {
        let path = file_path.as_ref();
        debug!("Reading {} as {:?}", path.display(), options.format);

        let (graph, import_result) = match options.format {
            GraphFormat::GraphML => graphml_io::import_graphml(path, options)?,
            GraphFormat::GEXF => gexf_io::import_gexf(path, options)?,
        };

        for warning in &import_result.warnings {
            info!("{}: {}", path.display(), warning);
        }
        debug!(
            "Import completed: {} nodes, {} edges",
            import_result.nodes_imported, import_result.edges_imported
        );

        Ok((graph, import_result))
    }

    /// Write a graph; the parent directory must exist
    pub fn export_to_file<P: AsRef<Path>>(
        graph: &Graph,
        file_path: P,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let path = file_path.as_ref();
        debug!("Writing {} as {:?}", path.display(), options.format);

        let export_result = match options.format {
            GraphFormat::GEXF => gexf_io::export_gexf(graph, path, options)?,
            GraphFormat::GraphML => bail!(crate::errors::GraphIoError::Unsupported(format!(
                "writing {}",
                options.format.description()
            ))),
        };

        for warning in &export_result.warnings {
            info!("{}: {}", path.display(), warning);
        }
        debug!(
            "Export completed: {} nodes, {} edges to {}",
            export_result.nodes_exported, export_result.edges_exported, export_result.output_path
        );

        Ok(export_result)
    }

    /// Format for a path, by its case-sensitive extension
    pub fn detect_format<P: AsRef<Path>>(file_path: P) -> Option<GraphFormat> {
        let extension = file_path.as_ref().extension()?.to_str()?;

        match extension {
            "graphml" => Some(GraphFormat::GraphML),
            "gexf" => Some(GraphFormat::GEXF),
            _ => None,
        }
    }

    pub fn default_import_options(format: GraphFormat) -> ImportOptions {
        ImportOptions {
            format,
            validate: true,
        }
    }

    pub fn default_export_options(format: GraphFormat) -> ExportOptions {
        ExportOptions {
            format,
            include_metadata: true,
            viz: false,
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        GraphIO::default_import_options(GraphFormat::GraphML)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        GraphIO::default_export_options(GraphFormat::GEXF)
    }
}

/// Local (namespace-free) name of an element
pub(crate) fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Unescaped value of the attribute with the given local name
pub(crate) fn attribute_value(e: &BytesStart, name: &[u8]) -> GraphIoResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
