//! Batch conversion of GraphML files into GEXF.
//!
//! Every `*.graphml` entry of the source directory is converted into a
//! `.gexf` file of the same stem in the destination directory. Files are
//! processed one at a time in directory-listing order.
//!
//! A file that cannot be parsed or written does not abort the run: the
//! failure is recorded in the [`ConversionReport`] and the next file is
//! processed. Only an unreadable source directory is returned as an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::ConvertError;
use crate::graph_io::{ExportOptions, GraphFormat, GraphIO};

/// Settings for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Directory scanned for `.graphml` files
    pub source_dir: PathBuf,
    /// Directory receiving the `.gexf` files, created on first write
    pub dest_dir: PathBuf,
    pub export: ExportOptions,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("../OUT/"),
            dest_dir: PathBuf::from("../GEXF"),
            export: ExportOptions::default(),
        }
    }
}

/// A file that could not be converted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileFailure {
    pub file: PathBuf,
    /// Step that failed: `parse` or `write`
    pub stage: String,
    pub message: String,
}

impl From<ConvertError> for FileFailure {
    fn from(err: ConvertError) -> Self {
        Self {
            file: err.path().to_path_buf(),
            stage: err.stage().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Result files written
    pub converted: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// Directory entries that were not candidates
    pub skipped: usize,
}

impl ConversionReport {
    pub fn succeeded(&self) -> usize {
        self.converted.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert every GraphML file of `config.source_dir` into GEXF.
pub fn convert(config: &ConvertConfig) -> Result<ConversionReport, ConvertError> {
    let (candidates, skipped) = find_candidates(&config.source_dir)?;
    debug!(
        "Found {} candidate(s) in {}, skipped {} entries",
        candidates.len(),
        config.source_dir.display(),
        skipped
    );

    let mut report = ConversionReport {
        skipped,
        ..Default::default()
    };
    let mut dest_ready = false;

    for candidate in candidates {
        info!("Processing file: {}", candidate.name);

        match convert_file(&candidate, config, &mut dest_ready) {
            Ok(result_path) => report.converted.push(result_path),
            Err(err) => {
                warn!("{}", err);
                report.failures.push(err.into());
            }
        }
    }

    Ok(report)
}

/// A directory entry selected for conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub path: PathBuf,
}

/// List the GraphML candidates of `dir`, returning them with the number
/// of entries passed over.
pub fn find_candidates(dir: &Path) -> Result<(Vec<Candidate>, usize), ConvertError> {
    let enumeration = |source| ConvertError::Enumeration {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    let mut skipped = 0;

    for entry in fs::read_dir(dir).map_err(enumeration)? {
        let entry = entry.map_err(enumeration)?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("Skipping entry with a non UTF-8 name: {}", path.display());
            skipped += 1;
            continue;
        };

        if !name.ends_with(GraphFormat::GraphML.suffix()) {
            skipped += 1;
            continue;
        }

        // follows symlinks
        if !path.is_file() {
            debug!("Skipping {}: not a regular file", path.display());
            skipped += 1;
            continue;
        }

        candidates.push(Candidate { name, path });
    }

    Ok((candidates, skipped))
}

/// Name of the GEXF file written for a GraphML file name.
///
/// ```
/// use gexf_convert::convert::result_file_name;
///
/// assert_eq!(result_file_name("ab.graphml"), "ab.gexf");
/// assert_eq!(result_file_name("x.graphml.graphml"), "x.graphml.gexf");
/// ```
pub fn result_file_name(name: &str) -> String {
    let stem = name
        .strip_suffix(GraphFormat::GraphML.suffix())
        .unwrap_or(name);
    format!("{}{}", stem, GraphFormat::GEXF.suffix())
}

fn convert_file(
    candidate: &Candidate,
    config: &ConvertConfig,
    dest_ready: &mut bool,
) -> Result<PathBuf, ConvertError> {
    let import_options = GraphIO::default_import_options(GraphFormat::GraphML);
    let (graph, _) = GraphIO::import_from_file(&candidate.path, &import_options).map_err(
        |source| ConvertError::Parse {
            path: candidate.path.clone(),
            source,
        },
    )?;
    debug!("{}: {}", candidate.name, graph.stats());

    let result_path = config.dest_dir.join(result_file_name(&candidate.name));

    if !*dest_ready {
        fs::create_dir_all(&config.dest_dir).map_err(|source| ConvertError::CreateDir {
            path: config.dest_dir.clone(),
            source,
        })?;
        *dest_ready = true;
    }

    GraphIO::export_to_file(&graph, &result_path, &config.export).map_err(|source| {
        ConvertError::Write {
            path: result_path.clone(),
            source,
        }
    })?;

    Ok(result_path)
}
