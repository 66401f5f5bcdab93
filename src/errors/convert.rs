//! Batch conversion error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of a conversion run, each tied to the path involved
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source directory is missing or unreadable
    #[error("Cannot list source directory {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate file is not valid content for its format
    #[error("Failed to parse {}: {source:#}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The output directory could not be created
    #[error("Cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A result file could not be written
    #[error("Failed to write {}: {source:#}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ConvertError {
    /// Short name of the batch step that failed
    pub fn stage(&self) -> &'static str {
        match self {
            ConvertError::Enumeration { .. } => "enumerate",
            ConvertError::Parse { .. } => "parse",
            ConvertError::CreateDir { .. } | ConvertError::Write { .. } => "write",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConvertError::Enumeration { path, .. }
            | ConvertError::Parse { path, .. }
            | ConvertError::CreateDir { path, .. }
            | ConvertError::Write { path, .. } => path.as_path(),
        }
    }
}
