//! Graph format error types

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

use crate::graph::AttrType;

/// Errors raised while reading or writing a graph file
#[derive(Error, Debug)]
pub enum GraphIoError {
    /// The XML itself is not well formed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element carries a broken attribute list
    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    /// The document is well formed but does not have the expected shape
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// A data element points at a key that was never declared
    #[error("Data references undeclared key '{0}'")]
    UnknownKey(String),

    /// A key declares a type outside the supported set
    #[error("Unknown attribute type '{0}'")]
    UnknownType(String),

    /// A value does not parse as its declared type
    #[error("Value '{value}' is not a valid {kind} for key '{key}'")]
    InvalidValue {
        key: String,
        value: String,
        kind: AttrType,
    },

    /// The document uses a feature this crate does not model
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphIoError {
    /// Whether the error describes bad input content rather than an environment failure
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            GraphIoError::Xml(_)
                | GraphIoError::Attribute(_)
                | GraphIoError::Malformed(_)
                | GraphIoError::UnknownKey(_)
                | GraphIoError::UnknownType(_)
                | GraphIoError::InvalidValue { .. }
                | GraphIoError::Unsupported(_)
        )
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        GraphIoError::Malformed(msg.into())
    }
}
