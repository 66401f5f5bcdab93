//! Error types for graph reading/writing and batch conversion
//!
//! # Error Categories
//!
//! - **GraphIoError**: parsing and rendering of the supported graph formats
//! - **ConvertError**: failures of the batch converter, tagged with the
//!   file or directory they concern
//!
//! # Examples
//!
//! ```rust
//! use gexf_convert::errors::GraphIoError;
//!
//! let err = GraphIoError::UnknownKey("d7".to_string());
//! assert_eq!(err.to_string(), "Data references undeclared key 'd7'");
//! assert!(err.is_parse_error());
//! ```

pub mod convert;
pub mod graph_io;

pub use convert::ConvertError;
pub use graph_io::GraphIoError;

/// Result type alias for graph format operations
pub type GraphIoResult<T> = Result<T, GraphIoError>;
