pub mod common;
pub mod convert;
pub mod errors;
pub mod export;
pub mod graph;
pub mod graph_io;
