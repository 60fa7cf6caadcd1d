//! Source tables: catalog, parsing and loaded data.

pub mod catalog;
mod parser;
mod source;

pub use catalog::TableSpec;
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
