//! Stateless utilities for splitting, joining and header handling

mod encoder;
mod header;
mod parser;

pub use encoder::{join, join_line, DelimitedEncoder, DEFAULT_DELIMITER, LINE_TERMINATOR};
pub use header::{resolve_columns, HeaderPolicy};
pub use parser::DelimitedParser;
