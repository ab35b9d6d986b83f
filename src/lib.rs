//! # delimstream
//!
//! Streaming reader for delimited text files (tab, pipe, comma, ...) whose first
//! line names the columns. Each following line is returned as a [`Row`] that maps
//! column name to value, alongside the raw split fields and the raw line.
//!
//! ## Features
//!
//! - **Literal delimiters** - any single or multi-character string, matched exactly
//! - **Duplicate columns** - rejected, or enumerated as `NAME`, `NAME_1`, `NAME_2`
//! - **Any source** - file path, any `Read` implementation, or stdin
//! - **Encodings** - switch decoding mid-stream with WHATWG labels
//! - **Join helpers** - produce lines with the same delimiter convention
//!
//! ## Quick Start
//!
//! ```
//! use delimstream::{join, DelimitedReader, Source};
//! use std::io::Cursor;
//!
//! let data = "col1,col2,col3\nfoo,bar,baz\n";
//! let mut reader = DelimitedReader::new()
//!     .with_delimiter(",")
//!     .open_with(Source::stream(Cursor::new(data)))
//!     .unwrap();
//!
//! assert_eq!(reader.fields(), ["col1", "col2", "col3"]);
//!
//! let row = reader.read_row().unwrap().unwrap();
//! assert_eq!(row.get("col2"), Some("bar"));
//! assert_eq!(reader.line_number(), 1);
//! assert_eq!(reader.join(row.raw_fields()), row.raw_line());
//!
//! assert_eq!(join(["a", "b"], None), "a\tb");
//! ```
//!
//! Data fields cannot contain the delimiter: there is no quoting.

pub mod delimited;
pub mod delimited_reader;
pub mod error;
pub mod source;
pub mod types;

pub use delimited::{join, join_line, HeaderPolicy, DEFAULT_DELIMITER};
pub use delimited_reader::{DelimitedReader, RowIterator};
pub use error::{DelimError, Result};
pub use source::{Source, STREAM_FILE_NAME};
pub use types::Row;
