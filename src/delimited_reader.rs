//! Header-keyed delimited file reading

use crate::delimited::{
    resolve_columns, DelimitedEncoder, DelimitedParser, HeaderPolicy, DEFAULT_DELIMITER,
};
use crate::error::{DelimError, Result};
use crate::source::{encoding_for_label, LineSource, Source};
use crate::types::Row;
use encoding_rs::{Encoding, UTF_8};
use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Delimited file reader keyed by header columns
///
/// The first line of the input names the columns; every following line is
/// returned as a [`Row`] mapping column name to value. Fields are split on a
/// literal delimiter (tab by default) with no quoting rules.
///
/// The reader owns its source and releases it on [`close`](Self::close) or
/// when dropped.
///
/// # Examples
///
/// ```no_run
/// use delimstream::DelimitedReader;
///
/// let mut reader = DelimitedReader::open("data.tsv").unwrap();
/// println!("Columns: {:?}", reader.fields());
///
/// while let Some(row) = reader.read_row().unwrap() {
///     println!("{}: {:?}", reader.line_number(), row.get("name"));
/// }
/// ```
///
/// # Custom Delimiter
///
/// The delimiter has to be set before the header is read:
///
/// ```no_run
/// use delimstream::DelimitedReader;
///
/// let mut reader = DelimitedReader::new()
///     .with_delimiter("|")
///     .enumerate(true)
///     .open_with("data.psv")
///     .unwrap();
///
/// for row_result in reader.rows() {
///     let row = row_result.unwrap();
///     println!("{:?}", row.columns);
/// }
/// ```
pub struct DelimitedReader {
    // Input
    source: Option<LineSource>,
    file_name: Option<String>,

    // Configuration
    delimiter: String,
    policy: HeaderPolicy,
    encoding: &'static Encoding,

    // State
    header: Vec<String>,
    line_number: u64,
    started: bool,
    current_line: String,
    current_fields: Vec<String>,
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DelimitedReader {
    /// Create an unopened reader with a tab delimiter
    pub fn new() -> Self {
        DelimitedReader {
            source: None,
            file_name: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            policy: HeaderPolicy::Strict,
            encoding: UTF_8,
            header: Vec::new(),
            line_number: 0,
            started: false,
            current_line: String::new(),
            current_fields: Vec::new(),
        }
    }

    /// Create a reader and open `source` right away
    ///
    /// ```no_run
    /// use delimstream::{DelimitedReader, HeaderPolicy, Source};
    ///
    /// let reader = DelimitedReader::with_source("data.tsv", true).unwrap();
    /// let stdin = DelimitedReader::with_source(Source::Stdin, HeaderPolicy::Strict).unwrap();
    /// ```
    pub fn with_source(
        source: impl Into<Source>,
        policy: impl Into<HeaderPolicy>,
    ) -> Result<Self> {
        let mut reader = Self::new();
        reader.open_source(source, policy)?;
        Ok(reader)
    }

    /// Open a tab-delimited file with strict header handling
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_source(path.as_ref(), HeaderPolicy::Strict)
    }

    /// Open a tab-delimited stream with strict header handling
    pub fn from_reader<R: Read + 'static>(reader: R) -> Result<Self> {
        Self::with_source(Source::stream(reader), HeaderPolicy::Strict)
    }

    /// Open standard input with strict header handling
    ///
    /// Blocks until the header line arrives. Stdin is locked only while a line
    /// is being read, but lines buffered by the reader are not visible to other
    /// stdin users.
    pub fn stdin() -> Result<Self> {
        Self::with_source(Source::Stdin, HeaderPolicy::Strict)
    }

    /// Set the delimiter (builder pattern)
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.set_delimiter(delimiter);
        self
    }

    /// Enumerate duplicate header columns on the next open (builder pattern)
    pub fn enumerate(mut self, enumerate: bool) -> Self {
        self.policy = HeaderPolicy::from(enumerate);
        self
    }

    /// Open `source` with the configured delimiter and header policy (builder pattern)
    pub fn open_with(mut self, source: impl Into<Source>) -> Result<Self> {
        let policy = self.policy;
        self.open_source(source, policy)?;
        Ok(self)
    }

    /// Open a source and read its header line
    ///
    /// Any previously open source is closed first. An empty input gives an
    /// empty header. On failure the reader is left closed.
    ///
    /// # Errors
    /// - [`DelimError::OpenError`] if a path is not an existing readable file
    /// - [`DelimError::DuplicateColumn`] if a column repeats under [`HeaderPolicy::Strict`]
    pub fn open_source(
        &mut self,
        source: impl Into<Source>,
        policy: impl Into<HeaderPolicy>,
    ) -> Result<bool> {
        self.close();
        self.policy = policy.into();

        let (lines, file_name) = source.into().open(self.encoding)?;
        self.source = Some(lines);

        if let Err(e) = self.read_header() {
            self.close();
            return Err(e);
        }

        debug!(
            file = %file_name,
            columns = self.header.len(),
            delimiter = ?self.delimiter,
            "opened delimited source"
        );
        self.file_name = Some(file_name);
        Ok(true)
    }

    fn read_header(&mut self) -> Result<()> {
        let fields = if self.decode_line()? {
            std::mem::take(&mut self.current_fields)
        } else {
            Vec::new()
        };
        // the header line is not a data row
        self.line_number = 0;
        self.current_line.clear();
        self.header = resolve_columns(fields, self.policy)?;
        Ok(())
    }

    /// Read the next line into the current snapshot
    ///
    /// Returns `false` at end of stream, leaving the line count unchanged.
    fn decode_line(&mut self) -> Result<bool> {
        let source = self.source.as_mut().ok_or(DelimError::NotOpen)?;
        let line = source.read_line().map_err(|e| {
            DelimError::ReadError(format!(
                "Failed to read line {}: {}",
                self.line_number + 1,
                e
            ))
        })?;
        self.started = true;

        match line {
            Some(raw) => {
                let parser = DelimitedParser::new(&self.delimiter);
                let text = parser.strip_terminator(&raw);
                self.current_fields = parser.parse_line(text);
                self.current_line = text.to_string();
                self.line_number += 1;
                Ok(true)
            }
            None => {
                self.current_line.clear();
                self.current_fields.clear();
                Ok(false)
            }
        }
    }

    /// Read a single row
    ///
    /// Returns `Ok(None)` at end of data. Values are trimmed of surrounding
    /// whitespace; header columns past the end of a short line are absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use delimstream::DelimitedReader;
    /// use std::io::Cursor;
    ///
    /// let data = "id\tname\n1\t Alice \n";
    /// let mut reader = DelimitedReader::from_reader(Cursor::new(data)).unwrap();
    ///
    /// let row = reader.read_row().unwrap().unwrap();
    /// assert_eq!(row.get("name"), Some("Alice"));
    /// assert_eq!(row.raw_fields()[1], " Alice ");
    /// assert!(reader.read_row().unwrap().is_none());
    /// ```
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        if !self.decode_line()? {
            return Ok(None);
        }

        let mut columns = IndexMap::with_capacity(self.header.len());
        for (name, value) in self.header.iter().zip(&self.current_fields) {
            columns.insert(name.clone(), value.trim().to_string());
        }

        Ok(Some(Row::new(
            columns,
            self.current_fields.clone(),
            self.current_line.clone(),
            self.line_number,
        )))
    }

    /// Get iterator over rows
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use delimstream::DelimitedReader;
    ///
    /// let mut reader = DelimitedReader::open("data.tsv").unwrap();
    ///
    /// for row_result in reader.rows() {
    ///     let row = row_result.unwrap();
    ///     println!("{:?}", row.columns);
    /// }
    /// ```
    pub fn rows(&mut self) -> RowIterator<'_> {
        RowIterator { reader: self }
    }

    /// Release the source and reset to the unopened state
    ///
    /// Safe to call any number of times. Always returns `true`.
    pub fn close(&mut self) -> bool {
        if self.source.take().is_some() {
            debug!(
                file = self.file_name.as_deref().unwrap_or_default(),
                rows = self.line_number,
                "closed delimited source"
            );
        }
        self.file_name = None;
        self.header.clear();
        self.line_number = 0;
        self.started = false;
        self.current_line.clear();
        self.current_fields.clear();
        true
    }

    /// Change the delimiter, returning the one in effect
    ///
    /// Ignored once any line, including the header, has been read, or when
    /// `delimiter` is empty. Both cases emit a `tracing::warn!` event.
    pub fn set_delimiter(&mut self, delimiter: &str) -> &str {
        if delimiter.is_empty() {
            warn!("ignoring empty delimiter");
        } else if self.started {
            warn!(
                current = ?self.delimiter,
                requested = ?delimiter,
                "cannot change delimiter after reading has started"
            );
        } else {
            self.delimiter = delimiter.to_string();
        }
        &self.delimiter
    }

    /// Current delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Header columns, after duplicate enumeration
    pub fn fields(&self) -> &[String] {
        &self.header
    }

    /// Path given at open time, or [`STREAM_FILE_NAME`](crate::STREAM_FILE_NAME)
    /// for streams. `None` when not open.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Number of data rows read so far
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Whether a source is currently open
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Switch text decoding for subsequent reads
    ///
    /// Takes a WHATWG label such as `"utf-8"`, `"latin1"` or `"shift_jis"`. May
    /// be called before opening; the choice carries over to the next open.
    pub fn set_encoding(&mut self, label: &str) -> Result<()> {
        let encoding = encoding_for_label(label)?;
        self.encoding = encoding;
        if let Some(source) = self.source.as_mut() {
            source.set_encoding(encoding);
        }
        debug!(encoding = encoding.name(), "set encoding");
        Ok(())
    }

    /// Name of the active encoding
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    /// Join values with this reader's delimiter
    pub fn join<I, S>(&self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        DelimitedEncoder::new(&self.delimiter).join(values)
    }

    /// Join values with this reader's delimiter and append `\n`
    pub fn join_line<I, S>(&self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        DelimitedEncoder::new(&self.delimiter).join_line(values)
    }
}

impl Drop for DelimitedReader {
    fn drop(&mut self) {
        self.close();
    }
}

/// Iterator over data rows
pub struct RowIterator<'a> {
    reader: &'a mut DelimitedReader,
}

impl<'a> Iterator for RowIterator<'a> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}
