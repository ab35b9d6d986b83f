//! Input sources and encoded line reading

use crate::error::{DelimError, Result};
use encoding_rs::Encoding;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name reported for readers opened on a stream or stdin
pub const STREAM_FILE_NAME: &str = "<stream>";

/// Where a reader takes its lines from
#[derive(Default)]
pub enum Source {
    /// A file on disk
    Path(PathBuf),
    /// An already-open readable stream, owned by the reader
    Stream(Box<dyn Read>),
    /// Process standard input
    ///
    /// The stdin lock is taken only for the duration of each read, so other
    /// code on the same thread can still lock stdin while the reader is open.
    /// Input already buffered by the reader is not seen by other stdin users.
    #[default]
    Stdin,
}

impl Source {
    /// Wrap any reader as a source
    pub fn stream<R: Read + 'static>(reader: R) -> Self {
        Source::Stream(Box::new(reader))
    }

    /// Open the source, returning the line reader and the file name to report
    pub(crate) fn open(self, encoding: &'static Encoding) -> Result<(LineSource, String)> {
        match self {
            Source::Path(path) => {
                let file = open_regular_file(&path)?;
                let name = path.to_string_lossy().into_owned();
                Ok((LineSource::new(Box::new(BufReader::new(file)), encoding), name))
            }
            Source::Stream(reader) => Ok((
                LineSource::new(Box::new(BufReader::new(reader)), encoding),
                STREAM_FILE_NAME.to_string(),
            )),
            Source::Stdin => Ok((
                LineSource::new(Box::new(BufReader::new(io::stdin())), encoding),
                STREAM_FILE_NAME.to_string(),
            )),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Stream(_) => f.write_str("Stream(..)"),
            Source::Stdin => f.write_str("Stdin"),
        }
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<String> for Source {
    fn from(path: String) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

fn open_regular_file(path: &Path) -> Result<File> {
    let open_error = |source: io::Error| DelimError::OpenError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;
    let metadata = file.metadata().map_err(open_error)?;
    if !metadata.is_file() {
        return Err(open_error(io::Error::new(
            ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(file)
}

/// Look up an encoding by WHATWG label (`utf-8`, `latin1`, `shift_jis`, ...)
///
/// Lines and delimiters are located on raw bytes before decoding, so only
/// ASCII-compatible encodings are accepted.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DelimError::UnsupportedEncoding(label.to_string()))?;
    if !encoding.is_ascii_compatible() {
        return Err(DelimError::UnsupportedEncoding(format!(
            "{} is not ASCII-compatible",
            encoding.name()
        )));
    }
    Ok(encoding)
}

/// Buffered line reader that decodes each line with a switchable encoding
///
/// Lines end at `\n`, `\r\n` or a bare `\r`. The returned text keeps its
/// terminator.
pub struct LineSource {
    inner: Box<dyn BufRead>,
    encoding: &'static Encoding,
    buffer: Vec<u8>,
    first_line: bool,
    pending_cr: bool,
    pending_error: Option<io::Error>,
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl LineSource {
    /// Create a line source over a buffered reader
    pub fn new(inner: Box<dyn BufRead>, encoding: &'static Encoding) -> Self {
        LineSource {
            inner,
            encoding,
            buffer: Vec::with_capacity(1024),
            first_line: true,
            pending_cr: false,
            pending_error: None,
        }
    }

    /// Change the decoding used for subsequent lines
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// Active encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Read the next line, or `None` at end of stream
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();

        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }
        if self.pending_cr {
            let next = loop {
                match self.inner.fill_buf() {
                    Ok(buf) => break buf.first().copied(),
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            if next == Some(b'\n') {
                self.inner.consume(1);
            }
            self.pending_cr = false;
        }

        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    let terminator = available[pos];
                    self.buffer.extend_from_slice(&available[..=pos]);
                    self.inner.consume(pos + 1);
                    if terminator == b'\r' {
                        self.finish_carriage_return();
                    }
                    return Ok(Some(self.decode()));
                }
                None => {
                    let len = available.len();
                    self.buffer.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }

        if self.buffer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.decode()))
        }
    }

    /// Take the `\n` of a `\r\n` pair that straddles a buffer refill
    ///
    /// A failed lookahead must not lose the line already consumed: the error is
    /// reported by the next read and the check happens after it.
    fn finish_carriage_return(&mut self) {
        loop {
            match self.inner.fill_buf() {
                Ok(next) => {
                    if next.first() == Some(&b'\n') {
                        self.buffer.push(b'\n');
                        self.inner.consume(1);
                    }
                    return;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, "deferring line feed check after carriage return");
                    self.pending_cr = true;
                    self.pending_error = Some(e);
                    return;
                }
            }
        }
    }

    fn decode(&mut self) -> String {
        let (text, had_errors) = if self.first_line {
            self.first_line = false;
            self.encoding.decode_with_bom_removal(&self.buffer)
        } else {
            self.encoding.decode_without_bom_handling(&self.buffer)
        };
        if had_errors {
            debug!(encoding = self.encoding.name(), "replaced malformed input while decoding line");
        }
        text.into_owned()
    }
}
