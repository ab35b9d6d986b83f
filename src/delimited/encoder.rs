//! Joining values with a delimiter, the inverse of line splitting

/// Delimiter used when no reader or explicit delimiter is involved
pub const DEFAULT_DELIMITER: &str = "\t";

/// Line terminator appended by [`join_line`]
pub const LINE_TERMINATOR: &str = "\n";

/// Encoder for writing delimited rows into a byte buffer
///
/// Values are written as-is; a value containing the delimiter will read back as
/// more than one field.
pub struct DelimitedEncoder<'a> {
    delimiter: &'a str,
}

impl<'a> DelimitedEncoder<'a> {
    /// Create a new encoder with a custom delimiter
    pub fn new(delimiter: &'a str) -> Self {
        Self { delimiter }
    }

    /// Encode entire row into buffer, without a terminator
    pub fn encode_row<I, S>(&self, fields: I, buffer: &mut Vec<u8>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                buffer.extend_from_slice(self.delimiter.as_bytes());
            }
            buffer.extend_from_slice(field.as_ref().as_bytes());
        }
    }

    /// Join values into a string
    pub fn join<I, S>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                out.push_str(self.delimiter);
            }
            out.push_str(field.as_ref());
        }
        out
    }

    /// Join values and append a line terminator
    pub fn join_line<I, S>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = self.join(fields);
        out.push_str(LINE_TERMINATOR);
        out
    }
}

/// Join values with `delimiter`, or tab when `None`
///
/// # Examples
///
/// ```
/// use delimstream::join;
///
/// assert_eq!(join(["a", "b"], None), "a\tb");
/// assert_eq!(join(["a", "b"], Some("|")), "a|b");
/// ```
pub fn join<I, S>(values: I, delimiter: Option<&str>) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DelimitedEncoder::new(delimiter.unwrap_or(DEFAULT_DELIMITER)).join(values)
}

/// Same as [`join`], with a trailing `\n`
pub fn join_line<I, S>(values: I, delimiter: Option<&str>) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DelimitedEncoder::new(delimiter.unwrap_or(DEFAULT_DELIMITER)).join_line(values)
}
