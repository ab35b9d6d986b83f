//! Literal delimiter splitting for header and data lines

/// Splits lines on an exact delimiter string
///
/// The delimiter is matched as a literal character sequence, so `.`, `|` or `*`
/// split only where that exact text appears. No quoting or escaping is recognized.
pub struct DelimitedParser<'a> {
    delimiter: &'a str,
}

impl<'a> DelimitedParser<'a> {
    /// Create a parser for the given delimiter
    pub fn new(delimiter: &'a str) -> Self {
        Self { delimiter }
    }

    /// Remove a single trailing `\r\n`, `\n` or `\r`
    pub fn strip_terminator<'l>(&self, line: &'l str) -> &'l str {
        line.strip_suffix("\r\n")
            .or_else(|| line.strip_suffix('\n'))
            .or_else(|| line.strip_suffix('\r'))
            .unwrap_or(line)
    }

    /// Split a terminator-free line into fields
    ///
    /// Empty fields are kept, including trailing ones, so joining the result with
    /// the same delimiter reproduces `line`.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        line.split(self.delimiter).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab() {
        let parser = DelimitedParser::new("\t");
        assert_eq!(parser.parse_line("a\tb\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pattern_characters_are_literal() {
        let parser = DelimitedParser::new(".");
        assert_eq!(parser.parse_line("a.b.c"), vec!["a", "b", "c"]);

        let parser = DelimitedParser::new("|");
        assert_eq!(parser.parse_line("x|y"), vec!["x", "y"]);

        let parser = DelimitedParser::new(".*");
        assert_eq!(parser.parse_line("a.*b.c"), vec!["a", "b.c"]);
    }

    #[test]
    fn test_multi_char_delimiter() {
        let parser = DelimitedParser::new("::");
        assert_eq!(parser.parse_line("a::b:c::"), vec!["a", "b:c", ""]);
    }

    #[test]
    fn test_empty_fields_kept() {
        let parser = DelimitedParser::new(",");
        assert_eq!(parser.parse_line("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_empty_line() {
        let parser = DelimitedParser::new(",");
        assert_eq!(parser.parse_line(""), vec![""]);
    }

    #[test]
    fn test_quotes_not_special() {
        let parser = DelimitedParser::new(",");
        assert_eq!(parser.parse_line(r#""a,b",c"#), vec![r#""a"#, r#"b""#, "c"]);
    }

    #[test]
    fn test_strip_terminator() {
        let parser = DelimitedParser::new("\t");
        assert_eq!(parser.strip_terminator("abc\n"), "abc");
        assert_eq!(parser.strip_terminator("abc\r\n"), "abc");
        assert_eq!(parser.strip_terminator("abc\r"), "abc");
        assert_eq!(parser.strip_terminator("abc"), "abc");
        // only one terminator is removed
        assert_eq!(parser.strip_terminator("abc\n\n"), "abc\n");
    }
}
