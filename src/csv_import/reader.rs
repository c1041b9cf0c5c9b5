//! Minimal CSV record reader.
//!
//! Handles the subset of RFC 4180 that browser and password-manager exports
//! produce: comma separators, quoted fields with doubled quotes, and quoted
//! fields spanning several lines. Never fails; problems become warnings.

/// One decoded record and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Decoded records plus any warnings raised while reading.
#[derive(Debug, Default)]
pub struct CsvRecords {
    pub records: Vec<CsvRecord>,
    pub warnings: Vec<String>,
}

struct RecordBuilder {
    records: Vec<CsvRecord>,
    fields: Vec<String>,
    field: String,
    start_line: usize,
}

impl RecordBuilder {
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
    }

    /// Close the current record; blank lines are dropped.
    fn end_record(&mut self, next_line: usize) {
        self.end_field();
        let fields = std::mem::take(&mut self.fields);
        let is_blank = fields.len() == 1 && fields[0].is_empty();
        if !is_blank {
            self.records.push(CsvRecord {
                line: self.start_line,
                fields,
            });
        }
        self.start_line = next_line;
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.field.is_empty()
    }
}

/// Split CSV text into records.
pub fn read_records(content: &str) -> CsvRecords {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut builder = RecordBuilder {
        records: Vec::new(),
        fields: Vec::new(),
        field: String::new(),
        start_line: 1,
    };
    let mut warnings = Vec::new();
    let mut line = 1;
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    builder.field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if builder.field.is_empty() => in_quotes = true,
            '\n' if in_quotes => {
                builder.field.push('\n');
                line += 1;
            }
            '\r' if !in_quotes => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                builder.end_record(line);
            }
            '\n' => {
                line += 1;
                builder.end_record(line);
            }
            ',' if !in_quotes => builder.end_field(),
            _ => builder.field.push(c),
        }
    }

    if in_quotes {
        warnings.push(format!(
            "Line {}: unterminated quoted field",
            builder.start_line
        ));
    }

    if !builder.is_empty() {
        builder.end_record(line);
    }

    CsvRecords {
        records: builder.records,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(content: &str) -> Vec<Vec<String>> {
        read_records(content)
            .records
            .into_iter()
            .map(|r| r.fields)
            .collect()
    }

    #[test]
    fn test_simple_records() {
        assert_eq!(
            fields("a,b,c\n1,2,3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        let result = fields(r#"name,"Last, First","pass""word""#);
        assert_eq!(result, vec![vec!["name", "Last, First", "pass\"word"]]);
    }

    #[test]
    fn test_quoted_newline_spans_lines() {
        let records = read_records("h1,h2\n\"line one\nline two\",x\nnext,row\n").records;

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].fields, vec!["line one\nline two", "x"]);
        assert_eq!(records[1].line, 2);
        assert_eq!(records[2].line, 4);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        assert_eq!(
            fields("a,b\r\n\r\n1,2\r\n\n"),
            vec![vec!["a", "b"], vec!["1", "2"]]
        );
    }

    #[test]
    fn test_empty_fields_kept() {
        assert_eq!(fields(",,\n"), vec![vec!["", "", ""]]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert_eq!(fields("a,b\n1,2"), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        assert_eq!(fields("\u{feff}url,username"), vec![vec!["url", "username"]]);
    }

    #[test]
    fn test_unterminated_quote_warns() {
        let result = read_records("a,b\n1,\"never closed\n");

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Line 2"));
        assert_eq!(result.records[1].fields, vec!["1", "never closed\n"]);
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        assert_eq!(fields("ab\"c,d"), vec![vec!["ab\"c", "d"]]);
    }
}
