//! Exporter producing Chrome-compatible CSV.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::error::PassDiffResult;
use crate::types::CredentialEntry;

const CHROME_HEADER: &str = "name,url,username,password,note";

/// Quote a field containing a comma, quote or line break; double embedded quotes.
fn escape_csv(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Serialize entries as `name,url,username,password,note` with a header row.
///
/// `name` is the entry's normalized domain. Rows are joined with `\n`.
pub fn export_to_chrome_csv(entries: &[CredentialEntry]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(entries.len() + 1);
    lines.push(CHROME_HEADER.to_string());

    for entry in entries {
        let fields = [
            escape_csv(&entry.domain),
            escape_csv(&entry.url),
            escape_csv(&entry.username),
            escape_csv(&entry.password),
            escape_csv(&entry.notes),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// Input for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCsvInput {
    pub entries: Vec<CredentialEntry>,
}

/// Export CSV from JSON input (convenience function for FFI).
///
/// Returns the CSV text as a JSON string.
pub fn export_csv_json(input_json: &str) -> PassDiffResult<String> {
    let input: ExportCsvInput = serde_json::from_str(input_json)?;
    let csv = export_to_chrome_csv(&input.entries);
    Ok(serde_json::to_string(&csv)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_import::parse_csv;
    use crate::types::{CsvFormat, Source};

    fn entry(domain: &str, url: &str, username: &str, password: &str, notes: &str) -> CredentialEntry {
        CredentialEntry {
            id: "id".to_string(),
            source: Source::A,
            domain: domain.to_string(),
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_header_only_for_empty_list() {
        assert_eq!(export_to_chrome_csv(&[]), "name,url,username,password,note");
    }

    #[test]
    fn test_export_rows() {
        let csv = export_to_chrome_csv(&[
            entry("x.com", "https://x.com/login", "u", "p", ""),
            entry("y.com", "https://y.com", "v", "p,q", "note \"quoted\""),
        ]);

        assert_eq!(
            csv,
            "name,url,username,password,note\n\
             x.com,https://x.com/login,u,p,\n\
             y.com,https://y.com,v,\"p,q\",\"note \"\"quoted\"\"\""
        );
    }

    #[test]
    fn test_round_trip_through_importer() {
        let original = vec![
            entry("x.com", "https://x.com/login", "u", "p\"1", "multi\nline"),
            entry("y.com", "https://www.y.com", "v,w", "p2", "[TOTP: ABC]"),
        ];

        let reimported = parse_csv(&export_to_chrome_csv(&original), Source::A);

        assert_eq!(reimported.format, CsvFormat::Chrome);
        assert_eq!(reimported.entries.len(), original.len());
        for (before, after) in original.iter().zip(&reimported.entries) {
            assert_eq!(before.url, after.url);
            assert_eq!(before.username, after.username);
            assert_eq!(before.password, after.password);
            assert_eq!(before.notes, after.notes);
        }
    }

    #[test]
    fn test_export_csv_json() {
        let input = ExportCsvInput {
            entries: vec![entry("x.com", "https://x.com", "u", "p", "")],
        };

        let output_json = export_csv_json(&serde_json::to_string(&input).unwrap()).unwrap();
        let csv: String = serde_json::from_str(&output_json).unwrap();

        assert_eq!(csv, "name,url,username,password,note\nx.com,https://x.com,u,p,");
    }
}
