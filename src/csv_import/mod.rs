//! Importer for Chrome and Bitwarden CSV exports.
//!
//! The importer never fails. Unreadable files, unknown schemas and malformed
//! rows are reported as warnings in [`ParsedCsvResult::errors`]; the engines
//! treat an `UNKNOWN` result as an empty credential set.

mod reader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain_normalizer::normalize_url;
use crate::error::PassDiffResult;
use crate::types::{CredentialEntry, CsvFormat, ParsedCsvResult, Source};
use reader::{read_records, CsvRecord};

/// Header columns that identify a Bitwarden export.
const BITWARDEN_MARKERS: &[&str] = &["login_uri", "login_username", "login_password"];

/// Header columns a Chrome export must carry.
const CHROME_REQUIRED: &[&str] = &["url", "username", "password"];

/// A data row addressed by header name.
struct CsvRow<'a> {
    headers: &'a [String],
    fields: &'a [String],
}

impl<'a> CsvRow<'a> {
    /// Value of a column, empty when the column or the field is missing.
    fn get(&self, column: &str) -> &'a str {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.fields.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Detect the export schema from lower-cased header names.
pub fn detect_format(headers: &[String]) -> CsvFormat {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if BITWARDEN_MARKERS.iter().any(|m| has(*m)) {
        return CsvFormat::Bitwarden;
    }

    if CHROME_REQUIRED.iter().all(|m| has(*m)) {
        return CsvFormat::Chrome;
    }

    CsvFormat::Unknown
}

fn new_entry(source: Source, url: &str, username: &str, password: &str, notes: String) -> CredentialEntry {
    CredentialEntry {
        id: uuid::Uuid::new_v4().to_string(),
        source,
        domain: normalize_url(url).domain,
        url: url.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        notes,
    }
}

/// Chrome row: `name,url,username,password[,note]`.
fn parse_chrome_row(row: &CsvRow<'_>, source: Source) -> Option<CredentialEntry> {
    let url = row.get("url");
    let username = row.get("username");

    if url.is_empty() && username.is_empty() {
        return None;
    }

    Some(new_entry(
        source,
        url,
        username,
        row.get("password"),
        row.get("note").to_string(),
    ))
}

/// Bitwarden row. Secondary fields are appended to the notes, one per line.
fn parse_bitwarden_row(row: &CsvRow<'_>, source: Source) -> Option<CredentialEntry> {
    let item_type = row.get("type");
    if !item_type.is_empty() && !item_type.eq_ignore_ascii_case("login") {
        return None;
    }

    let url = row.get("login_uri");
    let username = row.get("login_username");

    if url.is_empty() && username.is_empty() {
        return None;
    }

    let mut notes = row.get("notes").to_string();

    let totp = row.get("login_totp");
    if !totp.is_empty() {
        notes.push_str(&format!("\n[TOTP: {}]", totp));
    }
    let favorite = row.get("favorite");
    if !favorite.is_empty() {
        notes.push_str(&format!("\n[Favorite: {}]", favorite));
    }
    let reprompt = row.get("reprompt");
    if !reprompt.is_empty() && reprompt != "0" {
        notes.push_str(&format!("\n[Reprompt: {}]", reprompt));
    }
    let folder = row.get("folder");
    if !folder.is_empty() {
        notes.push_str(&format!("\n[Folder: {}]", folder));
    }
    let fields = row.get("fields");
    if !fields.is_empty() {
        notes.push_str(&format!("\n[Fields: {}]", fields));
    }

    Some(new_entry(
        source,
        url,
        username,
        row.get("login_password"),
        notes.trim().to_string(),
    ))
}

/// Parse CSV text into credential entries tagged with `source`.
pub fn parse_csv(content: &str, source: Source) -> ParsedCsvResult {
    let mut parsed = read_records(content);
    let mut errors = std::mem::take(&mut parsed.warnings);

    let mut records = parsed.records.into_iter();
    let headers: Vec<String> = match records.next() {
        Some(header) => header.fields.iter().map(|h| h.trim().to_lowercase()).collect(),
        None => return ParsedCsvResult::unknown("CSV file is empty or malformed"),
    };
    let rows: Vec<CsvRecord> = records.collect();

    if rows.is_empty() {
        return ParsedCsvResult::unknown("CSV file is empty or malformed");
    }

    let format = detect_format(&headers);
    let parse_row: fn(&CsvRow<'_>, Source) -> Option<CredentialEntry> = match format {
        CsvFormat::Chrome => parse_chrome_row,
        CsvFormat::Bitwarden => parse_bitwarden_row,
        CsvFormat::Unknown => {
            tracing::warn!(?headers, "unrecognized CSV header");
            return ParsedCsvResult::unknown(
                "Unrecognized CSV format, expected a Chrome or Bitwarden export",
            );
        }
    };

    let mut entries = Vec::with_capacity(rows.len());
    for record in &rows {
        if record.fields.len() != headers.len() {
            errors.push(format!(
                "Line {}: expected {} fields, found {}",
                record.line,
                headers.len(),
                record.fields.len()
            ));
        }

        let row = CsvRow {
            headers: &headers,
            fields: &record.fields,
        };
        if let Some(entry) = parse_row(&row, source) {
            entries.push(entry);
        }
    }

    tracing::debug!(
        ?format,
        ?source,
        rows = rows.len(),
        entries = entries.len(),
        warnings = errors.len(),
        "CSV parsed"
    );

    ParsedCsvResult {
        format,
        entries,
        errors,
    }
}

/// Read a UTF-8 file and parse it. Read failures become a warning.
pub fn parse_file(path: impl AsRef<Path>, source: Source) -> ParsedCsvResult {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => parse_csv(&content, source),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read CSV file");
            ParsedCsvResult::unknown(format!("Failed to read file: {}", e))
        }
    }
}

/// Input for parsing CSV text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCsvInput {
    pub content: String,
    #[serde(default)]
    pub source: Source,
}

/// Parse CSV from JSON input (convenience function for FFI).
pub fn parse_csv_json(input_json: &str) -> PassDiffResult<String> {
    let input: ParseCsvInput = serde_json::from_str(input_json)?;
    let output = parse_csv(&input.content, input.source);
    Ok(serde_json::to_string(&output)?)
}
