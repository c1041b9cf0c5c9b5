//! Shared data model: credential entries and importer results.

use serde::{Deserialize, Serialize};

/// Which input set an entry was imported from.
///
/// Merge mode works on a single set and always uses `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Source {
    #[default]
    A,
    B,
}

/// One password record, immutable after import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Opaque unique id assigned at import time
    pub id: String,
    /// Input set this entry came from
    #[serde(default)]
    pub source: Source,
    /// Normalized comparison domain
    #[serde(default)]
    pub domain: String,
    /// Original URL, kept verbatim for display and export
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Secondary fields of the source format, one per line
    #[serde(default)]
    pub notes: String,
}

impl CredentialEntry {
    /// Returns a copy of this entry pointing at a different URL.
    ///
    /// Everything else, including `domain`, is carried over unchanged.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }
}

/// CSV schema detected by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CsvFormat {
    Chrome,
    Bitwarden,
    Unknown,
}

/// Result of importing one CSV file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCsvResult {
    pub format: CsvFormat,
    pub entries: Vec<CredentialEntry>,
    /// Human-readable warnings; never fatal
    pub errors: Vec<String>,
}

impl ParsedCsvResult {
    /// An empty result carrying a single warning.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            format: CsvFormat::Unknown,
            entries: vec![],
            errors: vec![message.into()],
        }
    }
}
