//! UniFFI API module for Swift and Kotlin bindings.
//!
//! This module exposes the compare, merge and CSV operations via UniFFI for mobile platforms.
//! All functions use JSON strings for input/output to simplify cross-language marshalling.

use crate::error::PassDiffError;

/// Get the version of the passdiff-core library.
#[uniffi::export]
pub fn get_core_version() -> String {
    crate::get_core_version().to_string()
}

/// Parse a Chrome or Bitwarden CSV export.
///
/// # Arguments
/// * `input_json` - JSON string with format:
///   ```json
///   { "content": "name,url,username,password\n...", "source": "A" }
///   ```
///
/// # Returns
/// JSON string with format:
///   ```json
///   { "format": "CHROME", "entries": [...], "errors": [] }
///   ```
#[uniffi::export]
pub fn parse_csv_json(input_json: String) -> Result<String, PassDiffError> {
    crate::csv_import::parse_csv_json(&input_json)
}

/// Diff two credential sets.
///
/// # Arguments
/// * `input_json` - JSON string with format:
///   ```json
///   {
///     "entries_a": [{"id": "...", "domain": "...", "url": "...", "username": "...", "password": "..."}],
///     "entries_b": [...],
///     "settings": {"privacy_mode": "PEEK", "merge_strategy": "ROOT_DOMAIN", "show_same_entries": false},
///     "expanded_domains": ["example.com"]
///   }
///   ```
///
/// # Returns
/// JSON string with format:
///   ```json
///   {
///     "groups": [{"domain": "example.com", "has_risk": false, "items": [...]}],
///     "rows": [{"type": "HEADER", ...}, {"type": "ITEM", ...}],
///     "stats": {"total": 1, "same": 0, "modified": 1, "only_a": 0, "only_b": 0, "risk_count": 0}
///   }
///   ```
#[uniffi::export]
pub fn compare_json(input_json: String) -> Result<String, PassDiffError> {
    crate::credential_diff::compare_json(&input_json)
}

/// Combine both credential sets into one export list, B preferred.
///
/// Entries are matched on the exact `(domain, username)` pair.
///
/// # Arguments
/// * `input_json` - JSON string with format:
///   ```json
///   { "entries_a": [...], "entries_b": [...] }
///   ```
///
/// # Returns
/// JSON string with format:
///   ```json
///   { "entries": [...] }
///   ```
#[uniffi::export]
pub fn combine_export_json(input_json: String) -> Result<String, PassDiffError> {
    crate::credential_diff::combine_export_json(&input_json)
}

/// Find groups of entries sharing domain, username and password across several URLs.
///
/// # Arguments
/// * `input_json` - JSON string with format:
///   ```json
///   { "entries": [...] }
///   ```
///
/// # Returns
/// JSON string with format:
///   ```json
///   {
///     "groups": [{"domain": "...", "username": "...", "password": "...", "entries": [...], "has_risk": false}],
///     "stats": {"total_groups": 1, "total_entries": 2, "can_merge": 1, "risk_count": 0}
///   }
///   ```
#[uniffi::export]
pub fn find_merge_candidates_json(input_json: String) -> Result<String, PassDiffError> {
    crate::credential_merge::find_merge_candidates_json(&input_json)
}

/// Collapse the selected merge groups into one entry each.
///
/// # Arguments
/// * `input_json` - JSON string with format:
///   ```json
///   {
///     "entries": [...],
///     "selected": [{"domain": "...", "username": "...", "password": "..."}],
///     "strategy": "ROOT_DOMAIN",
///     "manual_choices": []
///   }
///   ```
///
/// # Returns
/// JSON string with format:
///   ```json
///   { "entries": [...], "removed": 1 }
///   ```
#[uniffi::export]
pub fn apply_merge_json(input_json: String) -> Result<String, PassDiffError> {
    crate::credential_merge::apply_merge_json(&input_json)
}

/// Export entries as Chrome CSV. Returns the CSV text as a JSON string.
#[uniffi::export]
pub fn export_csv_json(input_json: String) -> Result<String, PassDiffError> {
    crate::csv_export::export_csv_json(&input_json)
}

/// Normalize a URL into its comparison domain.
/// Example: "https://www.dev.example.co.uk/login" -> {"domain": "example.co.uk", "has_risk": true, ...}
#[uniffi::export]
pub fn normalize_url_json(url: String) -> Result<String, PassDiffError> {
    crate::normalize_url_json(&url)
}

/// Extract the comparison domain from a URL.
/// Example: "https://www.example.com/path" -> "example.com"
#[uniffi::export]
pub fn extract_domain(url: String) -> String {
    crate::domain_normalizer::normalize_url(&url).domain
}
