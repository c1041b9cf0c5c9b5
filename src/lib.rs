//! PassDiff Core Library
//!
//! Compares and deduplicates exported password-manager CSV files:
//! - **domain_normalizer**: URL → comparison domain, with risk classification
//! - **credential_diff**: Compare mode, diffs two exports by domain + username
//! - **credential_merge**: Merge mode, collapses entries that differ only in URL
//! - **row_flattener** / **diff_stats**: Display rows and summary counts
//! - **csv_import** / **csv_export**: Chrome and Bitwarden CSV I/O
//!
//! Every engine is a pure, synchronous function over immutable inputs.
//! Front ends call the `*_json` functions (directly or through the WASM,
//! C FFI or UniFFI bindings) and recompute from scratch on every change.
//!
//! # Example (conceptual)
//! ```ignore
//! // Compare example
//! let a = parse_csv(&chrome_export, Source::A);
//! let b = parse_csv(&bitwarden_export, Source::B);
//! let groups = diff_passwords(&a.entries, &b.entries);
//! let rows = flatten_groups(&groups, &default_expanded_domains(&groups), false);
//!
//! // Merge example
//! let candidates = find_merge_candidates(&a.entries);
//! let selected = candidates.iter().map(MergeGroup::key).collect();
//! let merged = apply_merge(&a.entries, &selected, MergeStrategy::RootDomain, &HashMap::new());
//! let csv = export_to_chrome_csv(&merged);
//! ```

pub mod credential_diff;
pub mod credential_merge;
pub mod csv_export;
pub mod csv_import;
pub mod diff_stats;
pub mod domain_normalizer;
pub mod error;
pub mod identity_key;
pub mod row_flattener;
pub mod settings;
pub mod types;

pub use credential_diff::{
    combine_export_json, combine_prefer_b, compare, compare_json, diff_passwords,
    CombineExportInput, CombineExportOutput, CompareInput, CompareOutput, DiffGroup, DiffItem,
    DiffStatus,
};
pub use credential_merge::{
    apply_merge, apply_merge_json, find_merge_candidates, find_merge_candidates_json,
    merge_stats, resolve_target_url, ApplyMergeInput, ApplyMergeOutput, ManualChoice,
    MergeCandidatesInput, MergeCandidatesOutput, MergeGroup, MergeGroupKey, MergeStats,
};
pub use csv_export::{export_csv_json, export_to_chrome_csv};
pub use csv_import::{detect_format, parse_csv, parse_csv_json, parse_file};
pub use diff_stats::{diff_stats, DiffStats};
pub use domain_normalizer::{normalize_url, NormalizedUrlResult, RiskReason};
pub use error::{PassDiffError, PassDiffResult};
pub use identity_key::{build_key, IdentityKey};
pub use row_flattener::{
    all_domains, default_expanded_domains, flatten_groups, toggle_domain, VirtualRow,
};
pub use settings::{mask_password, AppSettings, MergeStrategy, PrivacyMode};
pub use types::{CredentialEntry, CsvFormat, ParsedCsvResult, Source};

/// Version of the passdiff-core library.
pub fn get_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Normalize a URL and return the result as JSON (convenience function for FFI).
pub fn normalize_url_json(url: &str) -> PassDiffResult<String> {
    Ok(serde_json::to_string(&normalize_url(url))?)
}

// WASM bindings
#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;

// C FFI exports for .NET P/Invoke
#[cfg(feature = "ffi")]
pub mod ffi;

// UniFFI bindings for Swift/Kotlin
#[cfg(feature = "uniffi")]
pub mod uniffi_api;

#[cfg(feature = "uniffi")]
pub use uniffi_api::*;

// UniFFI scaffolding - generates the FFI glue code
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
