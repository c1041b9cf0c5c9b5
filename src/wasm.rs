//! WASM bindings for the browser front end.

use wasm_bindgen::prelude::*;

use crate::credential_diff::{compare, CompareInput, CompareOutput};
use crate::credential_merge::{
    apply_merge_json, find_merge_candidates, merge_stats, MergeCandidatesInput,
    MergeCandidatesOutput,
};
use crate::types::{ParsedCsvResult, Source};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_source(source: &str) -> Source {
    if source.eq_ignore_ascii_case("b") {
        Source::B
    } else {
        Source::A
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Import / Export WASM Bindings
// ═══════════════════════════════════════════════════════════════════════════════

/// Parse CSV text read from a dropped file.
///
/// `source` is "A" or "B". Returns a JsValue (ParsedCsvResult).
#[wasm_bindgen(js_name = parseCsv)]
pub fn parse_csv_js(content: &str, source: &str) -> Result<JsValue, JsValue> {
    let result: ParsedCsvResult = crate::csv_import::parse_csv(content, parse_source(source));

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}

/// Export entries (JsValue array of CredentialEntry) as Chrome CSV text.
#[wasm_bindgen(js_name = exportCsv)]
pub fn export_csv_js(entries: JsValue) -> Result<String, JsValue> {
    let entries: Vec<crate::types::CredentialEntry> = serde_wasm_bindgen::from_value(entries)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse input: {}", e)))?;

    Ok(crate::csv_export::export_to_chrome_csv(&entries))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Compare WASM Bindings
// ═══════════════════════════════════════════════════════════════════════════════

/// Diff two entry sets and build display rows and stats.
///
/// Takes a JsValue (CompareInput) and returns a JsValue (CompareOutput).
#[wasm_bindgen(js_name = compare)]
pub fn compare_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: CompareInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse input: {}", e)))?;

    let output: CompareOutput = compare(input);

    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}

/// Compare using JSON strings (alternative API).
#[wasm_bindgen(js_name = compareJson)]
pub fn compare_json_js(input_json: &str) -> Result<String, JsValue> {
    crate::credential_diff::compare_json(input_json)
        .map_err(|e| JsValue::from_str(&format!("Compare failed: {}", e)))
}

/// Combine both sets for export, B preferred, using JSON strings.
///
/// Takes a JSON string (CombineExportInput) and returns a JSON string (CombineExportOutput).
#[wasm_bindgen(js_name = combineExportJson)]
pub fn combine_export_json_js(input_json: &str) -> Result<String, JsValue> {
    crate::credential_diff::combine_export_json(input_json)
        .map_err(|e| JsValue::from_str(&format!("Combine failed: {}", e)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Merge WASM Bindings
// ═══════════════════════════════════════════════════════════════════════════════

/// Find merge candidates.
///
/// Takes a JsValue (MergeCandidatesInput) and returns a JsValue (MergeCandidatesOutput).
#[wasm_bindgen(js_name = findMergeCandidates)]
pub fn find_merge_candidates_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: MergeCandidatesInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse input: {}", e)))?;

    let groups = find_merge_candidates(&input.entries);
    let stats = merge_stats(&groups);
    let output = MergeCandidatesOutput { groups, stats };

    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}

/// Apply a merge using JSON strings.
///
/// Takes a JSON string (ApplyMergeInput) and returns a JSON string (ApplyMergeOutput).
#[wasm_bindgen(js_name = applyMergeJson)]
pub fn apply_merge_json_js(input_json: &str) -> Result<String, JsValue> {
    apply_merge_json(input_json).map_err(|e| JsValue::from_str(&format!("Merge failed: {}", e)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Normalizer WASM Bindings
// ═══════════════════════════════════════════════════════════════════════════════

/// Normalize a URL into its comparison domain and risk flag.
#[wasm_bindgen(js_name = normalizeUrl)]
pub fn normalize_url_js(url: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&crate::domain_normalizer::normalize_url(url))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}
