//! C FFI exports for .NET P/Invoke.
//!
//! These functions provide a C-compatible interface for calling Rust functions from C#.
//! All functions use JSON strings for input/output to simplify marshalling.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::error::PassDiffResult;

/// Run a JSON-in/JSON-out operation over a C string.
///
/// # Safety
///
/// `input_json` must be null or a valid null-terminated C string.
unsafe fn call_json(
    input_json: *const c_char,
    operation: &str,
    f: fn(&str) -> PassDiffResult<String>,
) -> *mut c_char {
    if input_json.is_null() {
        return ptr::null_mut();
    }

    let c_str = match CStr::from_ptr(input_json).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    match f(c_str) {
        Ok(json) => string_to_c_char(json),
        Err(e) => create_error_response(&format!("{} failed: {}", operation, e)),
    }
}

/// Diff two credential sets.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string (CompareInput)
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (CompareOutput).
/// Returns null on null or non-UTF-8 input.
#[no_mangle]
pub unsafe extern "C" fn compare_ffi(input_json: *const c_char) -> *mut c_char {
    call_json(input_json, "Compare", crate::credential_diff::compare_json)
}

/// Combine both credential sets for export, B preferred.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string (CombineExportInput)
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (CombineExportOutput).
/// Returns null on null or non-UTF-8 input.
#[no_mangle]
pub unsafe extern "C" fn combine_export_ffi(input_json: *const c_char) -> *mut c_char {
    call_json(input_json, "Combine", crate::credential_diff::combine_export_json)
}

/// Find merge candidates in one credential set.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string (MergeCandidatesInput)
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (MergeCandidatesOutput).
/// Returns null on null or non-UTF-8 input.
#[no_mangle]
pub unsafe extern "C" fn find_merge_candidates_ffi(input_json: *const c_char) -> *mut c_char {
    call_json(
        input_json,
        "Finding merge candidates",
        crate::credential_merge::find_merge_candidates_json,
    )
}

/// Apply a merge to one credential set.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string (ApplyMergeInput)
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (ApplyMergeOutput).
/// Returns null on null or non-UTF-8 input.
#[no_mangle]
pub unsafe extern "C" fn apply_merge_ffi(input_json: *const c_char) -> *mut c_char {
    call_json(input_json, "Merge", crate::credential_merge::apply_merge_json)
}

/// Parse CSV text.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string (ParseCsvInput)
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (ParsedCsvResult).
#[no_mangle]
pub unsafe extern "C" fn parse_csv_ffi(input_json: *const c_char) -> *mut c_char {
    call_json(input_json, "Parse", crate::csv_import::parse_csv_json)
}

/// Export entries as Chrome CSV.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string (ExportCsvInput)
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the CSV text as a JSON string.
#[no_mangle]
pub unsafe extern "C" fn export_csv_ffi(input_json: *const c_char) -> *mut c_char {
    call_json(input_json, "Export", crate::csv_export::export_csv_json)
}

/// Normalize a single URL.
///
/// # Safety
///
/// - `url` must be a valid null-terminated C string
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (NormalizedUrlResult).
#[no_mangle]
pub unsafe extern "C" fn normalize_url_ffi(url: *const c_char) -> *mut c_char {
    call_json(url, "Normalize", crate::normalize_url_json)
}

/// Get the library version.
///
/// # Safety
///
/// - The returned pointer must be freed by calling `free_string`
#[no_mangle]
pub extern "C" fn get_core_version_ffi() -> *mut c_char {
    string_to_c_char(crate::get_core_version().to_string())
}

/// Free a string that was allocated by Rust.
///
/// # Safety
///
/// - `s` must be a pointer that was returned by one of the FFI functions
/// - This function must only be called once per pointer
/// - After calling this function, the pointer is invalid
#[no_mangle]
pub unsafe extern "C" fn free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Convert a Rust string to a C string pointer.
fn string_to_c_char(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Create an error response JSON string.
fn create_error_response(message: &str) -> *mut c_char {
    let error_json = serde_json::json!({ "success": false, "error": message }).to_string();
    string_to_c_char(error_json)
}
