//! C FFI API functions.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::OnceLock;

use crate::quote::Quoter;
use crate::types::{QuoteReport, ReportStatus};

/// Error codes.
pub const CUTQUOTE_OK: i32 = 0;
pub const CUTQUOTE_PARTIAL: i32 = 1;
pub const CUTQUOTE_ERR_NULL_PTR: i32 = -1;
pub const CUTQUOTE_ERR_INVALID_JSON: i32 = -2;
pub const CUTQUOTE_ERR_QUOTE_FAILED: i32 = -3;
pub const CUTQUOTE_ERR_UNKNOWN: i32 = -99;

/// Process-wide quoter with default settings, shared by every C caller.
fn shared_quoter() -> &'static Quoter {
    static QUOTER: OnceLock<Quoter> = OnceLock::new();
    QUOTER.get_or_init(Quoter::default)
}

/// Quotes a drawing from a JSON request.
///
/// The report JSON is written to `result_ptr` for every return code except
/// `CUTQUOTE_ERR_NULL_PTR` and `CUTQUOTE_ERR_UNKNOWN`.
///
/// # Safety
/// - `request_json` must be a valid null-terminated UTF-8 string
/// - `result_ptr` must be a valid pointer to a `*mut c_char`
/// - The caller must free the result string using `cutquote_free_string`
#[no_mangle]
pub unsafe extern "C" fn cutquote_quote(
    request_json: *const c_char,
    result_ptr: *mut *mut c_char,
) -> i32 {
    if request_json.is_null() || result_ptr.is_null() {
        return CUTQUOTE_ERR_NULL_PTR;
    }

    let (report, parse_failed) = match CStr::from_ptr(request_json).to_str() {
        Ok(json) => match serde_json::from_str(json) {
            Ok(request) => (shared_quoter().quote(&request), false),
            Err(e) => (QuoteReport::failure(format!("Invalid JSON: {}", e)), true),
        },
        Err(e) => (QuoteReport::failure(format!("Invalid UTF-8: {}", e)), true),
    };

    let code = if parse_failed {
        CUTQUOTE_ERR_INVALID_JSON
    } else {
        status_code(report.status)
    };
    write_report(&report, result_ptr).unwrap_or(code)
}

/// Frees a string allocated by CutQuote.
///
/// # Safety
/// - `ptr` must have been allocated by a CutQuote function
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn cutquote_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Returns the library version from Cargo.toml.
///
/// The returned string is statically allocated and must not be freed.
#[no_mangle]
pub extern "C" fn cutquote_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

fn status_code(status: ReportStatus) -> i32 {
    match status {
        ReportStatus::Ok => CUTQUOTE_OK,
        ReportStatus::Partial => CUTQUOTE_PARTIAL,
        ReportStatus::Error => CUTQUOTE_ERR_QUOTE_FAILED,
    }
}

/// Serializes the report into `result_ptr`; returns an error code on failure.
unsafe fn write_report(report: &QuoteReport, result_ptr: *mut *mut c_char) -> Option<i32> {
    let json = match serde_json::to_string(report) {
        Ok(json) => json,
        Err(_) => return Some(CUTQUOTE_ERR_UNKNOWN),
    };
    match CString::new(json) {
        Ok(cstr) => {
            *result_ptr = cstr.into_raw();
            None
        }
        Err(_) => Some(CUTQUOTE_ERR_UNKNOWN),
    }
}
