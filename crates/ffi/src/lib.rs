//! # CutQuote FFI
//!
//! The quote pipeline and its C interface.
//!
//! [`Quoter`] turns entity records into a [`QuoteReport`]: drawing summary,
//! cost estimate, material comparison, cost advice, optimized cutting path,
//! and sheet nesting. Path and nesting run concurrently on the rayon pool;
//! reports are cached by drawing content, material, and thickness.
//!
//! ## Functions
//!
//! - [`cutquote_quote`] - Quotes a drawing from a JSON request
//! - [`cutquote_free_string`] - Frees result strings
//! - [`cutquote_version`] - Returns the library version
//!
//! ## Return Codes
//!
//! | Code | Constant | Meaning |
//! |------|----------|---------|
//! | 0 | `CUTQUOTE_OK` | Success |
//! | 1 | `CUTQUOTE_PARTIAL` | Report produced with warnings |
//! | -1 | `CUTQUOTE_ERR_NULL_PTR` | Null pointer passed |
//! | -2 | `CUTQUOTE_ERR_INVALID_JSON` | Invalid JSON input |
//! | -3 | `CUTQUOTE_ERR_QUOTE_FAILED` | No estimate could be produced |
//! | -99 | `CUTQUOTE_ERR_UNKNOWN` | Unknown error |
//!
//! ## JSON Request Format
//!
//! ```json
//! {
//!   "entities": [
//!     {"type": "LINE", "start": [0, 0], "end": [100, 0]},
//!     {"type": "CIRCLE", "center": [50, 25], "radius": 10}
//!   ],
//!   "material": "steel",
//!   "thickness": 3.0,
//!   "config": {
//!     "cost": {"setup_cost": 650.0},
//!     "nesting": {"spacing": 3.0}
//!   },
//!   "include_path": true,
//!   "include_nesting": true
//! }
//! ```
//!
//! ## C Example
//!
//! ```c
//! #include "cutquote.h"
//! #include <stdio.h>
//!
//! int main() {
//!     const char* request = "{\"entities\": [...], \"thickness\": 3.0}";
//!     char* result = NULL;
//!     int code = cutquote_quote(request, &result);
//!     if (code >= CUTQUOTE_OK) {
//!         printf("Quote: %s\n", result);
//!     }
//!     cutquote_free_string(result);
//!     return code < 0;
//! }
//! ```

mod api;
mod cache;
mod quote;
mod types;

pub use api::*;
pub use cache::{QuoteCache, QuoteKey, DEFAULT_CACHE_CAPACITY};
pub use quote::Quoter;
pub use types::*;
