//! Command-line front end for CutQuote.
//!
//! Loading of drawings and shop profiles, and plain-text summaries of every
//! pipeline stage. The `cutquote` binary wires these to subcommands.

pub mod input;
pub mod summary;

pub use input::{load_drawing, load_profile, parse_profile};
