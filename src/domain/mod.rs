//! Domain types for sectioned key/value files
//!
//! Contains the value and entry types without any I/O concerns.

mod entry;
mod value;

pub use entry::Entry;
pub use value::{is_numeric, parse_number, Value, MISSING_NUMBER, NOT_A_NUMBER};
