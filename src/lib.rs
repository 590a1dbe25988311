//! ini-store - Read, query, and rewrite sectioned key/value files
//!
//! Files look like this:
//!
//! ```text
//! [Window]
//! title="Main"
//! width=800
//! ```
//!
//! An [`IniStore`] caches the parsed entries of one file and writes them back
//! either after every change or once on close, depending on its
//! [`UpdateMode`].
//!
//! ```no_run
//! use ini_store::{IniStore, UpdateMode};
//!
//! # fn main() -> Result<(), ini_store::StoreError> {
//! let mut store = IniStore::open_with_mode("settings.ini", UpdateMode::UpdateOnDispose)?;
//! store.set_value("Window", "title", "Main")?.set_value("Window", "width", 800)?;
//! assert_eq!(store.get_number("Window", "width")?, 800.0);
//! store.close()?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Entry, Value, MISSING_NUMBER, NOT_A_NUMBER};
pub use storage::{IniStore, StoreError, StoreResult, UpdateMode};
