//! # Command-Line Interface
//!
//! The `ini` tool: inspect and edit a single file from the shell.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `sections`, `keys`, `show` | List contents |
//! | `get`, `exists` | Look up values |
//! | `set`, `delete-key`, `delete-section` | Modify the file |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Defaults for `--format` and `--mode` come from the config file, see
//! [`crate::storage::Config`].
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod edit;
mod output;
mod query;

pub use app::{run, Cli, Commands};
pub use output::Output;
