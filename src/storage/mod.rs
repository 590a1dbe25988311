//! # Storage Layer
//!
//! Everything that touches the file system.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `format` | Pure text <-> entries conversion |
//! | `store` | [`IniStore`], the file-backed entry cache |
//! | `config` | Configuration for the `ini` tool |
//!
//! ## Update Modes
//!
//! - [`UpdateMode::UpdateOnAction`] writes after every mutation and re-reads
//!   the file before value lookups
//! - [`UpdateMode::UpdateOnDispose`] writes once, on close or drop
//!
//! ## Concurrency
//!
//! None. One store per file per process is assumed; there is no locking and
//! writes are not atomic.

pub mod format;
mod config;
mod store;

pub use config::{Config, ConfigError, OutputFormat, CONFIG_ENV};
pub use store::{IniStore, StoreError, StoreResult, UpdateMode};
