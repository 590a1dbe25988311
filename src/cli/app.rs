//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::Output;
use super::{edit, query};
use crate::storage::{Config, IniStore, OutputFormat, UpdateMode};

#[derive(Parser)]
#[command(name = "ini")]
#[command(author, version, about = "Read and edit sectioned key/value files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true, env = "INI_STORE_FORMAT")]
    pub format: Option<OutputFormat>,

    /// When changes are written to the file (defaults to the configured mode)
    #[arg(long, short = 'm', global = true, env = "INI_STORE_MODE")]
    pub mode: Option<UpdateMode>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// File to operate on, created if missing
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sections in order of first appearance
    Sections,

    /// List keys of a section
    Keys {
        section: String,
    },

    /// Print a value
    Get {
        section: String,
        key: String,

        /// Read the value as a number
        #[arg(long, short)]
        number: bool,
    },

    /// Set a value, creating the key if needed
    Set {
        section: String,
        key: String,
        value: String,
    },

    /// Delete a single key
    DeleteKey {
        section: String,
        key: String,
    },

    /// Delete a section and all of its keys
    DeleteSection {
        section: String,
    },

    /// Check whether a section (or a key within it) exists; exits 1 if not
    Exists {
        section: String,
        key: Option<String>,
    },

    /// Show every entry
    Show,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    let output = Output::new(cli.format.unwrap_or(config.default_format));
    let mode = cli.mode.unwrap_or(config.default_mode);

    debug!(file = %cli.file.display(), mode = mode.as_str(), "opening file");
    let mut store = IniStore::open_with_mode(&cli.file, mode)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;

    let mut present = true;
    match cli.command {
        Commands::Sections => query::sections(&store, &output)?,
        Commands::Keys { section } => query::keys(&store, &output, &section)?,
        Commands::Get {
            section,
            key,
            number,
        } => query::get(&mut store, &output, &section, &key, number)?,
        Commands::Set {
            section,
            key,
            value,
        } => edit::set(&mut store, &output, &section, &key, value)?,
        Commands::DeleteKey { section, key } => {
            edit::delete_key(&mut store, &output, &section, &key)?
        }
        Commands::DeleteSection { section } => {
            edit::delete_section(&mut store, &output, &section)?
        }
        Commands::Exists { section, key } => {
            present = query::exists(&store, &output, &section, key.as_deref())?
        }
        Commands::Show => query::show(&store, &output)?,
    }

    store
        .close()
        .with_context(|| format!("Failed to write {}", cli.file.display()))?;

    if !present {
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr so they never mix with command output
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
