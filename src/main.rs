//! # FloatChat CLI (`floatchat`)
//!
//! Ingests ARGO NetCDF profiles into a JSON snapshot and ranks them
//! against natural-language questions.
//!
//! ## Usage
//!
//! ```bash
//! floatchat --config ./config/floatchat.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `floatchat ingest <paths>...` | Extract files and directories into the snapshot |
//! | `floatchat inspect <file>` | Extract one file and print the record as JSON |
//! | `floatchat search "<query>"` | Rank stored profiles against a question |
//! | `floatchat context "<query>"` | Print the context block for a question |
//! | `floatchat stats` | Summarize the snapshot |
//!
//! Logs go to stderr and honor `RUST_LOG` (default `info`); command output
//! goes to stdout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use floatchat::{config, context, ingest, inspect, search, stats};

/// FloatChat CLI: ARGO profile extraction and relevance search.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file at the default path means built-in defaults.
#[derive(Parser)]
#[command(
    name = "floatchat",
    about = "FloatChat — ARGO profile extraction and relevance search",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/floatchat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract NetCDF files into the snapshot.
    ///
    /// Directories are walked and filtered with `[ingest]` include/exclude
    /// globs. Files that fail or hold no usable data are reported and the
    /// rest of the batch continues.
    Ingest {
        /// Files or directories to ingest.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Write this batch to FILE instead of appending to the snapshot.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// List the files that would be ingested without reading them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract a single file and print the result as JSON.
    Inspect {
        /// NetCDF file.
        file: PathBuf,
    },

    /// Rank stored profiles against a question.
    Search {
        /// Natural-language query.
        query: String,

        /// Maximum number of results (overrides `retrieval.final_limit`).
        #[arg(long)]
        limit: Option<usize>,

        /// Show the per-component score breakdown.
        #[arg(long)]
        explain: bool,
    },

    /// Print the context block a language model would receive.
    Context {
        /// Natural-language query.
        query: String,
    },

    /// Show snapshot statistics.
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let cfg = if cli.config.as_os_str() == "./config/floatchat.toml" {
        config::load_config_or_default(&cli.config)?
    } else {
        config::load_config(&cli.config)?
    };

    match cli.command {
        Commands::Ingest {
            paths,
            output,
            dry_run,
        } => {
            ingest::run_ingest(&cfg, &paths, output.as_deref(), dry_run)?;
        }
        Commands::Inspect { file } => {
            inspect::run_inspect(&cfg, &file)?;
        }
        Commands::Search {
            query,
            limit,
            explain,
        } => {
            search::run_search(&cfg, &query, limit, explain)?;
        }
        Commands::Context { query } => {
            context::run_context(&cfg, &query)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
    }

    Ok(())
}
