//! # Patent Harness CLI (`patents`)
//!
//! Loads scraped patent records into SQLite, searches them by field, and
//! recommends similar patents by TF-IDF cosine similarity.
//!
//! ## Usage
//!
//! ```bash
//! patents --config ./config/patents.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `patents init` | Create the SQLite database and run schema migrations |
//! | `patents load <path>` | Load a JSON file or a directory of JSON files |
//! | `patents search [query]` | Field-filtered search |
//! | `patents get <id>` | Show one patent |
//! | `patents recommend <id>` | List similar patents |
//! | `patents stats` | Collection statistics |
//! | `patents serve` | Start the HTTP API |
//!
//! Logs go to stderr and are controlled with `RUST_LOG` (default `info`).

mod config;
mod db;
mod get;
mod ingest;
mod migrate;
mod recommend;
mod search;
mod server;
mod sqlite_store;
mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use patent_harness_core::filter::PatentFilter;

/// Patent Harness CLI: content-based patent recommendations.
#[derive(Parser)]
#[command(
    name = "patents",
    about = "Patent Harness: load, search, and recommend similar patents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/patents.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Safe to run repeatedly.
    Init,

    /// Load patent records from a JSON file or directory.
    ///
    /// Records whose id already exists are skipped, never overwritten.
    Load {
        /// JSON file, or directory walked recursively for `*.json`.
        path: PathBuf,
    },

    /// Search patents. Provided fields are AND-combined.
    Search {
        /// Free text matched against id, title, authors, and date.
        query: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        authors: Option<String>,

        #[arg(long)]
        id: Option<String>,

        /// Date prefix: `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`.
        #[arg(long)]
        date: Option<String>,

        /// Maximum results (defaults to `[search].limit`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a patent by id.
    Get { id: String },

    /// Recommend patents similar to the given one.
    Recommend {
        id: String,

        /// Minimum similarity (exclusive). Defaults to `[recommend].threshold`.
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum recommendations. Defaults to `[recommend].top_k`.
        #[arg(long)]
        top_k: Option<usize>,

        /// Print the JSON response body instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show collection statistics.
    Stats,

    /// Start the HTTP API on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Load { path } => {
            ingest::run_load(&cfg, &path).await?;
        }
        Commands::Search {
            query,
            title,
            authors,
            id,
            date,
            limit,
        } => {
            let filter = PatentFilter {
                query,
                title,
                authors,
                id,
                date,
            };
            search::run_search(&cfg, &filter, limit).await?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, &id).await?;
        }
        Commands::Recommend {
            id,
            threshold,
            top_k,
            json,
        } => {
            recommend::run_recommend(&cfg, &id, threshold, top_k, json).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
