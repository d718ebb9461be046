//! JSON patent loader.
//!
//! Reads the JSON arrays produced by the patent scraper and inserts them
//! into the store. A path may be a single file or a directory, which is
//! walked recursively for `*.json` files in sorted order.
//!
//! Record shape:
//!
//! ```json
//! { "patent_id": "US11032814", "title": "...", "authors": ["Jane Doe"],
//!   "date": "2018-02-13", "description": "..." }
//! ```
//!
//! `authors` may also be a plain string. Existing ids are never overwritten.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use patent_harness_core::models::Patent;
use patent_harness_core::store::PatentStore;

use crate::config::Config;
use crate::db;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Authors {
    List(Vec<String>),
    Text(String),
}

impl Authors {
    fn joined(self) -> String {
        match self {
            Authors::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            Authors::Text(s) => s.trim().to_string(),
        }
    }
}

/// One scraped patent record.
#[derive(Debug, Deserialize)]
struct PatentRecord {
    #[serde(default)]
    patent_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Option<Authors>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Counters reported after a load.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadSummary {
    pub files: usize,
    pub records: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse `YYYY-MM-DD`, tolerating unpadded month and day.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().splitn(3, '-');
    let y = parts.next()?.parse().ok()?;
    let m = parts.next()?.parse().ok()?;
    let d = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

fn normalize_description(desc: Option<String>) -> Option<String> {
    desc.map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty() && d != "N/A")
}

impl PatentRecord {
    /// Convert to a [`Patent`], or `None` if the record has no id.
    fn into_patent(self) -> Option<Patent> {
        let id = self.patent_id.map(|s| s.trim().to_string())?;
        if id.is_empty() {
            return None;
        }
        Some(Patent {
            id,
            title: self.title.map(|t| t.trim().to_string()).unwrap_or_default(),
            authors: self.authors.map(Authors::joined).unwrap_or_default(),
            date: self.date.as_deref().and_then(parse_date),
            description: normalize_description(self.description),
        })
    }
}

/// Parse one JSON file into patents, returning `(patents, skipped)`.
pub fn parse_patent_file(path: &Path) -> Result<(Vec<Patent>, usize)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<PatentRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let total = records.len();
    let patents: Vec<Patent> = records
        .into_iter()
        .filter_map(PatentRecord::into_patent)
        .collect();
    let skipped = total - patents.len();
    Ok((patents, skipped))
}

/// Resolve `path` into the list of JSON files to load.
pub fn collect_json_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("Path not found: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_json = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Load every JSON file under `path` into `store`.
pub async fn load_patents<S: PatentStore + ?Sized>(store: &S, path: &Path) -> Result<LoadSummary> {
    let files = collect_json_files(path)?;
    let mut summary = LoadSummary {
        files: files.len(),
        ..Default::default()
    };

    for file in &files {
        let (patents, skipped) = parse_patent_file(file)?;
        summary.records += patents.len() + skipped;
        summary.skipped += skipped;
        for patent in &patents {
            if store.upsert_patent(patent).await? {
                summary.inserted += 1;
            } else {
                summary.skipped += 1;
            }
        }
        tracing::debug!(file = %file.display(), records = patents.len(), "loaded patent file");
    }

    Ok(summary)
}

/// CLI entry point for `patents load`.
pub async fn run_load(config: &Config, path: &Path) -> Result<()> {
    let store = db::open_store(config).await?;
    let summary = load_patents(&store, path).await?;
    store.pool().close().await;

    println!("load {}", path.display());
    println!(
        "  files: {}, records: {}, inserted: {}, skipped: {}",
        summary.files, summary.records, summary.inserted, summary.skipped
    );
    println!("ok");
    Ok(())
}
