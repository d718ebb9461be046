//! Field-filtered patent search for the CLI.

use anyhow::Result;

use patent_harness_core::filter::PatentFilter;
use patent_harness_core::models::PatentResponse;
use patent_harness_core::service;

use crate::config::Config;
use crate::db;

/// Run a search and return response-shaped rows for the CLI.
pub async fn search_patents(
    config: &Config,
    filter: &PatentFilter,
    limit: Option<usize>,
) -> Result<Vec<PatentResponse>> {
    let store = db::open_store(config).await?;
    let limit = limit.unwrap_or(config.search.limit);
    let result = service::search_patents(&store, filter, limit).await;
    store.pool().close().await;
    Ok(result?.iter().map(PatentResponse::from).collect())
}

pub async fn run_search(config: &Config, filter: &PatentFilter, limit: Option<usize>) -> Result<()> {
    let results = search_patents(config, filter, limit).await?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, p) in results.iter().enumerate() {
        println!("{}. {}", i + 1, p.title);
        println!("    authors: {}", p.authors);
        println!("    date: {}", p.date.as_deref().unwrap_or("unknown"));
        println!("    id: {}", p.id);
        println!();
    }

    Ok(())
}
