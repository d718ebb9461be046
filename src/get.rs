//! Patent retrieval by ID for the `patents get` CLI command.

use anyhow::Result;

use patent_harness_core::models::PatentResponse;
use patent_harness_core::service;

use crate::config::Config;
use crate::db;

/// Fetch one patent in response shape. Missing ids fail with
/// `patent not found: <id>`.
pub async fn get_patent(config: &Config, id: &str) -> Result<PatentResponse> {
    let store = db::open_store(config).await?;
    let result = service::get_patent(&store, id).await;
    store.pool().close().await;
    Ok(PatentResponse::from(&result?))
}

pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let patent = get_patent(config, id).await?;

    println!("--- Patent ---");
    println!("id:          {}", patent.id);
    println!("title:       {}", patent.title);
    println!("authors:     {}", patent.authors);
    println!("date:        {}", patent.date.as_deref().unwrap_or("unknown"));
    println!();
    println!("--- Description ---");
    println!("{}", patent.description);

    Ok(())
}
