//! Content-similarity recommendations for the CLI.

use anyhow::Result;

use patent_harness_core::models::RecommendResponse;
use patent_harness_core::service;

use crate::config::Config;
use crate::db;

/// Recommend patents similar to `id`, with optional parameter overrides.
pub async fn recommend_patents(
    config: &Config,
    id: &str,
    threshold: Option<f64>,
    top_k: Option<usize>,
) -> Result<RecommendResponse> {
    let params = config.recommend.params(threshold, top_k);
    let store = db::open_store(config).await?;
    let result =
        service::recommend_for_id(&store, id, config.recommend.candidate_limit, &params).await;
    store.pool().close().await;
    Ok(result?)
}

pub async fn run_recommend(
    config: &Config,
    id: &str,
    threshold: Option<f64>,
    top_k: Option<usize>,
    json: bool,
) -> Result<()> {
    let resp = recommend_patents(config, id, threshold, top_k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    println!("Target: {} ({})", resp.target_patent.title, resp.target_patent.id);
    println!();
    if resp.recommendations.is_empty() {
        println!("No similar patents found.");
        return Ok(());
    }
    for (i, rec) in resp.recommendations.iter().enumerate() {
        println!("{}. [{:.3}] {}", i + 1, rec.similarity_score, rec.patent.title);
        println!("    id: {}", rec.patent.id);
    }

    Ok(())
}
