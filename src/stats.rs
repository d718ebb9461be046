//! Collection statistics.
//!
//! Prints how many patents are loaded, how many lack a description, and
//! how patent ids are distributed across their two-character prefixes
//! (country codes for real data).

use anyhow::Result;

use patent_harness_core::store::PatentStore;

use crate::config::Config;
use crate::db;

pub async fn run_stats(config: &Config) -> Result<()> {
    let store = db::open_store(config).await?;
    let stats = store.stats().await;
    store.pool().close().await;
    let stats = stats?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Patent Harness — Database Stats");
    println!("===============================");
    println!();
    println!("  Database:             {}", config.db.path.display());
    println!("  Size:                 {}", format_bytes(db_size));
    println!();
    println!("  Patents:              {}", stats.total);
    println!("  Without description:  {}", stats.without_description);

    if !stats.id_prefixes.is_empty() {
        println!();
        println!("  ID prefixes:");
        for (prefix, count) in &stats.id_prefixes {
            println!("    {}: {} patents", prefix, count);
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
