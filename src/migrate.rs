use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    create_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Create the `patents` table and its indexes if missing.
///
/// The `*_lc` columns hold Unicode-lowercased copies used by search.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patents (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            authors TEXT NOT NULL,
            date TEXT,
            description TEXT,
            id_lc TEXT NOT NULL,
            title_lc TEXT NOT NULL,
            authors_lc TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_patents_date ON patents(date)")
        .execute(pool)
        .await?;

    Ok(())
}
