//! SQLite-backed [`PatentStore`] implementation.
//!
//! Filter semantics mirror [`PatentFilter::matches`]. SQLite `LIKE` only
//! folds ASCII case, so `id`, `title`, and `authors` are also stored
//! lowercased (`*_lc` columns) and matched against lowercased binds.
//! `%`, `_`, and `\` in user input are escaped so they match literally.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use patent_harness_core::filter::PatentFilter;
use patent_harness_core::models::Patent;
use patent_harness_core::store::{PatentStats, PatentStore};

/// SQLite implementation of the [`PatentStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

const COLUMNS: &str = "id, title, authors, date, description";

fn row_to_patent(row: &SqliteRow) -> Patent {
    let date: Option<String> = row.get("date");
    Patent {
        id: row.get("id"),
        title: row.get("title"),
        authors: row.get("authors"),
        date: date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        description: row.get("description"),
    }
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// SQLite reads a negative `LIMIT` as unbounded, so saturate instead of wrapping.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Build the WHERE clause and its bind values for `filter`.
fn filter_clause(filter: &PatentFilter) -> (String, Vec<String>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    for (field, value) in filter.fields() {
        let Some(value) = value else { continue };
        let contains = format!("%{}%", escape_like(&value.to_lowercase()));
        match field {
            "query" => {
                clauses.push(
                    "(id_lc LIKE ? ESCAPE '\\' OR title_lc LIKE ? ESCAPE '\\' \
                     OR authors_lc LIKE ? ESCAPE '\\' OR COALESCE(date, '') LIKE ? ESCAPE '\\')"
                        .to_string(),
                );
                binds.extend(std::iter::repeat(contains).take(4));
            }
            "date" => {
                clauses.push("date LIKE ? ESCAPE '\\'".to_string());
                binds.push(format!("{}%", escape_like(value)));
            }
            column => {
                clauses.push(format!("{}_lc LIKE ? ESCAPE '\\'", column));
                binds.push(contains);
            }
        }
    }

    (clauses.join(" AND "), binds)
}

#[async_trait]
impl PatentStore for SqliteStore {
    async fn upsert_patent(&self, patent: &Patent) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO patents
                (id, title, authors, date, description, id_lc, title_lc, authors_lc)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&patent.id)
        .bind(&patent.title)
        .bind(&patent.authors)
        .bind(patent.date_string())
        .bind(&patent.description)
        .bind(patent.id.to_lowercase())
        .bind(patent.title.to_lowercase())
        .bind(patent.authors.to_lowercase())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_patent(&self, id: &str) -> Result<Option<Patent>> {
        let row = sqlx::query(&format!("SELECT {} FROM patents WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_patent))
    }

    async fn candidate_pool(&self, exclude_id: &str, limit: usize) -> Result<Vec<Patent>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM patents WHERE id != ? ORDER BY id ASC LIMIT ?",
            COLUMNS
        ))
        .bind(exclude_id)
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_patent).collect())
    }

    async fn search(&self, filter: &PatentFilter, limit: usize) -> Result<Vec<Patent>> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let (where_clause, binds) = filter_clause(filter);
        let sql = format!(
            "SELECT {} FROM patents WHERE {} ORDER BY id ASC LIMIT ?",
            COLUMNS, where_clause
        );
        let mut query = sqlx::query(&sql);
        for b in &binds {
            query = query.bind(b);
        }
        let rows = query.bind(sql_limit(limit)).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_patent).collect())
    }

    async fn stats(&self) -> Result<PatentStats> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patents")
            .fetch_one(&self.pool)
            .await?;
        let without_description: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM patents WHERE description IS NULL OR TRIM(description) = ''",
        )
        .fetch_one(&self.pool)
        .await?;
        let rows = sqlx::query(
            r#"
            SELECT substr(id, 1, 2) AS prefix, COUNT(*) AS n
            FROM patents
            WHERE length(id) >= 2
            GROUP BY prefix
            ORDER BY n DESC, prefix ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(PatentStats {
            total,
            without_description,
            id_prefixes: rows
                .iter()
                .map(|r| (r.get::<String, _>("prefix"), r.get::<i64, _>("n")))
                .collect(),
        })
    }
}
