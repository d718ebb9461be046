//! Storage abstraction for Patent Harness.
//!
//! The [`PatentStore`] trait defines the data fetches the search and
//! recommendation pipeline needs, enabling pluggable backends (SQLite in
//! the app crate, in-memory here).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::filter::PatentFilter;
use crate::models::Patent;

/// Aggregate counts over the stored collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatentStats {
    pub total: i64,
    pub without_description: i64,
    /// `(first two characters of id, count)`, by count desc then prefix.
    pub id_prefixes: Vec<(String, i64)>,
}

/// Abstract storage backend for patents.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`upsert_patent`](PatentStore::upsert_patent) | Insert a patent unless its id exists |
/// | [`get_patent`](PatentStore::get_patent) | Fetch one patent by id |
/// | [`candidate_pool`](PatentStore::candidate_pool) | Recommendation candidates |
/// | [`search`](PatentStore::search) | Field-filtered search |
/// | [`stats`](PatentStore::stats) | Collection statistics |
#[async_trait]
pub trait PatentStore: Send + Sync {
    /// Insert `patent`. Returns `false` if a patent with the same id already
    /// exists; the existing record is left untouched.
    async fn upsert_patent(&self, patent: &Patent) -> Result<bool>;

    async fn get_patent(&self, id: &str) -> Result<Option<Patent>>;

    /// Up to `limit` patents other than `exclude_id`, ordered by id.
    async fn candidate_pool(&self, exclude_id: &str, limit: usize) -> Result<Vec<Patent>>;

    /// Patents matching `filter`, ordered by id, at most `limit`.
    ///
    /// An empty filter returns no rows.
    async fn search(&self, filter: &PatentFilter, limit: usize) -> Result<Vec<Patent>>;

    async fn stats(&self) -> Result<PatentStats>;
}
