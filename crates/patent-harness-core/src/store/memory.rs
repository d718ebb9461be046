//! In-memory [`PatentStore`] implementation for testing and embedding.
//!
//! Uses a `BTreeMap` behind `std::sync::RwLock`, so iteration is already in
//! id order.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::filter::PatentFilter;
use crate::models::Patent;

use super::{PatentStats, PatentStore};

/// In-memory patent store.
pub struct InMemoryStore {
    patents: RwLock<BTreeMap<String, Patent>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            patents: RwLock::new(BTreeMap::new()),
        }
    }

    /// Build a store pre-populated with `patents`.
    pub fn with_patents(patents: impl IntoIterator<Item = Patent>) -> Self {
        let map = patents.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            patents: RwLock::new(map),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl PatentStore for InMemoryStore {
    async fn upsert_patent(&self, patent: &Patent) -> Result<bool> {
        let mut patents = self.patents.write().map_err(|_| poisoned())?;
        if patents.contains_key(&patent.id) {
            return Ok(false);
        }
        patents.insert(patent.id.clone(), patent.clone());
        Ok(true)
    }

    async fn get_patent(&self, id: &str) -> Result<Option<Patent>> {
        let patents = self.patents.read().map_err(|_| poisoned())?;
        Ok(patents.get(id).cloned())
    }

    async fn candidate_pool(&self, exclude_id: &str, limit: usize) -> Result<Vec<Patent>> {
        let patents = self.patents.read().map_err(|_| poisoned())?;
        Ok(patents
            .values()
            .filter(|p| p.id != exclude_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search(&self, filter: &PatentFilter, limit: usize) -> Result<Vec<Patent>> {
        let patents = self.patents.read().map_err(|_| poisoned())?;
        Ok(patents
            .values()
            .filter(|p| filter.matches(p))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<PatentStats> {
        let patents = self.patents.read().map_err(|_| poisoned())?;
        let without_description = patents
            .values()
            .filter(|p| p.description.as_deref().map_or(true, |d| d.trim().is_empty()))
            .count() as i64;

        let mut prefixes: HashMap<String, i64> = HashMap::new();
        for id in patents.keys() {
            if id.chars().count() >= 2 {
                let prefix: String = id.chars().take(2).collect();
                *prefixes.entry(prefix).or_insert(0) += 1;
            }
        }
        let mut id_prefixes: Vec<(String, i64)> = prefixes.into_iter().collect();
        id_prefixes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Ok(PatentStats {
            total: patents.len() as i64,
            without_description,
            id_prefixes,
        })
    }
}
