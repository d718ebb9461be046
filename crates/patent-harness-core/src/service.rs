//! Store-backed entry points shared by the CLI and HTTP frontends.
//!
//! These functions fetch through a [`PatentStore`], then hand owned data to
//! the pure ranker. Fetch failures surface before any ranking runs.

use crate::error::{Error, Result};
use crate::filter::PatentFilter;
use crate::models::{Patent, RecommendResponse};
use crate::recommend::{recommend, RecommendParams};
use crate::store::PatentStore;

/// Fetch a patent or fail with [`Error::NotFound`].
pub async fn get_patent<S: PatentStore + ?Sized>(store: &S, id: &str) -> Result<Patent> {
    store
        .get_patent(id)
        .await
        .map_err(Error::Store)?
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

/// Target and candidate pool for one recommendation request.
#[derive(Debug, Clone)]
pub struct RecommendInput {
    pub target: Patent,
    pub pool: Vec<Patent>,
}

impl RecommendInput {
    /// Run the ranker and build the response body.
    pub fn rank(&self, params: &RecommendParams) -> Result<RecommendResponse> {
        Ok(recommend(&self.target, &self.pool, params)?.to_response())
    }
}

/// Fetch the target and up to `candidate_limit` candidates.
pub async fn fetch_recommend_input<S: PatentStore + ?Sized>(
    store: &S,
    id: &str,
    candidate_limit: usize,
) -> Result<RecommendInput> {
    let target = get_patent(store, id).await?;
    let pool = store
        .candidate_pool(id, candidate_limit)
        .await
        .map_err(Error::Store)?;
    Ok(RecommendInput { target, pool })
}

/// Fetch and rank in one step.
pub async fn recommend_for_id<S: PatentStore + ?Sized>(
    store: &S,
    id: &str,
    candidate_limit: usize,
    params: &RecommendParams,
) -> Result<RecommendResponse> {
    params.validate()?;
    fetch_recommend_input(store, id, candidate_limit)
        .await?
        .rank(params)
}

/// Validate `filter` and run it against the store.
pub async fn search_patents<S: PatentStore + ?Sized>(
    store: &S,
    filter: &PatentFilter,
    limit: usize,
) -> Result<Vec<Patent>> {
    filter.validate()?;
    if filter.is_empty() {
        return Ok(Vec::new());
    }
    store.search(filter, limit).await.map_err(Error::Store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn patent(id: &str, title: &str, description: &str) -> Patent {
        Patent {
            id: id.to_string(),
            title: title.to_string(),
            authors: "Inventor".to_string(),
            date: None,
            description: Some(description.to_string()),
        }
    }

    fn store() -> InMemoryStore {
        InMemoryStore::with_patents(vec![
            patent(
                "US10123456",
                "Improved Solar Panel with Enhanced Energy Conversion",
                "A solar panel design that increases energy conversion efficiency by 25% using a novel photovoltaic material.",
            ),
            patent(
                "US10456789",
                "Quantum Cryptography Method",
                "A secure communication method using quantum entanglement to detect eavesdropping attempts.",
            ),
            patent(
                "US10890123",
                "Energy Efficient Refrigeration Technology",
                "A cooling system that reduces energy consumption by 40% through a novel thermodynamic cycle.",
            ),
        ])
    }

    #[tokio::test]
    async fn test_recommend_for_id() {
        let resp = recommend_for_id(&store(), "US10123456", 100, &RecommendParams::default())
            .await
            .unwrap();
        assert_eq!(resp.target_patent.id, "US10123456");
        assert!(resp
            .recommendations
            .iter()
            .all(|r| r.patent.id != "US10123456"));
        assert_eq!(resp.recommendations[0].patent.id, "US10890123");
    }

    #[tokio::test]
    async fn test_recommend_missing_target() {
        let err = recommend_for_id(&store(), "nope", 100, &RecommendParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(ref id) if id == "nope"));
    }

    #[tokio::test]
    async fn test_recommend_single_patent_store() {
        let store = InMemoryStore::with_patents(vec![patent("US1", "Solar", "panel")]);
        let resp = recommend_for_id(&store, "US1", 100, &RecommendParams::default())
            .await
            .unwrap();
        assert!(resp.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_search_validates_filter() {
        let filter = PatentFilter {
            date: Some("yesterday".into()),
            ..Default::default()
        };
        let err = search_patents(&store(), &filter, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_search_empty_filter() {
        let hits = search_patents(&store(), &PatentFilter::default(), 10)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
