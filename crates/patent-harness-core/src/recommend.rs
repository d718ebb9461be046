//! Content-similarity recommendation ranker.
//!
//! # Algorithm
//!
//! 1. Empty pool → no recommendations.
//! 2. Vectorize `[target] + pool` once (target at index 0).
//! 3. Score each pool document against the target (cosine).
//! 4. Keep scores strictly above `threshold`.
//! 5. Stable sort by score (desc); ties keep pool order.
//! 6. Truncate to `top_k`.
//! 7. Round scores to three decimals for display. Ordering uses the
//!    unrounded values.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::models::{Patent, PatentResponse, RecommendResponse, RecommendedPatent};
use crate::similarity::cosine_similarity;
use crate::vectorize::vectorize;

pub const DEFAULT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_TOP_K: usize = 5;

/// Ranking parameters for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendParams {
    /// Candidates must score strictly above this.
    pub threshold: f64,
    /// Maximum number of recommendations returned.
    pub top_k: usize,
}

impl Default for RecommendParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl RecommendParams {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() {
            return Err(Error::invalid(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    pub patent: &'a Patent,
    /// Unrounded cosine similarity.
    pub raw_score: f64,
    /// `raw_score` rounded to three decimals.
    pub similarity_score: f64,
}

/// The target echoed back with its ranked recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations<'a> {
    pub target: &'a Patent,
    pub items: Vec<Recommendation<'a>>,
}

impl Recommendations<'_> {
    pub fn to_response(&self) -> RecommendResponse {
        RecommendResponse {
            target_patent: PatentResponse::from(self.target),
            recommendations: self
                .items
                .iter()
                .map(|r| RecommendedPatent {
                    patent: PatentResponse::from(r.patent),
                    similarity_score: r.similarity_score,
                })
                .collect(),
        }
    }
}

/// Round to three decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Rank `pool` by content similarity to `target`.
pub fn recommend<'a>(
    target: &'a Patent,
    pool: &'a [Patent],
    params: &RecommendParams,
) -> Result<Recommendations<'a>> {
    params.validate()?;

    if pool.is_empty() || params.top_k == 0 {
        return Ok(Recommendations {
            target,
            items: Vec::new(),
        });
    }

    let texts: Vec<String> = std::iter::once(target)
        .chain(pool.iter())
        .map(Patent::text)
        .collect();
    let matrix = vectorize(&texts);
    let target_vec = &matrix.vectors[0];

    let mut scored: Vec<(&'a Patent, f64)> = Vec::with_capacity(pool.len());
    for (patent, vec) in pool.iter().zip(&matrix.vectors[1..]) {
        let score = cosine_similarity(target_vec, vec)?;
        if score > params.threshold {
            scored.push((patent, score));
        }
    }

    // sort_by is stable: equal scores keep pool order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(params.top_k);

    let items = scored
        .into_iter()
        .map(|(patent, raw_score)| Recommendation {
            patent,
            raw_score,
            similarity_score: round_score(raw_score),
        })
        .collect();

    Ok(Recommendations { target, items })
}
