//! Patent records and their JSON response shapes.

use chrono::NaiveDate;
use serde::Serialize;

/// Shown in place of a missing description.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// A patent record as stored and fetched.
///
/// `authors` is the comma-separated inventor list. `date` is the grant date
/// when known.
#[derive(Debug, Clone, PartialEq)]
pub struct Patent {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Patent {
    /// Free text used for vectorization: title followed by description.
    pub fn text(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => format!("{} {}", self.title, desc),
            _ => self.title.clone(),
        }
    }

    /// Date as `YYYY-MM-DD`, if present.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// Patent JSON object returned by search, get, and recommendation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatentResponse {
    pub id: String,
    pub title: String,
    pub authors: String,
    /// `YYYY-MM-DD`, or `null` when unknown.
    pub date: Option<String>,
    pub description: String,
}

impl From<&Patent> for PatentResponse {
    fn from(p: &Patent) -> Self {
        let description = match p.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => DESCRIPTION_PLACEHOLDER.to_string(),
        };
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            authors: p.authors.clone(),
            date: p.date_string(),
            description,
        }
    }
}

/// A recommended patent with its display score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedPatent {
    #[serde(flatten)]
    pub patent: PatentResponse,
    /// Cosine similarity rounded to three decimals.
    pub similarity_score: f64,
}

/// Body of the recommendation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendResponse {
    pub target_patent: PatentResponse,
    pub recommendations: Vec<RecommendedPatent>,
}
