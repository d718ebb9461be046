//! Field-filtered patent search.
//!
//! [`PatentFilter`] enumerates the recognized search fields. All matching
//! is case-insensitive substring matching, except `date`, which is a
//! `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` prefix. Provided fields are
//! AND-combined; `query` matches if any of id, title, authors, or date
//! contains it.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::Patent;

/// Search fields accepted by the search endpoint and CLI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PatentFilter {
    pub query: Option<String>,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub id: Option<String>,
    pub date: Option<String>,
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn is_date_prefix(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    let widths = [4, 2, 2];
    !parts.is_empty()
        && parts.len() <= widths.len()
        && parts
            .iter()
            .zip(widths)
            .all(|(p, w)| p.len() == w && p.chars().all(|c| c.is_ascii_digit()))
}

impl PatentFilter {
    /// Free-text filter matching any field.
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            query: Some(q.into()),
            ..Self::default()
        }
    }

    /// True if no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    /// Reject malformed fields. Currently only `date` has a shape.
    pub fn validate(&self) -> Result<()> {
        if let Some(date) = non_blank(&self.date) {
            if !is_date_prefix(date) {
                return Err(Error::invalid(format!(
                    "date must be YYYY, YYYY-MM, or YYYY-MM-DD, got '{}'",
                    date
                )));
            }
        }
        Ok(())
    }

    /// Trimmed, non-blank values keyed by field name.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("query", non_blank(&self.query)),
            ("title", non_blank(&self.title)),
            ("authors", non_blank(&self.authors)),
            ("id", non_blank(&self.id)),
            ("date", non_blank(&self.date)),
        ]
    }

    /// Reference matching semantics. An empty filter matches nothing.
    pub fn matches(&self, p: &Patent) -> bool {
        if self.is_empty() {
            return false;
        }
        let date = p.date_string().unwrap_or_default();

        if let Some(q) = non_blank(&self.query) {
            let any = contains_ci(&p.id, q)
                || contains_ci(&p.title, q)
                || contains_ci(&p.authors, q)
                || date.contains(q);
            if !any {
                return false;
            }
        }
        if let Some(t) = non_blank(&self.title) {
            if !contains_ci(&p.title, t) {
                return false;
            }
        }
        if let Some(a) = non_blank(&self.authors) {
            if !contains_ci(&p.authors, a) {
                return false;
            }
        }
        if let Some(id) = non_blank(&self.id) {
            if !contains_ci(&p.id, id) {
                return false;
            }
        }
        if let Some(d) = non_blank(&self.date) {
            if !date.starts_with(d) {
                return false;
            }
        }
        true
    }
}
