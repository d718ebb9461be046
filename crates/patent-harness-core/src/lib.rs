//! # Patent Harness Core
//!
//! Shared, I/O-free logic for Patent Harness: the patent data model, the
//! TF-IDF vectorizer, cosine similarity, the recommendation ranker, the
//! search filter, and the store abstraction.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. Everything the ranker needs is built fresh
//! per call, so the functions here can be invoked concurrently without
//! shared state.
//!
//! # Recommendation pipeline
//!
//! ```text
//! target + pool ──▶ tokenize ──▶ vectorize (shared vocabulary)
//!                                     │
//!                                     ▼
//!                  top-K ◀── sort ◀── threshold ◀── cosine vs target
//! ```

pub mod error;
pub mod filter;
pub mod models;
pub mod recommend;
pub mod service;
pub mod similarity;
pub mod store;
pub mod tokenize;
pub mod vectorize;

pub use error::{Error, Result};
pub use models::Patent;
pub use recommend::{recommend, RecommendParams, Recommendation, Recommendations};
