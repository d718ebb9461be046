//! # Patent Harness
//!
//! Content-based patent recommendations over a local SQLite collection.
//!
//! Patents are loaded from scraped JSON, stored in SQLite, and compared by
//! TF-IDF cosine similarity over `title + description`. The ranking itself
//! lives in the `patent-harness-core` crate and is pure; this crate adds
//! storage, configuration, the CLI commands, and the HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────┐   ┌────────────────────┐
//! │ JSON files │──▶│  SQLite  │──▶│ TF-IDF + cosine    │
//! │  (ingest)  │   │ patents  │   │ (core::recommend)  │
//! └────────────┘   └────┬─────┘   └─────────┬──────────┘
//!                       │                   │
//!                       ▼                   ▼
//!                  ┌──────────┐       ┌──────────┐
//!                  │   CLI    │       │   HTTP   │
//!                  │(patents) │       │  (axum)  │
//!                  └──────────┘       └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite-backed `PatentStore` |
//! | [`ingest`] | JSON patent loader |
//! | [`search`] | Field-filtered search |
//! | [`get`] | Patent lookup |
//! | [`recommend`] | Similar-patent recommendations |
//! | [`stats`] | Collection statistics |
//! | [`server`] | HTTP API |

pub mod config;
pub mod db;
pub mod get;
pub mod ingest;
pub mod migrate;
pub mod recommend;
pub mod search;
pub mod server;
pub mod sqlite_store;
pub mod stats;
