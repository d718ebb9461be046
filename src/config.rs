//! TOML configuration parsing and validation.
//!
//! ```toml
//! [db]
//! path = "./data/patents.sqlite"
//!
//! [recommend]
//! threshold = 0.05
//! top_k = 5
//! candidate_limit = 100
//!
//! [search]
//! limit = 50
//!
//! [server]
//! bind = "127.0.0.1:5000"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use patent_harness_core::recommend::{RecommendParams, DEFAULT_THRESHOLD, DEFAULT_TOP_K};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Maximum candidates fetched per request.
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            top_k: default_top_k(),
            candidate_limit: default_candidate_limit(),
        }
    }
}

impl RecommendConfig {
    /// Configured defaults with optional per-request overrides.
    pub fn params(&self, threshold: Option<f64>, top_k: Option<usize>) -> RecommendParams {
        RecommendParams {
            threshold: threshold.unwrap_or(self.threshold),
            top_k: top_k.unwrap_or(self.top_k),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_candidate_limit() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
        }
    }
}

fn default_search_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

/// Parse config text and apply validation rules.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

fn validate(config: &Config) -> Result<()> {
    let r = &config.recommend;
    if !r.threshold.is_finite() || !(0.0..1.0).contains(&r.threshold) {
        anyhow::bail!("recommend.threshold must be in [0.0, 1.0)");
    }
    if r.top_k < 1 {
        anyhow::bail!("recommend.top_k must be >= 1");
    }
    if r.candidate_limit < 1 {
        anyhow::bail!("recommend.candidate_limit must be >= 1");
    }
    if config.search.limit < 1 {
        anyhow::bail!("search.limit must be >= 1");
    }
    Ok(())
}
