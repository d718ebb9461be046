//! End-to-end tests for the HTTP API.
//!
//! Each test loads a small collection into a fresh SQLite database, starts
//! the server on a free port, and exercises it over real HTTP.

use patent_harness::config::{parse_config, Config};
use patent_harness::ingest::load_patents;
use patent_harness::migrate;
use patent_harness::server::run_server;
use patent_harness::db;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const PATENTS_JSON: &str = r#"[
  {"patent_id": "US10123456", "title": "Improved Solar Panel with Enhanced Energy Conversion",
   "authors": ["John Smith", "Jane Doe"], "date": "2019-05-15",
   "description": "A solar panel design that increases energy conversion efficiency by 25% using a novel photovoltaic material."},
  {"patent_id": "US10123457", "title": "Photovoltaic Solar Panel Array",
   "authors": ["Ada Park"], "date": "2020-01-08",
   "description": "A solar panel array with photovoltaic material that improves energy conversion."},
  {"patent_id": "US10456789", "title": "Quantum Cryptography Method",
   "authors": ["Alan Turing"], "date": "2018-11-22",
   "description": "A secure communication method using quantum entanglement to detect eavesdropping attempts."},
  {"patent_id": "US10890123", "title": "Energy Efficient Refrigeration Technology",
   "authors": "Grace Hopper", "date": "2020-03-10",
   "description": "A cooling system that reduces energy consumption by 40% through a novel thermodynamic cycle."}
]"#;

// ─── Helpers ────────────────────────────────────────────────────────

fn test_config_with_port(tmp: &TempDir, port: u16) -> Config {
    let db_path = tmp.path().join("patents.sqlite");
    let config_content = format!(
        r#"
[db]
path = "{}"

[recommend]
threshold = 0.05
top_k = 5

[server]
bind = "127.0.0.1:{}"
"#,
        db_path.display(),
        port
    );
    parse_config(&config_content).unwrap()
}

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

/// Migrate, load the sample collection, and start a server.
async fn start_server(tmp: &TempDir) -> (u16, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let cfg = test_config_with_port(tmp, port);

    migrate::run_migrations(&cfg).await.unwrap();
    let file = tmp.path().join("patents.json");
    fs::write(&file, PATENTS_JSON).unwrap();
    let store = db::open_store(&cfg).await.unwrap();
    let summary = load_patents(&store, &file).await.unwrap();
    assert_eq!(summary.inserted, 4);
    store.pool().close().await;

    let handle = tokio::spawn(async move {
        run_server(&cfg).await.ok();
    });
    wait_for_server(port).await;
    (port, handle)
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let tmp = TempDir::new().unwrap();
    let (port, handle) = start_server(&tmp).await;

    let body: Value = reqwest::get(format!("http://127.0.0.1:{}/health", port))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());

    handle.abort();
}

#[tokio::test]
async fn test_get_patent_and_not_found() {
    let tmp = TempDir::new().unwrap();
    let (port, handle) = start_server(&tmp).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://127.0.0.1:{}/patents/US10456789", port))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "Quantum Cryptography Method");
    assert_eq!(body["authors"], "Alan Turing");
    assert_eq!(body["date"], "2018-11-22");

    let resp = client
        .get(format!("http://127.0.0.1:{}/patents/US0000000", port))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "patent not found: US0000000");

    handle.abort();
}

#[tokio::test]
async fn test_search_endpoint() {
    let tmp = TempDir::new().unwrap();
    let (port, handle) = start_server(&tmp).await;
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/search", port);

    let resp = client
        .post(&url)
        .json(&json!({"title": "solar", "date": "2020"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["US10123457"]);

    // An empty filter matches nothing.
    let body: Value = client
        .post(&url)
        .json(&json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body.as_array().unwrap().is_empty());

    let resp = client
        .post(&url)
        .json(&json!({"date": "05/2019"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "bad_request");

    handle.abort();
}

#[tokio::test]
async fn test_recommendations_endpoint() {
    let tmp = TempDir::new().unwrap();
    let (port, handle) = start_server(&tmp).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://127.0.0.1:{}/recommendations/US10123456", port))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["target_patent"]["id"], "US10123456");
    let recs = body["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty());
    assert_eq!(recs[0]["id"], "US10123457");

    let scores: Vec<f64> = recs
        .iter()
        .map(|r| r["similarity_score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "scores: {:?}", scores);
    assert!(scores.iter().all(|s| *s > 0.05 && *s <= 1.0));
    assert!(recs.iter().all(|r| r["id"] != "US10123456"));

    // Overrides via query string.
    let body: Value = client
        .get(format!(
            "http://127.0.0.1:{}/recommendations/US10123456?top_k=1&threshold=0.0",
            port
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);

    let resp = client
        .get(format!("http://127.0.0.1:{}/recommendations/US10123456?top_k=-3", port))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("http://127.0.0.1:{}/recommendations/US0000000", port))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    handle.abort();
}

#[tokio::test]
async fn test_concurrent_recommendations_are_identical() {
    let tmp = TempDir::new().unwrap();
    let (port, handle) = start_server(&tmp).await;
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/recommendations/US10890123", port);

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            client
                .get(&url)
                .send()
                .await
                .unwrap()
                .json::<Value>()
                .await
                .unwrap()
        }));
    }

    let mut bodies = Vec::new();
    for t in tasks {
        bodies.push(t.await.unwrap());
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    handle.abort();
}
