//! JSON HTTP API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/search` | Field-filtered search, body is a filter object |
//! | `GET`  | `/patents/{id}` | Fetch one patent |
//! | `GET`  | `/recommendations/{id}` | Similar patents, `?threshold=&top_k=` optional |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "patent not found: US1" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//! Internal errors are logged and answered with a generic message.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use patent_harness_core::filter::PatentFilter;
use patent_harness_core::models::{PatentResponse, RecommendResponse};
use patent_harness_core::service;
use patent_harness_core::Error as CoreError;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    /// One pool for the lifetime of the server.
    store: Arc<SqliteStore>,
}

/// Build the router over an already-open store.
pub fn router(config: Arc<Config>, store: Arc<SqliteStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/search", post(handle_search))
        .route("/patents/{id}", get(handle_get_patent))
        .route("/recommendations/{id}", get(handle_recommendations))
        .layer(cors)
        .with_state(AppState { config, store })
}

/// Starts the HTTP server on `[server].bind` and runs until the process
/// is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let store = Arc::new(db::open_store(config).await?);
    let app = router(Arc::new(config.clone()), store);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "server listening");
    println!("Patent server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Logs the cause and hides it from the client.
fn internal(cause: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %cause, "request failed");
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: "internal server error".to_string(),
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(_) => not_found(err.to_string()),
            CoreError::InvalidInput(_) => bad_request(err.to_string()),
            CoreError::Store(cause) => internal(format!("{:#}", cause)),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /search ============

async fn handle_search(
    State(state): State<AppState>,
    body: Result<Json<PatentFilter>, JsonRejection>,
) -> Result<Json<Vec<PatentResponse>>, AppError> {
    let Json(filter) = body.map_err(|e| bad_request(e.body_text()))?;
    let patents =
        service::search_patents(state.store.as_ref(), &filter, state.config.search.limit).await?;
    Ok(Json(patents.iter().map(PatentResponse::from).collect()))
}

// ============ GET /patents/{id} ============

async fn handle_get_patent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatentResponse>, AppError> {
    let patent = service::get_patent(state.store.as_ref(), &id).await?;
    Ok(Json(PatentResponse::from(&patent)))
}

// ============ GET /recommendations/{id} ============

#[derive(Debug, Default, Deserialize)]
struct RecommendQuery {
    threshold: Option<f64>,
    top_k: Option<usize>,
}

async fn handle_recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<RecommendQuery>, QueryRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;
    let params = state.config.recommend.params(query.threshold, query.top_k);
    params.validate()?;

    let input = service::fetch_recommend_input(
        state.store.as_ref(),
        &id,
        state.config.recommend.candidate_limit,
    )
    .await?;

    // Ranking is CPU-bound; keep it off the async workers.
    let resp = tokio::task::spawn_blocking(move || input.rank(&params))
        .await
        .map_err(internal)??;

    tracing::debug!(
        id = %id,
        recommendations = resp.recommendations.len(),
        "recommendations served"
    );
    Ok(Json(resp))
}
