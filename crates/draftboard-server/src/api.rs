//! HTTP API for the draft board
//!
//! Provides:
//! - Retrieval endpoint returning both documents (`GET /api/store`)
//! - Projections computed per request (`/api/available`, `/api/rosters`, `/api/summary`)
//! - Static access to the data directory (`/data/*`)
//! - Health check (`GET /health`)
//!
//! Every request re-reads the documents; nothing is cached, and every
//! response carries `Cache-Control: no-store`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, get_service},
    Json, Router,
};
use draftboard_core::projection::{
    available_players, draft_summary, filter_by_name, team_rosters, DraftSummary, TeamRoster,
};
use draftboard_core::{DraftSnapshot, DraftSource, Player, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub source: Arc<dyn DraftSource>,
}

impl ApiState {
    pub fn new(source: Arc<dyn DraftSource>) -> Self {
        ApiState { source }
    }

    async fn load(&self) -> Result<DraftSnapshot, ApiError> {
        self.source.load().await.map_err(|error| ApiError {
            error,
            location: self.source.describe(),
        })
    }
}

/// Build the router, serving `/data/*` from `data_dir`.
pub fn router(state: ApiState, data_dir: impl Into<PathBuf>) -> Router {
    // The board is read-only and public; allow any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/store", get(get_store))
        .route("/api/available", get(get_available))
        .route("/api/rosters", get(get_rosters))
        .route("/api/summary", get(get_summary))
        .nest_service("/data", get_service(ServeDir::new(data_dir.into())))
        .with_state(state)
        .layer(middleware::from_fn(no_store))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Errors
// ============================================================================

/// A failed load, rendered as `500 { "error", "hint" }`.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ApiError {
    #[source]
    error: StoreError,
    location: String,
}

impl ApiError {
    pub fn hint(&self) -> String {
        match &self.error {
            StoreError::DataUnavailable { .. } => format!(
                "Check that the player catalog and draft state exist in {}.",
                self.location
            ),
            StoreError::DataMalformed { .. } => format!(
                "Check that the player catalog and draft state in {} are valid JSON.",
                self.location
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Request failed: {}", self.error);
        let body = json!({
            "error": self.error.to_string(),
            "hint": self.hint(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /api/store: both documents, exactly as loaded.
pub async fn get_store(State(state): State<ApiState>) -> Result<Json<DraftSnapshot>, ApiError> {
    Ok(Json(state.load().await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct AvailableQuery {
    /// Case-insensitive substring of the display name.
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
struct AvailableBody<'a> {
    players: Vec<&'a Player>,
    total: usize,
    available: usize,
}

/// GET /api/available?q=: unpicked players, optionally filtered by name.
///
/// `available` counts every unpicked player; `players` holds the filtered list.
pub async fn get_available(
    State(state): State<ApiState>,
    Query(query): Query<AvailableQuery>,
) -> Result<Response, ApiError> {
    let snapshot = state.load().await?;
    let available = available_players(&snapshot.players, &snapshot.state);
    let players = match query.q.as_deref() {
        Some(q) => filter_by_name(&available, q),
        None => available.clone(),
    };

    let body = AvailableBody {
        players,
        total: snapshot.players.len(),
        available: available.len(),
    };
    Ok(Json(body).into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RostersBody<'a> {
    round: u32,
    on_clock_team_id: Option<&'a str>,
    teams: Vec<TeamRoster<'a>>,
}

/// GET /api/rosters: every team with its players in pick order.
pub async fn get_rosters(State(state): State<ApiState>) -> Result<Response, ApiError> {
    let snapshot = state.load().await?;
    let rosters = team_rosters(&snapshot.players, &snapshot.state);

    let body = RostersBody {
        round: snapshot.state.round,
        on_clock_team_id: snapshot.state.on_clock_team_id.as_deref(),
        teams: rosters.into_vec(),
    };
    Ok(Json(body).into_response())
}

/// GET /api/summary
pub async fn get_summary(State(state): State<ApiState>) -> Result<Json<DraftSummary>, ApiError> {
    let snapshot = state.load().await?;
    Ok(Json(draft_summary(&snapshot.players, &snapshot.state)))
}

// ============================================================================
// Middleware
// ============================================================================

async fn no_store(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
