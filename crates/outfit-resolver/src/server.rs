//! HTTP server for the outfit resolver
//!
//! Provides /health and /outfit (GET with query parameters, POST with a
//! JSON body — the two inbound shapes the deployed handlers accepted).

use crate::error::ResolveError;
use crate::orchestrator::CacheOrchestrator;
use crate::types::{Disambiguators, HealthResponse, ProductRecord, ResolveRequest};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub orchestrator: CacheOrchestrator,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(orchestrator: CacheOrchestrator) -> Self {
        Self {
            orchestrator,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Query parameters for `GET /outfit`
#[derive(Deserialize)]
pub struct OutfitQuery {
    /// Comma-separated category identifiers
    categories: Option<String>,
    timestamp: Option<i64>,
    #[serde(rename = "randomSeed")]
    random_seed: Option<String>,
}

/// JSON body for `POST /outfit`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitBody {
    #[serde(default)]
    category_array: Vec<String>,
    timestamp: Option<i64>,
    random_seed: Option<String>,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/outfit", get(get_outfit).post(post_outfit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
    })
}

/// Resolve a product via query parameters
async fn get_outfit(
    State(state): State<SharedState>,
    Query(params): Query<OutfitQuery>,
) -> Result<Json<ProductRecord>, ResolveError> {
    let categories = params
        .categories
        .map(|s| s.split(',').map(|c| c.trim().to_string()).collect())
        .unwrap_or_default();

    let request = build_request(categories, params.timestamp, params.random_seed)?;
    let record = state.orchestrator.resolve(&request).await?;
    Ok(Json(record))
}

/// Resolve a product via JSON body
async fn post_outfit(
    State(state): State<SharedState>,
    Json(body): Json<OutfitBody>,
) -> Result<Json<ProductRecord>, ResolveError> {
    let request = build_request(body.category_array, body.timestamp, body.random_seed)?;
    let record = state.orchestrator.resolve(&request).await?;
    Ok(Json(record))
}

fn build_request(
    categories: Vec<String>,
    timestamp: Option<i64>,
    random_seed: Option<String>,
) -> Result<ResolveRequest, ResolveError> {
    let categories: Vec<String> = categories
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .collect();

    if categories.is_empty() {
        return Err(ResolveError::BadRequest(
            "categoryArray is required".to_string(),
        ));
    }

    let disambiguators = match (timestamp, random_seed) {
        (Some(timestamp), Some(seed)) => Some(Disambiguators { timestamp, seed }),
        (None, None) => None,
        _ => {
            return Err(ResolveError::BadRequest(
                "timestamp and randomSeed must be supplied together".to_string(),
            ))
        }
    };

    Ok(ResolveRequest {
        categories,
        disambiguators,
    })
}
