use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::{ApiResult, CredentialStatus, GolfbertClient};

#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<GolfbertClient>,
}

impl AppState {
    #[inline]
    pub fn new(client: GolfbertClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/courses/{course_id}/holes", get(course_holes))
        .route("/api/holes/{hole_id}/polygons", get(hole_polygons))
        .route("/api/test", get(test_connection))
        .route("/api/config", get(config_status))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.listen` and serve until ctrl-c.
pub async fn serve(config: Config) -> Result<()> {
    let client = GolfbertClient::from_config(&config)?;
    let app = router(AppState::new(client));

    let listener = TcpListener::bind(&config.listen).await?;
    info!(listen = %config.listen, upstream = %config.base_url, "golfbert proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

async fn course_holes(State(state): State<AppState>, Path(course_id): Path<String>) -> Response {
    let Some(course_id) = parse_id(&course_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.client.course_holes(course_id).await {
        ApiResult::Success(data) => Json(data).into_response(),
        _ => error_response("Failed to fetch course holes"),
    }
}

async fn hole_polygons(State(state): State<AppState>, Path(hole_id): Path<String>) -> Response {
    let Some(hole_id) = parse_id(&hole_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.client.hole_polygons(hole_id).await {
        ApiResult::Success(data) => Json(data).into_response(),
        _ => error_response("Failed to fetch hole polygons"),
    }
}

async fn test_connection(State(state): State<AppState>) -> Response {
    match state.client.probe().await {
        ApiResult::Success(data) => {
            Json(json!({ "status": "success", "sample_data": data })).into_response()
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "message": "API connection failed" })),
        )
            .into_response(),
    }
}

async fn config_status(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(state.client.credentials().status())
}

// Ids must be integers, anything else is an unknown route.
#[inline]
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

#[inline]
fn error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
