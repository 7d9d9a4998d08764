//! REST endpoints for intake, health, plans and progress.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use super::responses::failure;
use crate::config::{PlanConfig, ServerConfig};
use crate::error::ProgressError;
use crate::ids::{IdProvider, UuidIds};
use crate::intake::{IntakeOrchestrator, IntakeOutcome};
use crate::progress::{ProgressTracker, ProgressUpdate};
use crate::store::{Store, open_store};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub intake: Arc<IntakeOrchestrator>,
    pub progress: Arc<ProgressTracker>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, ids: Arc<dyn IdProvider>, plan: PlanConfig) -> Self {
        Self {
            intake: Arc::new(IntakeOrchestrator::new(Arc::clone(&store), ids, plan)),
            progress: Arc::new(ProgressTracker::new(Arc::clone(&store))),
            store,
        }
    }

    /// Open the configured store and wire the services with UUID ids.
    pub async fn from_config(config: &ServerConfig) -> crate::error::Result<Self> {
        let store = open_store(config).await?;
        Ok(Self::new(store, Arc::new(UuidIds), config.plan))
    }
}

/// Build the Axum router with every API route, CORS and request tracing.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/intake", any(intake))
        .route("/api/health", get(health))
        .route("/api/progress", post(record_progress))
        .route("/api/progress/{plan_id}", get(progress_summary))
        .route("/api/plans/{plan_id}", get(get_plan))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

// ── Intake ──────────────────────────────────────────────────────────────

/// /api/intake — POST builds a plan, OPTIONS is a preflight, anything else
/// is 405.
async fn intake(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    match state.intake.handle(&method, &body).await {
        Ok(IntakeOutcome::Preflight) => StatusCode::OK.into_response(),
        Ok(IntakeOutcome::Created(plan)) => {
            Json(json!({"success": true, "plan": plan})).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// ── Health ──────────────────────────────────────────────────────────────

/// GET /api/health
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let store_status = match state.store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            error!(error = %e, backend = state.store.backend_name(), "Store health check failed");
            "down"
        }
    };
    let healthy = store_status == "up";

    let body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "timestamp": Utc::now(),
        "services": {
            "store": {
                "backend": state.store.backend_name(),
                "status": store_status,
            },
            "templater": {
                "status": "up",
                "multiAgent": state.intake.plan_config().multi_agent,
            },
        },
        "version": env!("CARGO_PKG_VERSION"),
    });

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

// ── Plans ───────────────────────────────────────────────────────────────

/// GET /api/plans/{plan_id}
async fn get_plan(State(state): State<AppState>, Path(plan_id): Path<String>) -> Response {
    match state.store.get_plan(&plan_id).await {
        Ok(Some(plan)) => Json(json!({"success": true, "plan": plan})).into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Plan not found"),
        Err(e) => {
            error!(plan_id = %plan_id, error = %e, "Failed to load plan");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

// ── Progress ────────────────────────────────────────────────────────────

/// POST /api/progress
async fn record_progress(State(state): State<AppState>, body: Bytes) -> Response {
    let update: ProgressUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            return ProgressError::Validation {
                message: format!("Malformed request body: {e}"),
                required: vec!["planId", "day"],
            }
            .into_response();
        }
    };

    match state.progress.record(update).await {
        Ok(progress) => Json(json!({"success": true, "progress": progress})).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /api/progress/{plan_id}
async fn progress_summary(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Response {
    match state.progress.summary(&plan_id).await {
        Ok(summary) => Json(json!({"success": true, "summary": summary})).into_response(),
        Err(e) => e.into_response(),
    }
}
