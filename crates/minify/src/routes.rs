//! HTTP routes: form page, minify endpoint, health check.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Form, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use minify_core::Pipeline;

use crate::config::ServiceMeta;
use crate::pages;

/// Shared state across handlers.
pub struct AppState {
    pub pipeline: Pipeline,
    pub meta: ServiceMeta,
}

/// Build the axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/minify", post(minify))
        .route("/.well-known/health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
}

async fn index() -> Html<String> {
    Html(pages::index())
}

/// Run the pipeline for one submission and return the panel fragment.
async fn minify(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let panels = state.pipeline.handle(&fields).await;
    Html(pages::panel_fragment(&panels))
}

/// Health check in `application/health+json` shape.
async fn health(State(state): State<Arc<AppState>>) -> Response {
    let body = serde_json::json!({
        "version": state.meta.version_major,
        "releaseId": state.meta.release_id,
        "time": Utc::now().to_rfc3339(),
        "status": "pass",
    });

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/health+json")],
        body.to_string(),
    )
        .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found())).into_response()
}

/// Logging middleware
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    if status >= 500 {
        tracing::error!("{} {} -> {} in {:.1}ms", method, path, status, latency_ms);
    } else if status >= 400 {
        tracing::warn!("{} {} -> {} in {:.1}ms", method, path, status, latency_ms);
    } else {
        tracing::info!("{} {} -> {} in {:.1}ms", method, path, status, latency_ms);
    }

    response
}
