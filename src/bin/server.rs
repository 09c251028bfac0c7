//! Frame Solver HTTP Server

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use frame_solver::api::{
    self, AnalysisRequest, EvaluateRequest, HealthResponse, PresetRequest, Response,
};
use frame_solver::error::FrameResult;

const DEFAULT_ADDR: &str = "0.0.0.0:8086";

async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Run a solver call on the blocking pool and wrap it in the response envelope
async fn respond<T, F>(job: F) -> (StatusCode, Json<Response<T>>)
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> FrameResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(Ok(results)) => (StatusCode::OK, Json(Response::from_result(Ok(results)))),
        Ok(Err(e)) => {
            warn!("request rejected: {e}");
            (StatusCode::BAD_REQUEST, Json(Response::failure(e.to_string())))
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Response::failure(format!("solver task failed: {e}"))),
        ),
    }
}

async fn analyze(Json(request): Json<AnalysisRequest>) -> impl IntoResponse {
    respond(move || api::run_analysis(request)).await
}

async fn evaluate(Json(request): Json<EvaluateRequest>) -> impl IntoResponse {
    respond(move || api::run_evaluate(request)).await
}

async fn presets(Json(request): Json<PresetRequest>) -> impl IntoResponse {
    respond(move || api::run_preset(request)).await
}

fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/evaluate", post(evaluate))
        .route("/api/v1/presets", post(presets))
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let addr: SocketAddr = std::env::var("FRAME_SOLVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("FRAME_SOLVER_ADDR is not a socket address")?;

    info!("Frame Solver Server listening on http://{}", addr);
    info!("  Health check: GET  /health");
    info!("  Analysis:     POST /api/v1/analyze");
    info!("  Probe:        POST /api/v1/evaluate");
    info!("  Presets:      POST /api/v1/presets");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router())
        .await
        .context("server terminated")?;
    Ok(())
}
