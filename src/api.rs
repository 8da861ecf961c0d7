// HTTP API
// axum routes: /predict (classification), /analyze (detailed report), /config

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::{AnalysisReport, ClassificationResult, ErrorResponse, PredictRequest};
use crate::services::config_store::{AppConfig, EngineConfig};
use crate::services::detection::{DetectionSensitivity, Engine};
use crate::services::error::{AnalysisError, INTERNAL_FAILURE_MESSAGE};

/// Error payload returned as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if err.is_input_error() {
            err.to_string()
        } else {
            INTERNAL_FAILURE_MESSAGE.to_string()
        };
        Self { status, message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; every other body problem is a 400.
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

/// Request bodies may JSON-escape every character (`\uXXXX`), plus envelope.
fn body_limit(config: &EngineConfig) -> usize {
    config.max_input_chars.saturating_mul(6).saturating_add(4096)
}

pub fn router(engine: Arc<Engine>) -> Router {
    let limit = body_limit(engine.config());
    Router::new()
        .route("/predict", post(predict))
        .route("/analyze", post(analyze_detailed))
        .route("/config", get(get_config))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(engine)
}

fn parse_request(
    request_id: &str,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<PredictRequest, ApiError> {
    payload.map(|Json(req)| req).map_err(|rejection| {
        warn!(request_id, error = %rejection.body_text(), "request.rejected_body");
        ApiError::from(rejection)
    })
}

/// Move CPU-bound analysis onto the blocking pool. A panic there becomes an
/// internal failure; only the generic message reaches the client.
async fn run_blocking<T, F>(request_id: &str, job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, AnalysisError> + Send + 'static,
    T: Send + 'static,
{
    let outcome = match tokio::task::spawn_blocking(job).await {
        Ok(result) => result,
        Err(join_err) => Err(AnalysisError::Internal(format!("analysis task failed: {}", join_err))),
    };

    outcome.map_err(|err| {
        match &err {
            AnalysisError::Internal(detail) => {
                error!(request_id, detail = %detail, "analysis.internal_failure")
            }
            other => info!(request_id, error = %other, "analysis.rejected"),
        }
        ApiError::from(err)
    })
}

async fn predict(
    State(engine): State<Arc<Engine>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let req = parse_request(&request_id, payload)?;
    let sensitivity = DetectionSensitivity::from_option(req.sensitivity.as_deref());
    let t0 = Instant::now();
    info!(request_id = %request_id, chars = req.text.chars().count(), "predict.request");

    let result = run_blocking(&request_id, move || {
        engine.analyze_with_sensitivity(&req.text, sensitivity)
    })
    .await?;

    info!(
        request_id = %request_id,
        ai_score = result.ai_score,
        label = %result.label,
        elapsed_ms = t0.elapsed().as_millis(),
        "predict.done"
    );
    Ok(Json(result))
}

async fn analyze_detailed(
    State(engine): State<Arc<Engine>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let req = parse_request(&request_id, payload)?;
    let sensitivity = DetectionSensitivity::from_option(req.sensitivity.as_deref());
    let t0 = Instant::now();
    info!(request_id = %request_id, chars = req.text.chars().count(), "analyze.request");

    let job_id = request_id.clone();
    let report = run_blocking(&request_id, move || {
        engine.analyze_report(&req.text, sensitivity, &job_id)
    })
    .await?;

    info!(
        request_id = %request_id,
        ai_score = report.result.ai_score,
        sentences = report.sentences.len(),
        elapsed_ms = t0.elapsed().as_millis(),
        "analyze.done"
    );
    Ok(Json(report))
}

async fn get_config(State(engine): State<Arc<Engine>>) -> Json<EngineConfig> {
    Json(engine.config().clone())
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let engine = Arc::new(Engine::new(config.engine).context("invalid engine configuration")?);
    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;
    info!(addr = %listener.local_addr()?, "server.listening");

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server.stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("server.shutdown_requested");
}
