//! HTTP surface for the pipeline checker.
//!
//! ```text
//! GET  /                 -> {"status": "Backend running"}
//! POST /pipelines/parse  -> {"num_nodes": .., "num_edges": .., "is_dag": ..}
//! ```

use crate::config::ServerConfig;
use crate::error::{PipelineError, Result};
use crate::models::{PipelineGraph, PipelineReport, StatusResponse};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub const STATUS_MESSAGE: &str = "Backend running";

/// Structured error body returned for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error_code: &'static str,
    pub message: String,
}

/// Error that can be returned from handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // 422 for missing fields, 400 for broken JSON, 415 for a non-JSON content type
        Self {
            status: rejection.status(),
            code: "InputValidation",
            message: rejection.body_text(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let status = match &err {
            PipelineError::InputValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            error_code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

async fn parse_pipeline(
    payload: std::result::Result<Json<PipelineGraph>, JsonRejection>,
) -> std::result::Result<Json<PipelineReport>, ApiError> {
    let Json(graph) = payload.map_err(|rejection| {
        tracing::info!(status = %rejection.status(), "rejected pipeline: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let report = PipelineReport::from_graph(&graph);
    tracing::info!(
        num_nodes = report.num_nodes,
        num_edges = report.num_edges,
        is_dag = report.is_dag,
        "parsed pipeline"
    );

    Ok(Json(report))
}

/// CORS policy granting credentialed access to the one configured origin.
///
/// Methods and headers are mirrored from the preflight because credentialed
/// responses may not use the `*` wildcard.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let origin = config.cors_origin()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(root))
        .route("/pipelines/parse", post(parse_pipeline))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}

/// Bind and serve until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<()> {
    let app = router(&config)?;
    let listener = TcpListener::bind(config.bind).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        allowed_origin = %config.allowed_origin,
        "pipeline checker listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pipeline checker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
