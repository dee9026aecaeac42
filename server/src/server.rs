use crate::error::ApiError;
use crate::{config::ServerConfig, state::AppState, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use inference::{DualModelPrediction, NO_REVIEW_TEXT};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub review: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
    pub version: String,
    pub uptime_seconds: u64,
}

/// HTTP server exposing `/predict` and `/health`
pub struct SentimentServer {
    config: ServerConfig,
    state: AppState,
}

impl SentimentServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.config.server_address().parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Starting HTTP server on {}", addr);

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[instrument(skip(state, body))]
async fn predict(State(state): State<AppState>, body: Bytes) -> std::result::Result<Json<DualModelPrediction>, ApiError> {
    let request: PredictRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let review = request.review.unwrap_or_default();
    if review.is_empty() {
        return Err(ApiError::BadRequest(NO_REVIEW_TEXT.to_string()));
    }

    let predictor = state
        .predictor()
        .ok_or_else(|| ApiError::Internal("Models not loaded".to_string()))?;

    match predictor.predict(&review).await {
        Ok(prediction) => Ok(Json(prediction)),
        Err(e) => {
            error!("Prediction failed: {}", e);
            Err(e.into())
        }
    }
}

#[instrument(skip(state))]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        models_loaded: state.models_loaded(),
        version: crate::VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
