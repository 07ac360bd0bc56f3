//! HTTP surface: `GET /health` and `POST /predict`.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::features::FeatureExtractor;
use crate::model::AnomalyDetector;

pub use error::ApiError;
pub use handlers::{HealthResponse, PredictionResponse};

/// Request context. The detector is trained before the router is built and never
/// mutated afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<AnomalyDetector>,
    pub extractor: FeatureExtractor,
}

impl AppState {
    pub fn new(detector: AnomalyDetector) -> Self {
        Self {
            detector: Arc::new(detector),
            extractor: FeatureExtractor::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
