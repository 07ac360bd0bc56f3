use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{error::ApiError, AppState};
use crate::routine::RoutineRecord;
use crate::rules;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub model_accuracy: f64,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub is_anomaly: bool,
    pub confidence_score: f64,
    pub anomaly_type: String,
    pub recommendations: Vec<String>,
    pub timestamp: String,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    if !state.detector.is_trained() {
        tracing::error!("health check: model not trained");
        return Err(ApiError::internal());
    }
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: true,
        model_accuracy: state.detector.accuracy(),
        timestamp: now_iso(),
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<RoutineRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(record) = payload?;
    let request_id = Uuid::new_v4();

    let features = state.extractor.transform(&record)?;
    let prediction = state.detector.predict(&features)?;
    let recommendations =
        rules::recommend(&record, prediction.is_anomaly, prediction.anomaly_type);

    let anomaly_type = prediction.anomaly_type.as_str();
    info!(
        %request_id,
        is_anomaly = prediction.is_anomaly,
        confidence = prediction.confidence,
        anomaly_type,
        "prediction completed"
    );

    Ok(Json(PredictionResponse {
        is_anomaly: prediction.is_anomaly,
        confidence_score: prediction.confidence,
        anomaly_type: anomaly_type.to_string(),
        recommendations,
        timestamp: now_iso(),
    }))
}
