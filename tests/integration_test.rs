//! Integration test: config load, synthetic corpus, training, snapshot, HTTP surface.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use lifepattern_ai::{
    api::{self, AppState, HealthResponse, PredictionResponse},
    config::{ForestConfig, ServiceConfig},
    dataset::{self, Label},
    model::{self, AnomalyDetector},
    routine::samples,
    rules::HEALTHY_MESSAGE,
    FeatureExtractor,
};
use std::path::Path;
use std::sync::OnceLock;
use tower::ServiceExt;

fn quick_forest() -> ForestConfig {
    ForestConfig {
        n_trees: 25,
        max_depth: 10,
        min_samples_split: 2,
        seed: 42,
    }
}

fn trained_detector() -> &'static AnomalyDetector {
    static DETECTOR: OnceLock<AnomalyDetector> = OnceLock::new();
    DETECTOR.get_or_init(|| {
        let data = dataset::generate(1000, 0.2, 42);
        let mut detector = AnomalyDetector::new(quick_forest());
        detector
            .train(&data.train_features, &data.train_labels)
            .unwrap();
        detector
            .evaluate(&data.test_features, &data.test_labels)
            .unwrap();
        detector
    })
}

fn app() -> axum::Router {
    api::router(AppState::new(trained_detector().clone()))
}

fn predict_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[test]
fn config_load_default() {
    let c = ServiceConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.dataset.n_samples, 1000);
    assert_eq!(c.forest.n_trees, 100);
    assert_eq!(c.forest.max_depth, 10);
    assert!(c.validate().is_ok());
}

#[test]
fn generator_is_seeded_and_balanced() {
    let a = dataset::generate(1000, 0.2, 42);
    let b = dataset::generate(1000, 0.2, 42);
    assert_eq!(a.train_features, b.train_features);
    assert_eq!(a.train_labels.len(), 800);
    assert_eq!(a.test_labels.len(), 200);

    let anomalous = a
        .train_labels
        .iter()
        .chain(a.test_labels.iter())
        .filter(|l| **l == Label::Anomalous)
        .count();
    assert_eq!(anomalous, 300);
}

#[test]
fn trained_model_separates_reference_routines() {
    let detector = trained_detector();
    assert!(detector.is_trained());
    assert!(detector.accuracy() > 0.85, "accuracy {}", detector.accuracy());
    assert!(detector.last_report().is_some());

    let extractor = FeatureExtractor::new();
    let healthy = detector
        .predict(&extractor.transform(&samples::healthy()).unwrap())
        .unwrap();
    assert!(!healthy.is_anomaly);
    assert!(healthy.confidence >= 0.5);

    let unhealthy = detector
        .predict(&extractor.transform(&samples::unhealthy()).unwrap())
        .unwrap();
    assert!(unhealthy.is_anomaly);
    assert_eq!(
        unhealthy.anomaly_type.as_str(),
        "general_unhealthy_routine"
    );
}

#[test]
fn snapshot_roundtrip_preserves_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("anomaly_model.json");
    let detector = trained_detector();
    detector.save(&path).unwrap();

    let restored = AnomalyDetector::load(&path).unwrap();
    assert_eq!(restored.accuracy(), detector.accuracy());

    let extractor = FeatureExtractor::new();
    for record in [samples::healthy(), samples::unhealthy()] {
        let fv = extractor.transform(&record).unwrap();
        assert_eq!(
            restored.predict_proba(&fv).unwrap(),
            detector.predict_proba(&fv).unwrap()
        );
    }
}

#[test]
fn bootstrap_trains_then_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServiceConfig::default();
    config.model_path = dir.path().join("anomaly_model.json");
    config.forest = ForestConfig {
        n_trees: 5,
        ..quick_forest()
    };

    let first = model::bootstrap(&config).unwrap();
    assert!(config.model_path.exists());

    let second = model::bootstrap(&config).unwrap();
    assert_eq!(first.accuracy(), second.accuracy());
}

#[test]
fn corrupt_snapshot_fails_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServiceConfig::default();
    config.model_path = dir.path().join("anomaly_model.json");
    std::fs::write(&config.model_path, b"{ not a snapshot").unwrap();

    assert!(model::bootstrap(&config).is_err());
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert!(health.model_accuracy > 0.85);
}

#[tokio::test]
async fn health_fails_without_model() {
    let state = AppState::new(AnomalyDetector::new(quick_forest()));
    let response = api::router(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn predict_healthy_routine() {
    let body = serde_json::to_string(&samples::healthy()).unwrap();
    let response = app().oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prediction: PredictionResponse =
        serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(!prediction.is_anomaly);
    // the cascade still runs; nothing in a healthy routine trips a rule
    assert_eq!(prediction.anomaly_type, "multiple_anomalies");
    assert_eq!(prediction.recommendations, vec![HEALTHY_MESSAGE.to_string()]);
    assert!((0.5..=1.0).contains(&prediction.confidence_score));
}

#[tokio::test]
async fn predict_unhealthy_routine() {
    let body = serde_json::to_string(&samples::unhealthy()).unwrap();
    let response = app().oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prediction: PredictionResponse =
        serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(prediction.is_anomaly);
    assert_eq!(prediction.anomaly_type, "general_unhealthy_routine");
    assert_eq!(prediction.recommendations.len(), 6);
    assert!(prediction
        .recommendations
        .iter()
        .any(|m| m.contains("water intake")));
}

#[tokio::test]
async fn predict_rejects_unpadded_meal_time() {
    let mut record = samples::healthy();
    record.meal_times[0] = "7:30".to_string();
    let body = serde_json::to_string(&record).unwrap();

    let response = app().oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn predict_rejects_out_of_range_stress() {
    let mut record = samples::healthy();
    record.stress_level = 11;
    let body = serde_json::to_string(&record).unwrap();

    let response = app().oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn predict_rejects_malformed_json() {
    let response = app()
        .oneshot(predict_request("{\"sleep_hours\": 8.0".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
