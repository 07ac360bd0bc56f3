//! Supervised routine classifier: scaler, tree ensemble, evaluation and persistence.

mod detector;
mod forest;
mod metrics;
mod scaler;

pub use detector::{AnomalyDetector, Prediction};
pub use forest::{DecisionTree, RandomForest};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use scaler::StandardScaler;

use crate::config::ServiceConfig;
use crate::dataset;
use crate::storage::SnapshotError;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model is not trained yet")]
    NotTrained,
    #[error("cannot train on an empty dataset")]
    EmptyTrainingSet,
    #[error("{features} feature vectors but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },
    #[error("snapshot feature names do not match this build: {0:?}")]
    FeatureNameMismatch(Vec<String>),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Startup path: load the snapshot if one exists, otherwise generate → train →
/// evaluate and (optionally) persist. Any error here should abort startup.
pub fn bootstrap(config: &ServiceConfig) -> Result<AnomalyDetector, ModelError> {
    if config.model_path.exists() {
        return AnomalyDetector::load(&config.model_path);
    }

    info!(path = %config.model_path.display(), "no model snapshot; training from synthetic data");
    let data = dataset::generate_from_config(&config.dataset);
    let mut detector = AnomalyDetector::new(config.forest.clone());
    detector.train(&data.train_features, &data.train_labels)?;
    let accuracy = detector.evaluate(&data.test_features, &data.test_labels)?;
    info!(accuracy, "model trained");

    if config.persist_model {
        if let Err(e) = detector.save(&config.model_path) {
            warn!(error = %e, path = %config.model_path.display(), "failed to persist model");
        }
    }
    Ok(detector)
}
