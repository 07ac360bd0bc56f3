//! Classifier wrapper: standardization + random forest + recorded accuracy.
//! Read-only once trained; share it behind an `Arc` for concurrent inference.

use super::forest::{argmax, RandomForest, Row};
use super::metrics::ClassificationReport;
use super::scaler::StandardScaler;
use super::ModelError;
use crate::config::ForestConfig;
use crate::dataset::Label;
use crate::features::{FeatureVector, FEATURE_NAMES};
use crate::rules::{self, AnomalyType};
use crate::storage::snapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Binary verdict, confidence in the predicted class, and the rule-based category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub is_anomaly: bool,
    pub confidence: f64,
    pub anomaly_type: AnomalyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Fitted {
    scaler: StandardScaler,
    forest: RandomForest,
}

/// Everything that goes into a snapshot file.
#[derive(Serialize, Deserialize)]
struct ModelSnapshot {
    feature_names: Vec<String>,
    accuracy: f64,
    scaler: StandardScaler,
    forest: RandomForest,
}

#[derive(Clone)]
pub struct AnomalyDetector {
    config: ForestConfig,
    fitted: Option<Fitted>,
    accuracy: f64,
    last_report: Option<ClassificationReport>,
}

fn check_lengths(features: &[FeatureVector], labels: &[Label]) -> Result<(), ModelError> {
    if features.len() != labels.len() {
        return Err(ModelError::LengthMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }
    Ok(())
}

impl AnomalyDetector {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            fitted: None,
            accuracy: 0.0,
            last_report: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    /// Accuracy from the last `evaluate`, or the value restored by `load`.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn last_report(&self) -> Option<&ClassificationReport> {
        self.last_report.as_ref()
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }

    fn fitted(&self) -> Result<&Fitted, ModelError> {
        self.fitted.as_ref().ok_or(ModelError::NotTrained)
    }

    /// Fit the scaler on `features`, then the forest on the standardized rows.
    pub fn train(&mut self, features: &[FeatureVector], labels: &[Label]) -> Result<(), ModelError> {
        check_lengths(features, labels)?;
        let scaler = StandardScaler::fit(features).ok_or(ModelError::EmptyTrainingSet)?;
        let rows = scaler.transform_all(features);
        let classes: Vec<usize> = labels.iter().map(|l| l.index()).collect();

        info!(
            samples = rows.len(),
            n_trees = self.config.n_trees,
            max_depth = self.config.max_depth,
            "training anomaly detection model"
        );
        let forest = RandomForest::fit(&self.config, &rows, &classes);
        self.fitted = Some(Fitted { scaler, forest });
        info!("model training completed");
        Ok(())
    }

    /// Score held-out data with the already-fitted scaler; records and returns accuracy.
    pub fn evaluate(&mut self, features: &[FeatureVector], labels: &[Label]) -> Result<f64, ModelError> {
        check_lengths(features, labels)?;
        let fitted = self.fitted()?;
        let predicted: Vec<Label> = features
            .iter()
            .map(|f| Label::from_index(fitted.forest.predict(&fitted.scaler.transform(f))))
            .collect();

        let report = ClassificationReport::from_predictions(labels, &predicted);
        info!(accuracy = report.accuracy, "model evaluated");
        info!("classification report:\n{report}");

        self.accuracy = report.accuracy;
        self.last_report = Some(report);
        Ok(self.accuracy)
    }

    /// Class probabilities `[normal, anomalous]` for one raw vector.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ModelError> {
        let fitted = self.fitted()?;
        let row: Row = fitted.scaler.transform(features);
        Ok(fitted.forest.predict_proba(&row))
    }

    /// The anomaly type is derived from the raw (unscaled) values, whatever the verdict.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let proba = self.predict_proba(features)?;
        let class = argmax(&proba);
        Ok(Prediction {
            is_anomaly: Label::from_index(class) == Label::Anomalous,
            confidence: proba[class],
            anomaly_type: rules::classify(features),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let fitted = self.fitted()?;
        let snap = ModelSnapshot {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            accuracy: self.accuracy,
            scaler: fitted.scaler.clone(),
            forest: fitted.forest.clone(),
        };
        snapshot::write(path, &snap)?;
        info!(path = %path.display(), "model saved");
        Ok(())
    }

    /// Restore a trained model; the ensemble keeps the hyperparameters it was saved with.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let snap: ModelSnapshot = snapshot::read(path)?;
        if snap.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(ModelError::FeatureNameMismatch(snap.feature_names));
        }
        info!(path = %path.display(), accuracy = snap.accuracy, "model loaded");
        Ok(Self {
            config: snap.forest.config.clone(),
            fitted: Some(Fitted {
                scaler: snap.scaler,
                forest: snap.forest,
            }),
            accuracy: snap.accuracy,
            last_report: None,
        })
    }
}
