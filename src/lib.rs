//! LifePattern AI — daily routine anomaly detection service.
//!
//! Modular structure:
//! - [`routine`] — Routine record, HH:MM parsing, input validation
//! - [`features`] — Raw and derived feature extraction
//! - [`dataset`] — Seeded synthetic training corpus
//! - [`model`] — Standardization, random forest, evaluation, persistence
//! - [`rules`] — Anomaly type cascade and recommendations
//! - [`storage`] — Model snapshot file format
//! - [`api`] — HTTP handlers and router
//! - [`logging`] — Structured JSON logging

pub mod api;
pub mod config;
pub mod dataset;
pub mod features;
pub mod logging;
pub mod model;
pub mod routine;
pub mod rules;
pub mod storage;

pub use config::ServiceConfig;
pub use dataset::{Dataset, Label};
pub use features::{FeatureExtractor, FeatureVector};
pub use logging::StructuredLogger;
pub use model::{AnomalyDetector, ModelError, Prediction};
pub use routine::{RoutineRecord, ValidationError};
pub use rules::AnomalyType;
