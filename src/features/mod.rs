//! Numeric encoding of a routine for the classifier.

mod metrics;
mod pipeline;

pub use metrics::{activity_balance, health_score, sleep_consistency, RoutineMetrics};
pub use pipeline::FeatureExtractor;

use serde::{Deserialize, Serialize};

pub const FEATURE_DIM: usize = 11;

/// Column names in vector order; persisted with the model and checked on load.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "sleep_hours",
    "screen_time",
    "exercise_duration",
    "water_intake",
    "stress_level",
    "meal_count",
    "wake_up_hour",
    "bed_time_hour",
    "sleep_consistency",
    "activity_balance",
    "health_score",
];

pub mod index {
    pub const SLEEP_HOURS: usize = 0;
    pub const SCREEN_TIME: usize = 1;
    pub const EXERCISE_DURATION: usize = 2;
    pub const WATER_INTAKE: usize = 3;
    pub const STRESS_LEVEL: usize = 4;
    pub const MEAL_COUNT: usize = 5;
    pub const WAKE_UP_HOUR: usize = 6;
    pub const BED_TIME_HOUR: usize = 7;
    pub const SLEEP_CONSISTENCY: usize = 8;
    pub const ACTIVITY_BALANCE: usize = 9;
    pub const HEALTH_SCORE: usize = 10;
}

/// Fixed-order 11-dim feature vector (raw, unscaled).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_DIM],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_DIM]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn sleep_hours(&self) -> f64 {
        self.values[index::SLEEP_HOURS]
    }

    pub fn screen_time(&self) -> f64 {
        self.values[index::SCREEN_TIME]
    }

    pub fn exercise_duration(&self) -> f64 {
        self.values[index::EXERCISE_DURATION]
    }

    pub fn water_intake(&self) -> f64 {
        self.values[index::WATER_INTAKE]
    }

    pub fn stress_level(&self) -> f64 {
        self.values[index::STRESS_LEVEL]
    }

    pub fn meal_count(&self) -> f64 {
        self.values[index::MEAL_COUNT]
    }

    pub fn sleep_consistency(&self) -> f64 {
        self.values[index::SLEEP_CONSISTENCY]
    }

    pub fn activity_balance(&self) -> f64 {
        self.values[index::ACTIVITY_BALANCE]
    }

    pub fn health_score(&self) -> f64 {
        self.values[index::HEALTH_SCORE]
    }
}

impl From<[f64; FEATURE_DIM]> for FeatureVector {
    fn from(values: [f64; FEATURE_DIM]) -> Self {
        Self::new(values)
    }
}
