//! Why a routine looks unhealthy. First matching rule wins; categories overlap,
//! so the table order is the contract.

use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    GeneralUnhealthyRoutine,
    InsufficientSleep,
    ExcessiveSleep,
    ExcessiveScreenTime,
    InsufficientExercise,
    LowWaterIntake,
    HighStressLevel,
    IrregularMeals,
    MultipleAnomalies,
}

impl AnomalyType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnomalyType::GeneralUnhealthyRoutine => "general_unhealthy_routine",
            AnomalyType::InsufficientSleep => "insufficient_sleep",
            AnomalyType::ExcessiveSleep => "excessive_sleep",
            AnomalyType::ExcessiveScreenTime => "excessive_screen_time",
            AnomalyType::InsufficientExercise => "insufficient_exercise",
            AnomalyType::LowWaterIntake => "low_water_intake",
            AnomalyType::HighStressLevel => "high_stress_level",
            AnomalyType::IrregularMeals => "irregular_meals",
            AnomalyType::MultipleAnomalies => "multiple_anomalies",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct AnomalyRule {
    pub outcome: AnomalyType,
    pub matches: fn(&FeatureVector) -> bool,
}

pub const ANOMALY_RULES: &[AnomalyRule] = &[
    AnomalyRule {
        outcome: AnomalyType::GeneralUnhealthyRoutine,
        matches: |f| f.health_score() < 0.5,
    },
    AnomalyRule {
        outcome: AnomalyType::InsufficientSleep,
        matches: |f| f.sleep_hours() < 6.0,
    },
    AnomalyRule {
        outcome: AnomalyType::ExcessiveSleep,
        matches: |f| f.sleep_hours() > 10.0,
    },
    AnomalyRule {
        outcome: AnomalyType::ExcessiveScreenTime,
        matches: |f| f.screen_time() > 10.0,
    },
    AnomalyRule {
        outcome: AnomalyType::InsufficientExercise,
        matches: |f| f.exercise_duration() < 0.3,
    },
    AnomalyRule {
        outcome: AnomalyType::LowWaterIntake,
        matches: |f| f.water_intake() < 1.5,
    },
    AnomalyRule {
        outcome: AnomalyType::HighStressLevel,
        matches: |f| f.stress_level() > 8.0,
    },
    AnomalyRule {
        outcome: AnomalyType::IrregularMeals,
        matches: |f| f.meal_count() < 2.0,
    },
];

/// Total over all inputs: falls through to `MultipleAnomalies`.
pub fn classify(features: &FeatureVector) -> AnomalyType {
    ANOMALY_RULES
        .iter()
        .find(|rule| (rule.matches)(features))
        .map(|rule| rule.outcome)
        .unwrap_or(AnomalyType::MultipleAnomalies)
}
