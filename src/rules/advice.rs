//! Canned advice keyed off the raw record. Unlike the anomaly typer every
//! matching rule contributes, in table order.

use super::AnomalyType;
use crate::routine::RoutineRecord;

pub const HEALTHY_MESSAGE: &str = "Your daily routine looks healthy! Keep up the good work.";

pub struct AdviceRule {
    pub message: &'static str,
    pub applies: fn(&RoutineRecord) -> bool,
}

/// The two sleep rules are mutually exclusive; together they form the sleep check.
pub const ADVICE_RULES: &[AdviceRule] = &[
    AdviceRule {
        message: "Consider increasing your sleep duration to 7-9 hours for better health.",
        applies: |r| r.sleep_hours < 7.0,
    },
    AdviceRule {
        message: "You might be oversleeping. Aim for 7-9 hours of sleep.",
        applies: |r| r.sleep_hours > 9.0,
    },
    AdviceRule {
        message: "Try to reduce screen time and take regular breaks to protect your eyes.",
        applies: |r| r.screen_time > 8.0,
    },
    AdviceRule {
        message: "Aim for at least 30 minutes of moderate exercise daily.",
        applies: |r| r.exercise_duration < 0.5,
    },
    AdviceRule {
        message: "Increase your water intake to at least 2 liters per day.",
        applies: |r| r.water_intake < 2.0,
    },
    AdviceRule {
        message: "Consider stress management techniques like meditation or deep breathing.",
        applies: |r| r.stress_level > 7,
    },
    AdviceRule {
        message: "Try to have 3 regular meals per day for better metabolism.",
        applies: |r| r.meal_count() < 3,
    },
];

/// The anomaly type is accepted for interface symmetry but does not steer the advice.
pub fn recommend(
    record: &RoutineRecord,
    is_anomaly: bool,
    _anomaly_type: AnomalyType,
) -> Vec<String> {
    if !is_anomaly {
        return vec![HEALTHY_MESSAGE.to_string()];
    }
    ADVICE_RULES
        .iter()
        .filter(|rule| (rule.applies)(record))
        .map(|rule| rule.message.to_string())
        .collect()
}
