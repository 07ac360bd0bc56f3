//! Raw routine metrics and the three derived indices.
//!
//! None of the derived values are clamped: sleep outside [0, 16] drives
//! `sleep_consistency` negative and `health_score` is an unbounded sum.

use super::{FeatureVector, FEATURE_DIM};

/// 1.0 at exactly eight hours, falling linearly by 1/8 per hour either side.
pub fn sleep_consistency(sleep_hours: f64) -> f64 {
    1.0 - (sleep_hours - 8.0).abs() / 8.0
}

/// Share of active time spent exercising; 0 when there is no active time.
pub fn activity_balance(exercise_duration: f64, screen_time: f64) -> f64 {
    let total = exercise_duration + screen_time;
    if total > 0.0 {
        exercise_duration / total
    } else {
        0.0
    }
}

/// Weighted composite of normalized metrics. Not a probability.
pub fn health_score(
    sleep_hours: f64,
    screen_time: f64,
    exercise_duration: f64,
    water_intake: f64,
    stress_level: f64,
    meal_count: f64,
) -> f64 {
    (sleep_hours / 8.0) * 0.3
        + (1.0 - screen_time / 12.0) * 0.2
        + (exercise_duration / 1.0) * 0.2
        + (water_intake / 2.5) * 0.1
        + (1.0 - stress_level / 10.0) * 0.1
        + (meal_count / 3.0) * 0.1
}

/// The eight directly measured inputs, already numeric.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoutineMetrics {
    pub sleep_hours: f64,
    pub screen_time: f64,
    pub exercise_duration: f64,
    pub water_intake: f64,
    pub stress_level: f64,
    pub meal_count: f64,
    pub wake_up_hour: f64,
    pub bed_time_hour: f64,
}

impl RoutineMetrics {
    pub fn to_vector(&self) -> FeatureVector {
        let values: [f64; FEATURE_DIM] = [
            self.sleep_hours,
            self.screen_time,
            self.exercise_duration,
            self.water_intake,
            self.stress_level,
            self.meal_count,
            self.wake_up_hour,
            self.bed_time_hour,
            sleep_consistency(self.sleep_hours),
            activity_balance(self.exercise_duration, self.screen_time),
            health_score(
                self.sleep_hours,
                self.screen_time,
                self.exercise_duration,
                self.water_intake,
                self.stress_level,
                self.meal_count,
            ),
        ];
        FeatureVector::new(values)
    }
}
