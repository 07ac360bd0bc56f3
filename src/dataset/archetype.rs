//! Parameterized routine archetypes: one healthy profile and eight unhealthy ones.

use super::sampler::Sampler;
use crate::features::RoutineMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Normal,
    InsufficientSleep,
    ExcessiveSleep,
    ExcessiveScreenTime,
    InsufficientExercise,
    LowWaterIntake,
    HighStress,
    IrregularMeals,
    MultipleIssues,
}

impl Archetype {
    /// Drawn uniformly for each anomalous sample.
    pub const ANOMALOUS: [Archetype; 8] = [
        Archetype::InsufficientSleep,
        Archetype::ExcessiveSleep,
        Archetype::ExcessiveScreenTime,
        Archetype::InsufficientExercise,
        Archetype::LowWaterIntake,
        Archetype::HighStress,
        Archetype::IrregularMeals,
        Archetype::MultipleIssues,
    ];

    pub fn is_anomalous(self) -> bool {
        self != Archetype::Normal
    }

    pub fn sample(self, s: &mut Sampler) -> RoutineMetrics {
        match self {
            Archetype::Normal => sample_normal(s),
            anomalous => sample_anomalous(anomalous, s),
        }
    }
}

fn sample_normal(s: &mut Sampler) -> RoutineMetrics {
    let sleep_hours = s.clipped_normal(8.0, 0.5, 7.0, 9.0);
    let screen_time = s.clipped_normal(4.0, 1.0, 2.0, 6.0);
    let exercise_duration = s.clipped_normal(1.0, 0.3, 0.5, 2.0);
    let water_intake = s.clipped_normal(2.5, 0.3, 2.0, 3.0);
    let stress_level = s.int(1, 7);
    let meal_count = s.int(2, 5);
    let wake_up_hour = s.int(6, 9);
    let bed_time_hour = s.int(22, 25) % 24;

    RoutineMetrics {
        sleep_hours,
        screen_time,
        exercise_duration,
        water_intake,
        stress_level: stress_level as f64,
        meal_count: meal_count as f64,
        wake_up_hour: wake_up_hour as f64,
        bed_time_hour: bed_time_hour as f64,
    }
}

/// Healthy-range draws for the dimensions an archetype leaves alone.
/// Unlike the normal profile these are not clipped.
fn baseline(s: &mut Sampler) -> (f64, f64, f64, f64) {
    let sleep = s.normal(8.0, 0.5);
    let screen = s.normal(4.0, 1.0);
    let exercise = s.normal(1.0, 0.3);
    let water = s.normal(2.5, 0.3);
    (sleep, screen, exercise, water)
}

fn sample_anomalous(kind: Archetype, s: &mut Sampler) -> RoutineMetrics {
    let (sleep, screen, exercise, water, stress, meals) = match kind {
        Archetype::InsufficientSleep => {
            let sleep = s.clipped_normal(5.0, 0.5, 4.0, 6.0);
            let screen = s.normal(4.0, 1.0);
            let exercise = s.normal(1.0, 0.3);
            let water = s.normal(2.5, 0.3);
            (sleep, screen, exercise, water, s.int(1, 7), s.int(2, 5))
        }
        Archetype::ExcessiveSleep => {
            let sleep = s.clipped_normal(11.0, 0.5, 10.0, 12.0);
            let screen = s.normal(4.0, 1.0);
            let exercise = s.normal(0.5, 0.3);
            let water = s.normal(2.5, 0.3);
            (sleep, screen, exercise, water, s.int(1, 7), s.int(2, 5))
        }
        Archetype::ExcessiveScreenTime => {
            let sleep = s.normal(8.0, 0.5);
            let screen = s.clipped_normal(10.0, 1.0, 8.0, 12.0);
            let exercise = s.normal(0.2, 0.2);
            let water = s.normal(2.5, 0.3);
            (sleep, screen, exercise, water, s.int(1, 7), s.int(2, 5))
        }
        Archetype::InsufficientExercise => {
            let sleep = s.normal(8.0, 0.5);
            let screen = s.normal(4.0, 1.0);
            let exercise = s.clipped_normal(0.1, 0.1, 0.0, 0.3);
            let water = s.normal(2.5, 0.3);
            (sleep, screen, exercise, water, s.int(1, 7), s.int(2, 5))
        }
        Archetype::LowWaterIntake => {
            let sleep = s.normal(8.0, 0.5);
            let screen = s.normal(4.0, 1.0);
            let exercise = s.normal(1.0, 0.3);
            let water = s.clipped_normal(1.0, 0.3, 0.5, 1.5);
            (sleep, screen, exercise, water, s.int(1, 7), s.int(2, 5))
        }
        Archetype::HighStress => {
            let (sleep, screen, exercise, water) = baseline(s);
            (sleep, screen, exercise, water, s.int(8, 11), s.int(2, 5))
        }
        Archetype::IrregularMeals => {
            let (sleep, screen, exercise, water) = baseline(s);
            (sleep, screen, exercise, water, s.int(1, 7), s.int(0, 2))
        }
        _ => {
            // several dimensions at once
            let sleep = s.normal(5.5, 0.5);
            let screen = s.normal(9.0, 1.0);
            let exercise = s.normal(0.2, 0.2);
            let water = s.normal(1.2, 0.3);
            (sleep, screen, exercise, water, s.int(8, 11), s.int(1, 3))
        }
    };

    // short sleepers get up early, long sleepers go to bed early
    let (wake, bed) = if sleep < 6.0 {
        (s.int(4, 7), s.int(22, 25) % 24)
    } else if sleep > 10.0 {
        (s.int(8, 11), s.int(20, 23))
    } else {
        (s.int(6, 9), s.int(22, 25) % 24)
    };

    RoutineMetrics {
        sleep_hours: sleep,
        screen_time: screen,
        exercise_duration: exercise,
        water_intake: water,
        stress_level: stress as f64,
        meal_count: meals as f64,
        wake_up_hour: wake as f64,
        bed_time_hour: bed as f64,
    }
}
