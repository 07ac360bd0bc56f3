//! Reference routines for smoke tests and benchmarks.

use super::RoutineRecord;

fn times(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Eight hours of sleep, moderate screen time, three meals.
pub fn healthy() -> RoutineRecord {
    RoutineRecord {
        sleep_hours: 8.0,
        meal_times: times(&["07:30", "12:00", "18:30"]),
        screen_time: 4.5,
        exercise_duration: 1.0,
        wake_up_time: "07:00".to_string(),
        bed_time: "23:00".to_string(),
        water_intake: 2.5,
        stress_level: 4,
    }
}

/// Short sleep, heavy screen use, little exercise or water, high stress, two meals.
pub fn unhealthy() -> RoutineRecord {
    RoutineRecord {
        sleep_hours: 5.0,
        meal_times: times(&["10:00", "15:00"]),
        screen_time: 10.0,
        exercise_duration: 0.2,
        wake_up_time: "05:00".to_string(),
        bed_time: "22:00".to_string(),
        water_intake: 1.0,
        stress_level: 8,
    }
}
