//! Feature transform: routine record → validated metrics → raw feature vector.
//! Standardization is the model's job, not this one's.

use super::{FeatureVector, RoutineMetrics};
use crate::routine::{RoutineRecord, ValidationError};

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Validate the record and encode it. Deterministic and side-effect free.
    pub fn transform(&self, record: &RoutineRecord) -> Result<FeatureVector, ValidationError> {
        record.validate()?;
        Ok(self.metrics(record)?.to_vector())
    }

    /// Numeric view of the record; only the hour of wake/bed time is kept.
    pub fn metrics(&self, record: &RoutineRecord) -> Result<RoutineMetrics, ValidationError> {
        Ok(RoutineMetrics {
            sleep_hours: record.sleep_hours,
            screen_time: record.screen_time,
            exercise_duration: record.exercise_duration,
            water_intake: record.water_intake,
            stress_level: record.stress_level as f64,
            meal_count: record.meal_count() as f64,
            wake_up_hour: f64::from(record.wake_up_hour()?),
            bed_time_hour: f64::from(record.bed_time_hour()?),
        })
    }

    pub fn transform_batch(
        &self,
        records: &[RoutineRecord],
    ) -> Result<Vec<FeatureVector>, ValidationError> {
        records.iter().map(|r| self.transform(r)).collect()
    }
}
