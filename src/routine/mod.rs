//! Self-reported daily routine: the unit of input to the service.

pub mod samples;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One user's daily metrics as received on `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineRecord {
    pub sleep_hours: f64,
    /// Meal timestamps, `HH:MM`
    pub meal_times: Vec<String>,
    pub screen_time: f64,
    pub exercise_duration: f64,
    /// `HH:MM`
    pub wake_up_time: String,
    /// `HH:MM`
    pub bed_time: String,
    /// Liters
    pub water_intake: f64,
    /// 1 (calm) to 10
    pub stress_level: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("invalid time format for {field}: {value:?}. Use HH:MM format")]
    InvalidTime { field: &'static str, value: String },
}

/// Parse a strict 24-hour `HH:MM` string (two digits each side).
pub fn parse_hhmm(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        field,
        value: value.to_string(),
    };
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let hour = u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0');
    let minute = u32::from(digits[2] - b'0') * 10 + u32::from(digits[3] - b'0');
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    // NaN fails both comparisons, so reject it explicitly via the negation
    if !(value >= min && value <= max) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl RoutineRecord {
    /// Bounds first, then meal times, then wake/bed times.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("sleep_hours", self.sleep_hours, 0.0, 24.0)?;
        check_range("screen_time", self.screen_time, 0.0, 24.0)?;
        check_range("exercise_duration", self.exercise_duration, 0.0, 24.0)?;
        check_range("water_intake", self.water_intake, 0.0, f64::MAX)?;
        check_range("stress_level", self.stress_level as f64, 1.0, 10.0)?;

        for meal in &self.meal_times {
            parse_hhmm("meal_times", meal)?;
        }
        parse_hhmm("wake_up_time", &self.wake_up_time)?;
        parse_hhmm("bed_time", &self.bed_time)?;
        Ok(())
    }

    pub fn meal_count(&self) -> usize {
        self.meal_times.len()
    }

    pub fn wake_up_hour(&self) -> Result<u32, ValidationError> {
        parse_hhmm("wake_up_time", &self.wake_up_time).map(|t| t.hour())
    }

    pub fn bed_time_hour(&self) -> Result<u32, ValidationError> {
        parse_hhmm("bed_time", &self.bed_time).map(|t| t.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hhmm_accepts_two_digit_times() {
        assert_eq!(parse_hhmm("t", "07:30").unwrap().hour(), 7);
        assert_eq!(parse_hhmm("t", "23:59").unwrap().minute(), 59);
        assert_eq!(parse_hhmm("t", "00:00").unwrap().hour(), 0);
    }

    #[test]
    fn hhmm_rejects_loose_formats() {
        for bad in ["7:30", "24:00", "12:60", "12-30", "ab:cd", "", "12:300", " 7:30"] {
            assert!(parse_hhmm("meal_times", bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn validation_names_the_offending_meal() {
        let mut r = samples::healthy();
        r.meal_times[0] = "7:30".to_string();
        let err = r.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTime {
                field: "meal_times",
                value: "7:30".into()
            }
        );
        assert!(err.to_string().contains("7:30"));
    }

    #[test]
    fn validation_checks_bounds() {
        let mut r = samples::healthy();
        r.stress_level = 11;
        assert!(matches!(
            r.validate(),
            Err(ValidationError::OutOfRange { field: "stress_level", .. })
        ));

        let mut r = samples::healthy();
        r.water_intake = -0.1;
        assert!(r.validate().is_err());

        let mut r = samples::healthy();
        r.sleep_hours = f64::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn reference_records_are_valid() {
        assert!(samples::healthy().validate().is_ok());
        assert!(samples::unhealthy().validate().is_ok());
    }
}
