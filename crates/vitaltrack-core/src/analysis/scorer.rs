//! Patient health scoring.
//!
//! Scoring rules:
//! - Start at 100 (perfect health)
//! - Deduct 5 points per LOW/HIGH measurement
//! - Deduct 15 points per CRITICAL measurement
//! - Weight each deduction by recency (up to 2x within 90 days)
//! - Clamp the result at 0

use chrono::NaiveDate;

use crate::models::{HealthStatus, Measurement};

use super::classifier::classify_measurement;

/// Points deducted per LOW or HIGH measurement.
const DEDUCTION_LOW_HIGH: i64 = 5;

/// Points deducted per CRITICAL measurement.
const DEDUCTION_CRITICAL: i64 = 15;

/// Window, in days, over which recent abnormalities are weighted up.
const RECENCY_WINDOW_DAYS: i64 = 90;

/// Compute a patient health score in `[0, 100]`.
///
/// An empty input scores 100: no data is assumed healthy, not an error.
/// Each abnormal measurement's deduction is scaled by
/// [`recency_multiplier`] and rounded to the nearest integer before
/// subtraction, so adding abnormal measurements can only lower the score.
pub fn health_score<'a, I>(measurements: I, as_of: NaiveDate) -> u8
where
    I: IntoIterator<Item = &'a Measurement>,
{
    let mut score: i64 = 100;

    for measurement in measurements {
        let deduction = match classify_measurement(measurement) {
            HealthStatus::Normal => continue,
            HealthStatus::Low | HealthStatus::High => DEDUCTION_LOW_HIGH,
            HealthStatus::Critical => DEDUCTION_CRITICAL,
        };

        let multiplier = recency_multiplier(measurement.date, as_of);
        score -= (deduction as f64 * multiplier).round() as i64;
    }

    score.max(0) as u8
}

/// Recency multiplier for a deduction.
///
/// Decays linearly from 2.0 for a measurement taken on `as_of` to 1.0 at 90
/// days old; anything older, or undated, weighs 1.0. Future-dated
/// measurements are not special-cased and yield a multiplier above 2.0.
pub fn recency_multiplier(date: Option<NaiveDate>, as_of: NaiveDate) -> f64 {
    let Some(date) = date else {
        return 1.0;
    };

    let days_since = (as_of - date).num_days();
    if days_since <= RECENCY_WINDOW_DAYS {
        2.0 - days_since as f64 / RECENCY_WINDOW_DAYS as f64
    } else {
        1.0
    }
}
