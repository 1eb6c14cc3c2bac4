//! Measurement status classification.
//!
//! Fixed-threshold policy:
//! - NORMAL: min <= value <= max
//! - LOW: value < min (but above 70% of min)
//! - HIGH: value > max (but below 130% of max)
//! - CRITICAL: value <= min * 0.7 OR value >= max * 1.3

use std::collections::HashMap;

use crate::models::{HealthStatus, Measurement};

/// Critical-low threshold as a fraction of the reference minimum.
const CRITICAL_LOW_FACTOR: f64 = 0.7;

/// Critical-high threshold as a fraction of the reference maximum.
const CRITICAL_HIGH_FACTOR: f64 = 1.3;

/// Classify a value against a reference range.
///
/// Any missing input yields [`HealthStatus::Normal`]: there is no "unknown"
/// status, and absent reference data must not flag a measurement. An
/// inverted range (`min > max`) runs through the same comparison chain
/// unchanged.
pub fn classify(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> HealthStatus {
    let (Some(value), Some(min), Some(max)) = (value, min, max) else {
        return HealthStatus::Normal;
    };

    let critical_low = min * CRITICAL_LOW_FACTOR;
    let critical_high = max * CRITICAL_HIGH_FACTOR;

    if value <= critical_low || value >= critical_high {
        HealthStatus::Critical
    } else if value >= min && value <= max {
        HealthStatus::Normal
    } else if value < min {
        HealthStatus::Low
    } else {
        HealthStatus::High
    }
}

/// Classify a measurement using its own reference bounds.
pub fn classify_measurement(measurement: &Measurement) -> HealthStatus {
    classify(
        measurement.value,
        measurement.reference_min,
        measurement.reference_max,
    )
}

/// External memoization of derived statuses, keyed by measurement ID.
///
/// Measurements are immutable once recorded, so a cached entry can never
/// disagree with a recomputation; populating the same key twice is
/// idempotent.
#[derive(Debug, Default)]
pub struct StatusCache {
    statuses: HashMap<String, HealthStatus>,
}

impl StatusCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached status, computing and storing it on first access.
    pub fn status_of(&mut self, measurement: &Measurement) -> HealthStatus {
        *self
            .statuses
            .entry(measurement.id.clone())
            .or_insert_with(|| classify_measurement(measurement))
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceRange;

    const MIN: f64 = 12.0;
    const MAX: f64 = 18.0;

    fn classify_hgb(value: f64) -> HealthStatus {
        classify(Some(value), Some(MIN), Some(MAX))
    }

    #[test]
    fn test_normal_inside_range() {
        assert_eq!(classify_hgb(15.0), HealthStatus::Normal);
        assert_eq!(classify_hgb(12.0), HealthStatus::Normal); // boundary: min
        assert_eq!(classify_hgb(18.0), HealthStatus::Normal); // boundary: max
    }

    #[test]
    fn test_low_below_min() {
        assert_eq!(classify_hgb(11.5), HealthStatus::Low);
        assert_eq!(classify_hgb(8.5), HealthStatus::Low); // just above 70% of min
    }

    #[test]
    fn test_high_above_max() {
        assert_eq!(classify_hgb(18.5), HealthStatus::High);
        assert_eq!(classify_hgb(23.3), HealthStatus::High); // just below 130% of max
    }

    #[test]
    fn test_critical_at_thresholds() {
        // 70% of 12.0 = 8.4, 130% of 18.0 = 23.4; both boundaries inclusive
        assert_eq!(classify_hgb(8.4), HealthStatus::Critical);
        assert_eq!(classify_hgb(7.0), HealthStatus::Critical);
        assert_eq!(classify_hgb(23.4), HealthStatus::Critical);
        assert_eq!(classify_hgb(25.0), HealthStatus::Critical);
    }

    #[test]
    fn test_missing_inputs_default_to_normal() {
        assert_eq!(classify(None, Some(MIN), Some(MAX)), HealthStatus::Normal);
        assert_eq!(classify(Some(15.0), None, Some(MAX)), HealthStatus::Normal);
        assert_eq!(classify(Some(15.0), Some(MIN), None), HealthStatus::Normal);
        assert_eq!(classify(None, None, None), HealthStatus::Normal);
    }

    #[test]
    fn test_inverted_range_still_classifies() {
        // min > max is accepted as-is; nothing can satisfy min <= v <= max
        assert_eq!(classify(Some(15.0), Some(18.0), Some(12.0)), HealthStatus::Critical);
        assert_eq!(classify(Some(17.0), Some(18.0), Some(12.0)), HealthStatus::Critical);
    }

    #[test]
    fn test_cache_agrees_with_recomputation() {
        let m = Measurement::with_range(Some(8.0), None, ReferenceRange::new(12.0, 18.0));
        let mut cache = StatusCache::new();

        let first = cache.status_of(&m);
        let second = cache.status_of(&m);
        assert_eq!(first, HealthStatus::Critical);
        assert_eq!(first, second);
        assert_eq!(first, classify_measurement(&m));
        assert_eq!(cache.len(), 1);
    }
}
