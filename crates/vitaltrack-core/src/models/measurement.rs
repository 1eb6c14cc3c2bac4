//! Measurement and reference range models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A laboratory reference range.
///
/// `min <= max` is expected but never enforced; an inverted range is
/// classified through the same comparison chain with no special casing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceRange {
    /// Lower bound of the normal interval
    pub min: f64,
    /// Upper bound of the normal interval
    pub max: f64,
}

impl ReferenceRange {
    /// Create a reference range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether a value falls inside the range (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A single diagnostic measurement.
///
/// Immutable once recorded. The health status is a derived value, kept out
/// of the record itself (see `analysis::StatusCache`); it is always
/// recomputable from `value` and the reference bounds. Every field the
/// engine reads is optional: data-entry gaps degrade the analysis output
/// rather than abort it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Unique measurement ID
    pub id: String,
    /// Measured value, if recorded
    pub value: Option<f64>,
    /// Date the measurement was taken
    pub date: Option<NaiveDate>,
    /// Reference range minimum
    pub reference_min: Option<f64>,
    /// Reference range maximum
    pub reference_max: Option<f64>,
}

impl Measurement {
    /// Create a measurement without reference bounds.
    pub fn new(value: Option<f64>, date: Option<NaiveDate>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            value,
            date,
            reference_min: None,
            reference_max: None,
        }
    }

    /// Create a measurement tied to a complete reference range.
    pub fn with_range(value: Option<f64>, date: Option<NaiveDate>, range: ReferenceRange) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            value,
            date,
            reference_min: Some(range.min),
            reference_max: Some(range.max),
        }
    }

    /// The complete reference range, if both bounds are present.
    pub fn range(&self) -> Option<ReferenceRange> {
        match (self.reference_min, self.reference_max) {
            (Some(min), Some(max)) => Some(ReferenceRange::new(min, max)),
            _ => None,
        }
    }

    /// Relative distance of the value from the reference range.
    ///
    /// `0.0` inside the range, `(min - value) / min` below it,
    /// `(value - max) / max` above it. `None` when the value or either
    /// bound is missing.
    pub fn distance_from_normal(&self) -> Option<f64> {
        let value = self.value?;
        let min = self.reference_min?;
        let max = self.reference_max?;

        if value >= min && value <= max {
            Some(0.0)
        } else if value < min {
            Some((min - value) / min)
        } else {
            Some((value - max) / max)
        }
    }
}
