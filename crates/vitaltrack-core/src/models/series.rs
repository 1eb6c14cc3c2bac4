//! Diagnostic test series models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::measurement::{Measurement, ReferenceRange};

/// Composite identity of one logical measurement series.
///
/// Keyed by test ID plus parameter name rather than display strings, so two
/// tests that happen to share a display name never collide in trend maps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    /// ID of the owning diagnostic test
    pub test_id: String,
    /// Parameter name within the test (e.g., "Hemoglobin")
    pub parameter: String,
}

/// A diagnostic test tracking one parameter over time.
///
/// This is the "series" the trend analyzer operates on: an ordered-by-date
/// collection of measurements sharing one reference range and one logical
/// test identity (e.g., "Complete Blood Count — Hemoglobin").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticTest {
    /// Unique test ID
    pub id: String,
    /// Test name (e.g., "Complete Blood Count")
    pub name: String,
    /// Parameter measured (e.g., "Hemoglobin")
    pub parameter: String,
    /// Unit of measurement (e.g., "g/dL")
    pub unit: Option<String>,
    /// Reference range for this parameter
    pub reference_range: Option<ReferenceRange>,
    /// Recorded measurements, in data-entry order
    pub measurements: Vec<Measurement>,
}

impl DiagnosticTest {
    /// Create a test series without a reference range.
    pub fn new(name: String, parameter: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            parameter,
            unit: None,
            reference_range: None,
            measurements: Vec::new(),
        }
    }

    /// Create a test series with a unit and reference range.
    pub fn with_range(name: String, parameter: String, unit: String, range: ReferenceRange) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            parameter,
            unit: Some(unit),
            reference_range: Some(range),
            measurements: Vec::new(),
        }
    }

    /// Record a measurement, stamping it with this test's reference bounds.
    pub fn record(&mut self, value: f64, date: NaiveDate) {
        let measurement = match self.reference_range {
            Some(range) => Measurement::with_range(Some(value), Some(date), range),
            None => Measurement::new(Some(value), Some(date)),
        };
        self.measurements.push(measurement);
    }

    /// Composite key identifying this series in trend maps.
    pub fn series_key(&self) -> SeriesKey {
        SeriesKey {
            test_id: self.id.clone(),
            parameter: self.parameter.clone(),
        }
    }

    /// Display label combining test and parameter names.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.parameter)
    }
}
