//! Patient health summaries and full report export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_trend, classify_measurement, health_score, trend_velocity};
use crate::models::{HealthStatus, Measurement, Patient, Trend};

use super::alerts::{patient_alerts, MeasurementAlert};
use super::ReportResult;

/// Status counts and overall score for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthSummary {
    /// Overall health score (0-100)
    pub health_score: u8,
    /// Total number of measurements on record
    pub total_measurements: usize,
    /// Count of NORMAL measurements
    pub normal_count: usize,
    /// Count of LOW measurements
    pub low_count: usize,
    /// Count of HIGH measurements
    pub high_count: usize,
    /// Count of CRITICAL measurements
    pub critical_count: usize,
    /// Count of all non-NORMAL measurements
    pub abnormal_count: usize,
}

/// Build the health summary for a patient as of a given date.
pub fn health_summary(patient: &Patient, as_of: NaiveDate) -> HealthSummary {
    let mut normal_count = 0;
    let mut low_count = 0;
    let mut high_count = 0;
    let mut critical_count = 0;
    let mut total_measurements = 0;

    for measurement in patient.all_measurements() {
        total_measurements += 1;
        match classify_measurement(measurement) {
            HealthStatus::Normal => normal_count += 1,
            HealthStatus::Low => low_count += 1,
            HealthStatus::High => high_count += 1,
            HealthStatus::Critical => critical_count += 1,
        }
    }

    HealthSummary {
        health_score: health_score(patient.all_measurements(), as_of),
        total_measurements,
        normal_count,
        low_count,
        high_count,
        critical_count,
        abnormal_count: total_measurements - normal_count,
    }
}

/// Every measurement of a patient that is outside its reference range.
pub fn abnormal_measurements(patient: &Patient) -> Vec<&Measurement> {
    patient
        .all_measurements()
        .filter(|m| classify_measurement(m).is_abnormal())
        .collect()
}

/// Trend of one series within a patient report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesTrend {
    /// Test name (e.g., "Complete Blood Count")
    pub test_name: String,
    /// Parameter measured
    pub parameter: String,
    /// Long-horizon trend direction
    pub trend: Trend,
    /// Rate of change (positive = declining, negative = improving)
    pub velocity: f64,
}

/// A complete health report for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientReport {
    /// Patient ID
    pub patient_id: String,
    /// Patient name
    pub patient_name: String,
    /// Species
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Date the report was generated for
    pub generated_on: NaiveDate,
    /// Status counts and overall score
    pub summary: HealthSummary,
    /// Per-series trend directions and velocities
    pub trends: Vec<SeriesTrend>,
    /// Active alerts, most urgent first
    pub alerts: Vec<MeasurementAlert>,
}

impl PatientReport {
    /// Build a full report for a patient as of a given date.
    pub fn build(patient: &Patient, as_of: NaiveDate) -> Self {
        let trends = patient
            .tests
            .iter()
            .map(|test| SeriesTrend {
                test_name: test.name.clone(),
                parameter: test.parameter.clone(),
                trend: analyze_trend(&test.measurements, as_of),
                velocity: trend_velocity(&test.measurements),
            })
            .collect();

        Self {
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            species: patient.species.clone(),
            breed: patient.breed.clone(),
            generated_on: as_of,
            summary: health_summary(patient, as_of),
            trends,
            alerts: patient_alerts(patient),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
