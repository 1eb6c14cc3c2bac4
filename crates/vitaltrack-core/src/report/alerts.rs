//! Alert generation for abnormal measurements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::classify_measurement;
use crate::models::{DiagnosticTest, HealthStatus, Measurement, Patient};

use super::summary::health_summary;

/// An alert for a single out-of-range measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementAlert {
    /// ID of the offending measurement
    pub measurement_id: String,
    /// Test name (e.g., "Complete Blood Count")
    pub test_name: String,
    /// Parameter measured (e.g., "Hemoglobin")
    pub parameter: String,
    /// Unit of measurement
    pub unit: Option<String>,
    /// Measured value
    pub value: Option<f64>,
    /// Reference range minimum
    pub reference_min: Option<f64>,
    /// Reference range maximum
    pub reference_max: Option<f64>,
    /// Health status that triggered the alert
    pub status: HealthStatus,
    /// Date of the measurement
    pub date: Option<NaiveDate>,
    /// Human-readable alert description
    pub message: String,
}

/// All active alerts for a patient, CRITICAL first, then most recent.
pub fn patient_alerts(patient: &Patient) -> Vec<MeasurementAlert> {
    let mut alerts: Vec<MeasurementAlert> = patient
        .tests
        .iter()
        .flat_map(|test| {
            test.measurements.iter().filter_map(move |m| {
                let status = classify_measurement(m);
                status
                    .is_abnormal()
                    .then(|| build_alert(test, m, status))
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        let urgency = |alert: &MeasurementAlert| u8::from(alert.status != HealthStatus::Critical);
        urgency(a).cmp(&urgency(b)).then(b.date.cmp(&a.date))
    });
    alerts
}

fn build_alert(test: &DiagnosticTest, m: &Measurement, status: HealthStatus) -> MeasurementAlert {
    MeasurementAlert {
        measurement_id: m.id.clone(),
        test_name: test.name.clone(),
        parameter: test.parameter.clone(),
        unit: test.unit.clone(),
        value: m.value,
        reference_min: m.reference_min,
        reference_max: m.reference_max,
        status,
        date: m.date,
        message: alert_message(test, m, status),
    }
}

/// Human-readable description of an abnormal measurement.
fn alert_message(test: &DiagnosticTest, m: &Measurement, status: HealthStatus) -> String {
    let unit = test.unit.as_deref().unwrap_or("");
    match (m.value, m.reference_min, m.reference_max) {
        (Some(value), Some(min), Some(max)) => {
            let phrase = match status {
                HealthStatus::Critical if value < min => "critically low",
                HealthStatus::Critical => "critically high",
                HealthStatus::Low => "below normal",
                HealthStatus::High => "above normal",
                HealthStatus::Normal => "within normal range",
            };
            format!(
                "{} {}: {:.2} {} (normal: {:.1}-{:.1} {})",
                test.parameter, phrase, value, unit, min, max, unit
            )
        }
        _ => format!("{} flagged with incomplete reference data", test.parameter),
    }
}

/// Per-patient alert rollup for a clinic-wide dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientAlertSummary {
    /// Patient ID
    pub patient_id: String,
    /// Patient name
    pub patient_name: String,
    /// Species
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Owner/client name
    pub owner_name: Option<String>,
    /// Owner contact details
    pub owner_contact: Option<String>,
    /// Number of CRITICAL measurements
    pub critical_count: usize,
    /// Number of abnormal measurements
    pub abnormal_count: usize,
    /// Overall health score (0-100)
    pub health_score: u8,
    /// Date of the most recent measurement
    pub last_test_date: Option<NaiveDate>,
    /// Description of the most severe current alert
    pub most_critical_alert: String,
}

/// Roll a patient's alerts up into one dashboard row.
pub fn patient_alert_summary(patient: &Patient, as_of: NaiveDate) -> PatientAlertSummary {
    let summary = health_summary(patient, as_of);
    let most_critical_alert = patient_alerts(patient)
        .first()
        .map(|alert| alert.message.clone())
        .unwrap_or_else(|| "No active alerts".to_string());

    PatientAlertSummary {
        patient_id: patient.id.clone(),
        patient_name: patient.name.clone(),
        species: patient.species.clone(),
        breed: patient.breed.clone(),
        owner_name: patient.owner_name.clone(),
        owner_contact: patient.owner_contact.clone(),
        critical_count: summary.critical_count,
        abnormal_count: summary.abnormal_count,
        health_score: summary.health_score,
        last_test_date: patient.last_test_date(),
        most_critical_alert,
    }
}

/// Clinic-wide alert dashboard: only patients with abnormalities, the most
/// critical first.
pub fn clinic_alerts(patients: &[Patient], as_of: NaiveDate) -> Vec<PatientAlertSummary> {
    let mut summaries: Vec<PatientAlertSummary> = patients
        .iter()
        .map(|patient| patient_alert_summary(patient, as_of))
        .filter(|summary| summary.abnormal_count > 0)
        .collect();

    summaries.sort_by(|a, b| {
        b.critical_count
            .cmp(&a.critical_count)
            .then(b.abnormal_count.cmp(&a.abnormal_count))
    });
    summaries
}

/// Export a list of alerts as CSV.
pub fn alerts_csv(alerts: &[MeasurementAlert]) -> String {
    let mut csv = String::new();

    // Header
    csv.push_str("test_name,parameter,unit,value,reference_min,reference_max,status,date,message\n");

    // Lines
    for alert in alerts {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{:?},{},{}\n",
            escape_csv(&alert.test_name),
            escape_csv(&alert.parameter),
            alert.unit.as_deref().unwrap_or(""),
            alert.value.map(|v| v.to_string()).unwrap_or_default(),
            alert.reference_min.map(|v| v.to_string()).unwrap_or_default(),
            alert.reference_max.map(|v| v.to_string()).unwrap_or_default(),
            alert.status,
            alert.date.map(|d| d.to_string()).unwrap_or_default(),
            escape_csv(&alert.message),
        ));
    }

    csv
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
