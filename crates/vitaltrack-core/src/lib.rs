//! VitalTrack Core Library
//!
//! Health analysis and trend engine for veterinary diagnostic measurements.
//!
//! # Architecture
//!
//! ```text
//! Measurements (value + date + reference range)
//!                      │
//!                      ▼
//!              Status Classifier
//!        NORMAL / LOW / HIGH / CRITICAL
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!    Health Scorer           Trend Analyzer
//!    0-100, recency-         IMPROVING / STABLE / DECLINING
//!    weighted deductions     + velocity (OLS slope)
//!          │                       │
//!          └───────────┬───────────┘
//!                      ▼
//!            Summaries · Alerts · Reports
//! ```
//!
//! # Core Principle
//!
//! **Every analysis is a total function.** Missing or malformed data points
//! degrade the output (NORMAL status, STABLE trend, a score of 100) instead
//! of aborting the computation for an entire patient. The engine performs no
//! I/O and holds no shared state; callers supply a complete, already-loaded
//! measurement set and a "current date" per call.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, DiagnosticTest, Measurement, ...)
//! - [`analysis`]: Status classifier, health scorer, trend analyzer
//! - [`report`]: Health summaries, alerts, JSON/CSV report export

pub mod analysis;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use analysis::{
    analyze_recent_trend, analyze_trend, analyze_trend_with_lookback, classify,
    classify_measurement, health_score, most_recent_measurement, patient_trends,
    recency_multiplier, trend_velocity, StatusCache,
};
pub use models::{
    DiagnosticTest, HealthStatus, Measurement, Patient, ReferenceRange, SeriesKey, Trend,
};
pub use report::{
    abnormal_measurements, alerts_csv, clinic_alerts, health_summary, patient_alert_summary,
    patient_alerts, HealthSummary, MeasurementAlert, PatientAlertSummary, PatientReport,
    ReportError, SeriesTrend,
};
