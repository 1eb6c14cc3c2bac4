//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::measurement::Measurement;
use super::series::DiagnosticTest;

/// A patient record owning its diagnostic test history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique patient ID
    pub id: String,
    /// Patient name
    pub name: String,
    /// Species (e.g., "canine", "feline", "equine")
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Owner/client name
    pub owner_name: Option<String>,
    /// Owner contact details
    pub owner_contact: Option<String>,
    /// Diagnostic tests performed for this patient
    pub tests: Vec<DiagnosticTest>,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(name: String, species: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            species,
            breed: None,
            date_of_birth: None,
            owner_name: None,
            owner_contact: None,
            tests: Vec::new(),
        }
    }

    /// Add a diagnostic test series.
    pub fn add_test(&mut self, test: DiagnosticTest) {
        self.tests.push(test);
    }

    /// Iterate over every measurement across all tests.
    pub fn all_measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.tests.iter().flat_map(|t| t.measurements.iter())
    }

    /// Date of the most recent dated measurement, if any.
    pub fn last_test_date(&self) -> Option<NaiveDate> {
        self.all_measurements().filter_map(|m| m.date).max()
    }
}
