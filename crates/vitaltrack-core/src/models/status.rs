//! Health status and trend enumerations.

use serde::{Deserialize, Serialize};

/// Classification of a single measurement against its reference range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    /// Within the reference range
    Normal,
    /// Below the reference minimum
    Low,
    /// Above the reference maximum
    High,
    /// At or beyond a critical threshold (70% of min / 130% of max)
    Critical,
}

impl HealthStatus {
    /// Severity rank for sorting and scoring: Critical > Low/High > Normal.
    pub fn severity(&self) -> u8 {
        match self {
            HealthStatus::Normal => 0,
            HealthStatus::Low | HealthStatus::High => 1,
            HealthStatus::Critical => 2,
        }
    }

    /// Check whether this status should raise an alert.
    pub fn is_abnormal(&self) -> bool {
        *self != HealthStatus::Normal
    }
}

/// Direction of change of a measurement series over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Values are moving closer to the reference range
    Improving,
    /// No significant change
    Stable,
    /// Values are moving away from the reference range
    Declining,
}
