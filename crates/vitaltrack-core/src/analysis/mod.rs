//! Health analysis engine.
//!
//! Pipeline: Measurement → Status Classifier → Health Scorer / Trend Analyzer
//!
//! Every function here is a pure, total computation over caller-owned data:
//! missing or malformed inputs fall back to a defined value (NORMAL, STABLE,
//! a score of 100) instead of failing the analysis for the whole patient.

mod classifier;
mod scorer;
mod trend;

pub use classifier::*;
pub use scorer::*;
pub use trend::*;
