//! Domain models for the vitaltrack system.

mod measurement;
mod patient;
mod series;
mod status;

pub use measurement::*;
pub use patient::*;
pub use series::*;
pub use status::*;
