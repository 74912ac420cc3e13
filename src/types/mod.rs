//! Type definitions for the dashboard

pub mod prediction;
pub mod property;

pub use prediction::{ConfidenceBand, Prediction};
pub use property::PropertyInput;
