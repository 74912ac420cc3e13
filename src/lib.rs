//! Home Price Dashboard Library
//!
//! Loads a trained home price regressor and its metadata, reconciles user
//! input with the model's expected columns, and serves valuations through a
//! terminal dashboard.

pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod feature_builder;
pub mod logging;
pub mod metadata;
pub mod models;
pub mod types;
pub mod ui;

pub use config::AppConfig;
pub use context::{AppContext, Valuation};
pub use error::DashboardError;
pub use feature_builder::{FeatureRow, FeatureVectorBuilder};
pub use metadata::MetadataBundle;
pub use models::{LoadedModel, ModelLoader, Predictor};
pub use types::{ConfidenceBand, Prediction, PropertyInput};
