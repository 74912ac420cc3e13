//! Model artifact loading and inference

pub mod inference;
pub mod loader;

pub use inference::{Predictor, Regressor};
pub use loader::{LoadedModel, ModelLoader};
