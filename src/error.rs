//! Error taxonomy for the prediction path

use std::path::Path;
use thiserror::Error;

/// Failures a single prediction request can end in.
///
/// None of these are fatal to the process; the page that triggered the
/// request renders them and keeps serving.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// No model is available to run
    #[error("model not loaded: {0}")]
    ArtifactMissing(String),

    /// The row does not have the width the model was exported with
    #[error("feature count mismatch: model expects {expected} columns, row has {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    /// The runtime rejected the input or failed while running the graph
    #[error("inference error: {0}")]
    Inference(String),
}

impl DashboardError {
    /// No candidate file exists in the models directory
    pub fn no_candidate(dir: &Path, candidates: &[String]) -> Self {
        Self::ArtifactMissing(format!(
            "no model file in {} (tried {})",
            dir.display(),
            candidates.join(", ")
        ))
    }
}
