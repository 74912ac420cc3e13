//! Single-row inference for home price estimates

use crate::error::DashboardError;
use crate::feature_builder::FeatureRow;
use crate::models::loader::LoadedModel;
use crate::types::prediction::Prediction;
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, error};

/// A fitted regression model that scores one row at a time
pub trait Regressor: Send + Sync {
    /// Number of input columns the model was exported with, when declared
    fn input_width(&self) -> Option<usize>;

    /// Score one row given in column order
    fn predict_row(&self, features: &[f32]) -> Result<f64>;
}

/// Runs a loaded model on feature rows and wraps the estimate in a band
#[derive(Debug, Clone)]
pub struct Predictor {
    band_fraction: f64,
}

impl Predictor {
    pub fn new(band_fraction: f64) -> Self {
        Self { band_fraction }
    }

    pub fn band_fraction(&self) -> f64 {
        self.band_fraction
    }

    /// Predict the price for one row.
    ///
    /// The row must be exactly as wide as the model expects; a mismatch is an
    /// error rather than something to pad or truncate.
    pub fn predict(
        &self,
        model: Option<&LoadedModel>,
        row: &FeatureRow,
    ) -> Result<Prediction, DashboardError> {
        let model = model.ok_or_else(|| {
            DashboardError::ArtifactMissing("no model artifact is loaded".to_string())
        })?;

        if let Some(expected) = model.regressor().input_width() {
            if expected != row.width() {
                error!(
                    model = %model.name,
                    expected = expected,
                    actual = row.width(),
                    "Feature row does not match model input"
                );
                return Err(DashboardError::ColumnMismatch {
                    expected,
                    actual: row.width(),
                });
            }
        }

        let start_time = Instant::now();
        let estimate = model
            .regressor()
            .predict_row(&row.to_f32())
            .map_err(|e| {
                error!(model = %model.name, error = %e, "Model inference failed");
                DashboardError::Inference(e.to_string())
            })?;

        if !estimate.is_finite() {
            return Err(DashboardError::Inference(format!(
                "model returned a non-finite estimate ({estimate})"
            )));
        }

        debug!(
            model = %model.name,
            estimate = estimate,
            columns = row.width(),
            latency_us = start_time.elapsed().as_micros() as u64,
            "Inference complete"
        );

        Ok(Prediction::new(estimate, self.band_fraction))
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(0.10)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::feature_builder::FeatureVectorBuilder;
    use anyhow::bail;

    /// Returns a fixed estimate
    pub(crate) struct FixedRegressor {
        pub width: Option<usize>,
        pub estimate: f64,
    }

    impl Regressor for FixedRegressor {
        fn input_width(&self) -> Option<usize> {
            self.width
        }

        fn predict_row(&self, _features: &[f32]) -> Result<f64> {
            Ok(self.estimate)
        }
    }

    /// Always fails, like an estimator seeing an unknown category
    pub(crate) struct FailingRegressor;

    impl Regressor for FailingRegressor {
        fn input_width(&self) -> Option<usize> {
            None
        }

        fn predict_row(&self, _features: &[f32]) -> Result<f64> {
            bail!("Found unknown categories ['Metairie'] in column 0")
        }
    }

    /// Sums the row, to check values reach the model in order
    struct SumRegressor;

    impl Regressor for SumRegressor {
        fn input_width(&self) -> Option<usize> {
            Some(3)
        }

        fn predict_row(&self, features: &[f32]) -> Result<f64> {
            Ok(features.iter().map(|&v| v as f64).sum())
        }
    }

    pub(crate) fn model(regressor: impl Regressor + 'static) -> LoadedModel {
        LoadedModel::new(
            "best_ensemble_model.onnx",
            "models/best_ensemble_model.onnx",
            Box::new(regressor),
        )
    }

    fn row(columns: &[&str], attrs: &[(&str, f64)]) -> FeatureRow {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        FeatureVectorBuilder::new(Some(columns.as_slice())).build(attrs.iter().copied())
    }

    #[test]
    fn test_prediction_with_band() {
        let model = model(FixedRegressor {
            width: Some(2),
            estimate: 300_000.0,
        });
        let row = row(&["LivingArea", "YearBuilt"], &[("LivingArea", 2000.0)]);

        let prediction = Predictor::default().predict(Some(&model), &row).unwrap();

        assert_eq!(prediction.estimate, 300_000.0);
        assert_eq!(prediction.band.lower, 270_000.0);
        assert_eq!(prediction.band.upper, 330_000.0);
    }

    #[test]
    fn test_row_values_reach_model() {
        let model = model(SumRegressor);
        let row = row(
            &["LivingArea", "BedroomsTotal", "YearBuilt"],
            &[("LivingArea", 2000.0), ("BedroomsTotal", 3.0), ("YearBuilt", 2000.0)],
        );

        let prediction = Predictor::default().predict(Some(&model), &row).unwrap();
        assert_eq!(prediction.estimate, 4003.0);
    }

    #[test]
    fn test_missing_model() {
        let row = row(&["LivingArea"], &[]);
        let err = Predictor::default().predict(None, &row).unwrap_err();
        assert!(matches!(err, DashboardError::ArtifactMissing(_)));
    }

    #[test]
    fn test_width_mismatch_is_an_error() {
        let model = model(FixedRegressor {
            width: Some(1020),
            estimate: 1.0,
        });
        let row = row(&["LivingArea", "YearBuilt"], &[]);

        let err = Predictor::default().predict(Some(&model), &row).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ColumnMismatch {
                expected: 1020,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_runtime_failure_carries_message() {
        let model = model(FailingRegressor);
        let row = row(&["City"], &[]);

        let err = Predictor::default().predict(Some(&model), &row).unwrap_err();
        assert!(matches!(err, DashboardError::Inference(_)));
        assert!(err.to_string().contains("unknown categories"));
    }

    #[test]
    fn test_non_finite_estimate_rejected() {
        let model = model(FixedRegressor {
            width: None,
            estimate: f64::NAN,
        });
        let row = row(&["LivingArea"], &[]);

        assert!(Predictor::default().predict(Some(&model), &row).is_err());
    }
}
