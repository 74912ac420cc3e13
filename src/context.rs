//! Application context shared by every page.
//!
//! Built once at startup and passed by reference; nothing in it changes
//! after construction.

use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::feature_builder::{FeatureRow, FeatureVectorBuilder};
use crate::metadata::MetadataBundle;
use crate::models::{LoadedModel, ModelLoader, Predictor};
use crate::types::{Prediction, PropertyInput};
use tracing::{error, info};

pub struct AppContext {
    config: AppConfig,
    model: Result<LoadedModel, String>,
    metadata: MetadataBundle,
    predictor: Predictor,
}

/// Outcome of a successful request from the prediction form
#[derive(Debug, Clone)]
pub struct Valuation {
    pub prediction: Prediction,
    pub row: FeatureRow,
}

impl AppContext {
    /// Load the model and metadata named by `config`.
    ///
    /// Never fails: a missing or unreadable model is kept as an error
    /// message for the pages to show.
    pub fn load(config: AppConfig) -> Self {
        let loader = ModelLoader::new(&config.models);
        let model = loader.load(&config.models.models_dir).map_err(|e| {
            error!(
                dir = %config.models.models_dir.display(),
                error = %e,
                "Error loading model"
            );
            format!("{e:#}")
        });
        let metadata = MetadataBundle::load(&config.models);

        if let Ok(model) = &model {
            info!(model = %model.name, "Model ready");
        }

        Self::new(config, model, metadata)
    }

    pub fn new(
        config: AppConfig,
        model: Result<LoadedModel, String>,
        metadata: MetadataBundle,
    ) -> Self {
        let predictor = Predictor::new(config.predict.band_fraction);
        Self {
            config,
            model,
            metadata,
            predictor,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref().ok()
    }

    /// Why the model is unavailable, if it is
    pub fn model_error(&self) -> Option<&str> {
        self.model.as_ref().err().map(String::as_str)
    }

    pub fn metadata(&self) -> &MetadataBundle {
        &self.metadata
    }

    /// Row builder over the expected feature list, or the fallback
    pub fn feature_builder(&self) -> FeatureVectorBuilder {
        FeatureVectorBuilder::new(self.metadata.expected_features.as_deref())
    }

    /// Value one property
    pub fn predict(&self, input: &PropertyInput) -> Result<Valuation, DashboardError> {
        let row = self.feature_builder().build(input.attributes());
        let prediction = self.predictor.predict(self.model(), &row)?;
        Ok(Valuation { prediction, row })
    }
}
