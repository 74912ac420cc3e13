//! Model artifact loader

use crate::config::ModelsConfig;
use crate::error::DashboardError;
use crate::models::inference::Regressor;
use anyhow::{anyhow, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Tensor, ValueType};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Loaded model artifact with the file it came from
pub struct LoadedModel {
    /// Artifact filename, e.g. `best_ensemble_model.onnx`
    pub name: String,
    pub path: PathBuf,
    regressor: Box<dyn Regressor>,
}

impl LoadedModel {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, regressor: Box<dyn Regressor>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            regressor,
        }
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }

    /// Human-readable label: file stem with underscores as spaces
    pub fn display_name(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().replace('_', " "))
            .unwrap_or_else(|| self.name.clone())
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("input_width", &self.regressor.input_width())
            .finish()
    }
}

/// ONNX regression model served through ONNX Runtime
pub struct OnnxRegressor {
    /// Sessions need exclusive access to run
    session: RwLock<Session>,
    input_name: String,
    output_name: String,
    input_width: Option<usize>,
}

impl OnnxRegressor {
    /// Load an ONNX model from file
    pub fn from_file(path: &Path, onnx_threads: usize) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| anyhow!("Model {:?} declares no inputs", path))?;
        let input_name = input.name.clone();

        // Last dimension of a [batch, features] input; dynamic dims are negative
        let input_width = match &input.input_type {
            ValueType::Tensor { shape, .. } => shape
                .last()
                .copied()
                .filter(|dim| *dim > 0)
                .map(|dim| dim as usize),
            _ => None,
        };

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("variable") || o.name.contains("output") || o.name.contains("predict"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| anyhow!("Model {:?} declares no outputs", path))?;

        Ok(Self {
            session: RwLock::new(session),
            input_name,
            output_name,
            input_width,
        })
    }
}

impl Regressor for OnnxRegressor {
    fn input_width(&self) -> Option<usize> {
        self.input_width
    }

    fn predict_row(&self, features: &[f32]) -> Result<f64> {
        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, features.to_vec())).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .write()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| anyhow!("Output {} missing from model results", self.output_name))?;

        // Regressors export either float or double outputs
        let estimate = if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            data.first().map(|&v| v as f64)
        } else {
            let (_, data) = output.try_extract_tensor::<f64>()?;
            data.first().copied()
        };

        estimate.ok_or_else(|| anyhow!("Model returned an empty output"))
    }
}

/// Resolves and loads the model artifact from the models directory
pub struct ModelLoader {
    candidates: Vec<String>,
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    pub fn new(config: &ModelsConfig) -> Self {
        Self {
            candidates: config.model_candidates.clone(),
            onnx_threads: config.onnx_threads.max(1),
        }
    }

    /// First candidate, in priority order, that exists in `models_dir`
    pub fn resolve<P: AsRef<Path>>(&self, models_dir: P) -> Option<PathBuf> {
        let models_dir = models_dir.as_ref();
        self.candidates
            .iter()
            .map(|name| models_dir.join(name))
            .find(|path| {
                let exists = path.is_file();
                if !exists {
                    debug!(path = %path.display(), "Model candidate not found");
                }
                exists
            })
    }

    /// Load the highest-priority model found in `models_dir`
    pub fn load<P: AsRef<Path>>(&self, models_dir: P) -> Result<LoadedModel> {
        let models_dir = models_dir.as_ref();

        let path = self
            .resolve(models_dir)
            .ok_or_else(|| DashboardError::no_candidate(models_dir, &self.candidates))?;

        self.load_model(&path)
    }

    /// Load a single ONNX model from file
    pub fn load_model(&self, path: &Path) -> Result<LoadedModel> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        // Initialize ONNX Runtime
        ort::init().commit()?;

        let regressor = OnnxRegressor::from_file(path, self.onnx_threads).map_err(|e| {
            warn!(model = %name, error = %e, "Failed to load model");
            e
        })?;

        info!(
            model = %name,
            input = %regressor.input_name,
            output = %regressor.output_name,
            input_width = ?regressor.input_width,
            "Model loaded successfully"
        );

        Ok(LoadedModel::new(name, path, Box::new(regressor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"stub").unwrap();
    }

    #[test]
    fn test_resolve_prefers_highest_priority() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "best_model_final.onnx");
        touch(dir.path(), "best_advanced_model.onnx");
        touch(dir.path(), "best_ensemble_model.onnx");

        let loader = ModelLoader::new(&ModelsConfig::default());
        let resolved = loader.resolve(dir.path()).unwrap();

        assert_eq!(resolved, dir.path().join("best_ensemble_model.onnx"));
    }

    #[test]
    fn test_resolve_falls_through_in_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "best_model_final.onnx");

        let loader = ModelLoader::new(&ModelsConfig::default());
        assert_eq!(
            loader.resolve(dir.path()),
            Some(dir.path().join("best_model_final.onnx"))
        );

        touch(dir.path(), "best_advanced_model.onnx");
        assert_eq!(
            loader.resolve(dir.path()),
            Some(dir.path().join("best_advanced_model.onnx"))
        );
    }

    #[test]
    fn test_resolve_ignores_directories_named_like_candidates() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("best_ensemble_model.onnx")).unwrap();
        touch(dir.path(), "best_model_final.onnx");

        let loader = ModelLoader::new(&ModelsConfig::default());
        assert_eq!(
            loader.resolve(dir.path()),
            Some(dir.path().join("best_model_final.onnx"))
        );
    }

    #[test]
    fn test_load_without_candidates_reports_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ModelLoader::new(&ModelsConfig::default());

        let err = loader.load(dir.path()).unwrap_err();
        let err = err.downcast::<DashboardError>().unwrap();

        assert!(matches!(err, DashboardError::ArtifactMissing(_)));
        assert!(err.to_string().contains("best_ensemble_model.onnx"));
    }

    #[test]
    fn test_display_name() {
        struct Fixed;
        impl Regressor for Fixed {
            fn input_width(&self) -> Option<usize> {
                None
            }
            fn predict_row(&self, _features: &[f32]) -> Result<f64> {
                Ok(1.0)
            }
        }

        let model = LoadedModel::new("best_ensemble_model.onnx", "models/best_ensemble_model.onnx", Box::new(Fixed));
        assert_eq!(model.display_name(), "best ensemble model");
    }
}
