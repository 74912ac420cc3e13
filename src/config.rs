//! Configuration management for the home price dashboard

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub predict: PredictConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model artifact and metadata locations
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the model artifact and its metadata files
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    /// Candidate model filenames, highest priority first
    #[serde(default = "default_model_candidates")]
    pub model_candidates: Vec<String>,
    /// Candidate results summary filenames, highest priority first
    #[serde(default = "default_summary_candidates")]
    pub summary_candidates: Vec<String>,
    #[serde(default = "default_feature_importance_file")]
    pub feature_importance_file: String,
    #[serde(default = "default_feature_schema_file")]
    pub feature_schema_file: String,
    #[serde(default = "default_expected_features_file")]
    pub expected_features_file: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_candidates() -> Vec<String> {
    vec![
        "best_ensemble_model.onnx".to_string(),
        "best_advanced_model.onnx".to_string(),
        "best_model_final.onnx".to_string(),
    ]
}

fn default_summary_candidates() -> Vec<String> {
    vec![
        "final_ensemble_summary.json".to_string(),
        "advanced_models_summary.json".to_string(),
    ]
}

fn default_feature_importance_file() -> String {
    "feature_importance.csv".to_string()
}

fn default_feature_schema_file() -> String {
    "feature_schema.json".to_string()
}

fn default_expected_features_file() -> String {
    "expected_feature_columns.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            model_candidates: default_model_candidates(),
            summary_candidates: default_summary_candidates(),
            feature_importance_file: default_feature_importance_file(),
            feature_schema_file: default_feature_schema_file(),
            expected_features_file: default_expected_features_file(),
            onnx_threads: default_onnx_threads(),
        }
    }
}

/// Prediction settings
#[derive(Debug, Clone, Deserialize)]
pub struct PredictConfig {
    /// Half-width of the displayed band as a fraction of the estimate
    #[serde(default = "default_band_fraction")]
    pub band_fraction: f64,
}

fn default_band_fraction() -> f64 {
    0.10
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            band_fraction: default_band_fraction(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Baseline R² the model is compared against (gauge threshold, deltas)
    #[serde(default = "default_baseline_r2")]
    pub baseline_r2: f64,
    /// Number of features shown in the importance chart
    #[serde(default = "default_top_features")]
    pub top_features: usize,
    /// Directory that receives exported files
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Event poll interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_baseline_r2() -> f64 {
    0.884
}

fn default_top_features() -> usize {
    20
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_tick_ms() -> u64 {
    120
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            baseline_r2: default_baseline_r2(),
            top_features: default_top_features(),
            export_dir: default_export_dir(),
            tick_ms: default_tick_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Log file; the terminal belongs to the UI
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("dashboard.log")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path.
    ///
    /// The file is optional; `DASHBOARD__SECTION__KEY` environment variables
    /// override whatever it sets.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix("DASHBOARD").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.models.models_dir, PathBuf::from("models"));
        assert_eq!(config.models.model_candidates.len(), 3);
        assert_eq!(config.models.model_candidates[0], "best_ensemble_model.onnx");
        assert_eq!(config.predict.band_fraction, 0.10);
        assert_eq!(config.dashboard.baseline_r2, 0.884);
        assert_eq!(config.dashboard.top_features, 20);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.models.summary_candidates.len(), 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[models]\nmodels_dir = \"artifacts\"\n\n[dashboard]\ntop_features = 10").unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.models.models_dir, PathBuf::from("artifacts"));
        assert_eq!(config.models.feature_importance_file, "feature_importance.csv");
        assert_eq!(config.dashboard.top_features, 10);
        assert_eq!(config.dashboard.baseline_r2, 0.884);
    }
}
