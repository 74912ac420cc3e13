//! Model metadata shipped alongside the artifact.
//!
//! Every file is optional and loaded on its own: a missing or malformed file
//! leaves only its own slot empty.

use crate::config::ModelsConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One row of the feature importance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Training results summary, kept as the raw record so it can be exported
/// exactly as it was read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsSummary {
    record: Map<String, Value>,
}

impl ResultsSummary {
    pub fn new(record: Map<String, Value>) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Best R² reached, from `overall_best_r2` or `best_r2`
    pub fn best_r2(&self) -> Option<f64> {
        self.first_f64(&["overall_best_r2", "best_r2"])
    }

    /// Name of the winning model, from `overall_best` or `best_model`
    pub fn best_model(&self) -> Option<&str> {
        ["overall_best", "best_model"]
            .iter()
            .find_map(|key| self.record.get(*key).and_then(Value::as_str))
    }

    pub fn n_features(&self) -> Option<u64> {
        self.first_u64("n_features")
    }

    pub fn n_train_samples(&self) -> Option<u64> {
        self.first_u64("n_train_samples")
    }

    fn first_f64(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|key| self.record.get(*key).and_then(Value::as_f64))
    }

    fn first_u64(&self, key: &str) -> Option<u64> {
        let value = self.record.get(key)?;
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
    }
}

/// Everything the dashboard knows about the model besides the model itself
#[derive(Debug, Clone, Default)]
pub struct MetadataBundle {
    pub summary: Option<ResultsSummary>,
    pub feature_importance: Option<Vec<FeatureImportance>>,
    /// Feature name to type descriptor
    pub feature_schema: Option<BTreeMap<String, Value>>,
    /// Ordered columns the model was trained on
    pub expected_features: Option<Vec<String>>,
}

impl MetadataBundle {
    /// Load all metadata files found in the models directory
    pub fn load(config: &ModelsConfig) -> Self {
        let dir = config.models_dir.as_path();

        let summary = config
            .summary_candidates
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .and_then(|path| load_optional(&path, read_summary));

        let bundle = Self {
            summary,
            feature_importance: load_optional(
                &dir.join(&config.feature_importance_file),
                read_feature_importance,
            ),
            feature_schema: load_optional(&dir.join(&config.feature_schema_file), read_schema),
            expected_features: load_optional(
                &dir.join(&config.expected_features_file),
                read_expected_features,
            ),
        };

        info!(
            dir = %dir.display(),
            slots = ?bundle.slots(),
            "Metadata loaded"
        );

        bundle
    }

    /// Names of the slots that hold data
    pub fn slots(&self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        if self.summary.is_some() {
            slots.push("summary");
        }
        if self.feature_importance.is_some() {
            slots.push("feature_importance");
        }
        if self.feature_schema.is_some() {
            slots.push("feature_schema");
        }
        if self.expected_features.is_some() {
            slots.push("expected_features");
        }
        slots
    }

    /// Feature importance rows, if any were loaded
    pub fn importance_rows(&self) -> Option<&[FeatureImportance]> {
        self.feature_importance
            .as_deref()
            .filter(|rows| !rows.is_empty())
    }

    /// Type descriptor of a feature as display text
    pub fn feature_type(&self, feature: &str) -> Option<String> {
        let value = self.feature_schema.as_ref()?.get(feature)?;
        Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Load one optional file, isolating its failures from every other file
fn load_optional<T>(path: &Path, read: fn(&Path) -> Result<T>) -> Option<T> {
    if !path.exists() {
        debug!(path = %path.display(), "Metadata file not found");
        return None;
    }

    match read(path) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load metadata file, skipping");
            None
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).context(format!("Failed to read {:?}", path))?;
    serde_json::from_str(&text).context(format!("Invalid JSON in {:?}", path))
}

fn read_summary(path: &Path) -> Result<ResultsSummary> {
    match read_json(path)? {
        Value::Object(record) => Ok(ResultsSummary::new(record)),
        _ => bail!("Results summary {:?} is not a JSON object", path),
    }
}

fn read_feature_importance(path: &Path) -> Result<Vec<FeatureImportance>> {
    let mut reader = csv::Reader::from_path(path).context(format!("Failed to open {:?}", path))?;
    reader
        .deserialize()
        .collect::<Result<Vec<FeatureImportance>, csv::Error>>()
        .context(format!("Invalid feature importance table in {:?}", path))
}

fn read_schema(path: &Path) -> Result<BTreeMap<String, Value>> {
    match read_json(path)? {
        Value::Object(schema) => Ok(schema.into_iter().collect()),
        _ => bail!("Feature schema {:?} is not a JSON object", path),
    }
}

fn read_expected_features(path: &Path) -> Result<Vec<String>> {
    serde_json::from_value(read_json(path)?)
        .context(format!("Expected feature list {:?} is not an array of names", path))
}
