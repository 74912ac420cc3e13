//! Downloads offered on the analysis page.
//!
//! Both exports are rebuilt from metadata already in memory.

use crate::metadata::{FeatureImportance, ResultsSummary};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const FEATURE_IMPORTANCE_FILE: &str = "feature_importance.csv";
pub const SUMMARY_FILE: &str = "model_summary.json";

const FEATURE_IMPORTANCE_HEADER: [&str; 2] = ["feature", "importance"];

/// Feature importance table as CSV with a `feature,importance` header.
///
/// The header is written even when there are no rows.
pub fn feature_importance_csv(rows: &[FeatureImportance]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(FEATURE_IMPORTANCE_HEADER)
        .context("Failed to encode feature importance header")?;
    for row in rows {
        writer.serialize(row).context("Failed to encode feature importance row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("Feature importance CSV is not UTF-8")
}

/// Results summary as JSON indented by two spaces
pub fn summary_json(summary: &ResultsSummary) -> Result<String> {
    serde_json::to_string_pretty(summary.record()).context("Failed to encode results summary")
}

/// Write an export into `dir`, creating it if needed
pub fn write_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).context(format!("Failed to create export directory {:?}", dir))?;
    let path = dir.join(file_name);
    fs::write(&path, contents).context(format!("Failed to write {:?}", path))?;
    info!(path = %path.display(), bytes = contents.len(), "Export written");
    Ok(path)
}
