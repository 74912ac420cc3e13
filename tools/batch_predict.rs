//! Batch Valuation Tool
//!
//! Values every row of a properties CSV with the dashboard's model and prints
//! one JSON object per row on stdout.

use anyhow::{bail, Context, Result};
use home_price_dashboard::{
    config::AppConfig, context::AppContext, logging, Prediction, PropertyInput,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};

const USAGE: &str = "usage: batch_predict <properties.csv> [config.toml]";

/// A valued row: `{"row", "estimate", "lower", "upper"}`
#[derive(Serialize)]
struct ValuedRow<'a> {
    row: usize,
    #[serde(flatten)]
    prediction: &'a Prediction,
}

/// Output line for one CSV row; rows are numbered from 1
fn batch_line(ctx: &AppContext, row: usize, record: Result<PropertyInput, csv::Error>) -> Value {
    let input = match record {
        Ok(input) => input,
        Err(e) => return json!({ "row": row, "error": format!("invalid row: {e}") }),
    };

    match ctx.predict(&input) {
        Ok(valuation) => serde_json::to_value(ValuedRow {
            row,
            prediction: &valuation.prediction,
        })
        .unwrap_or_else(|e| json!({ "row": row, "error": format!("encoding failed: {e}") })),
        Err(e) => json!({ "row": row, "error": e.to_string() }),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(csv_path) = args.get(1) else {
        bail!(USAGE);
    };
    let config = match args.get(2) {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    logging::init_stderr(&config.logging, "batch_predict")?;

    info!(input = %csv_path, "Starting batch valuation");

    let ctx = AppContext::load(config);
    if let Some(reason) = ctx.model_error() {
        bail!("model not loaded: {reason}");
    }

    let mut reader =
        csv::Reader::from_path(csv_path).context(format!("Failed to open {:?}", csv_path))?;
    let mut out = BufWriter::new(io::stdout().lock());

    let mut rows = 0usize;
    let mut failed = 0usize;
    for (i, record) in reader.deserialize::<PropertyInput>().enumerate() {
        let line = batch_line(&ctx, i + 1, record);
        if line.get("error").is_some() {
            failed += 1;
            warn!(row = i + 1, error = %line["error"], "Row not valued");
        }
        writeln!(out, "{line}")?;
        rows += 1;
    }
    out.flush()?;

    info!(rows = rows, failed = failed, "Batch valuation complete");
    Ok(())
}
