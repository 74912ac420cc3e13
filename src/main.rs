//! Home Price Dashboard - Main Entry Point
//!
//! Loads the model once, then hands the terminal to the dashboard.

use anyhow::Result;
use home_price_dashboard::{config::AppConfig, context::AppContext, logging, ui};
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init_file(&config.logging, "home_price_dashboard")?;

    info!(
        models_dir = %config.models.models_dir.display(),
        band_fraction = config.predict.band_fraction,
        "Starting Home Price Dashboard"
    );

    let ctx = AppContext::load(config);
    match ctx.model() {
        Some(model) => info!(
            model = %model.name,
            features = ctx.feature_builder().feature_count(),
            fallback = ctx.feature_builder().using_fallback(),
            "Dashboard ready"
        ),
        None => info!("Dashboard ready without a model, predictions disabled"),
    }

    ui::run(&ctx)
}
