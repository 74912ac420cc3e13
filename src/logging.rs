//! Tracing subscriber setup

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Library target; binaries add their own next to it
const LIB_TARGET: &str = "home_price_dashboard";

/// Filter from `RUST_LOG`, with the library and `bin_target` at the configured level
fn filter(config: &LoggingConfig, bin_target: &str) -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for target in [LIB_TARGET, bin_target] {
        let directive = format!("{}={}", target, config.level)
            .parse()
            .context(format!("Invalid log level {:?}", config.level))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

fn install<W>(config: &LoggingConfig, bin_target: &str, writer: W, ansi: bool) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config, bin_target)?)
        .with_writer(writer)
        .with_ansi(ansi);

    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Log to the configured file, appending; the terminal belongs to the UI
pub fn init_file(config: &LoggingConfig, bin_target: &str) -> Result<()> {
    if let Some(parent) = config.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .context(format!("Failed to open log file {:?}", config.file))?;

    install(config, bin_target, Mutex::new(file), false)
}

/// Log to stderr, keeping stdout free for output
pub fn init_stderr(config: &LoggingConfig, bin_target: &str) -> Result<()> {
    install(config, bin_target, io::stderr, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_accepts_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(filter(&config(level), "batch_predict").is_ok(), "{level}");
        }
    }

    #[test]
    fn test_binary_target_enabled_alongside_library() {
        let filter = filter(&config("info"), "batch_predict").unwrap();
        let subscriber = Registry::default().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "batch_predict", Level::INFO));
            assert!(tracing::enabled!(target: "batch_predict", Level::WARN));
            assert!(tracing::enabled!(target: "home_price_dashboard", Level::INFO));
        });
    }

    #[test]
    fn test_directives_name_both_targets() {
        let rendered = filter(&config("debug"), "batch_predict").unwrap().to_string();
        assert!(rendered.contains("home_price_dashboard=debug"), "{rendered}");
        assert!(rendered.contains("batch_predict=debug"), "{rendered}");
    }
}
