//! File-only tracing setup

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "geoweather=info";

/// Install the global subscriber, appending to `log_file`.
///
/// The terminal owns stdout, so without a file nothing is installed and
/// events are dropped. `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_installs_nothing() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_unopenable_file_reports_path() {
        let path = Path::new("/nonexistent-geoweather-dir/app.log");
        let err = init(Some(path)).unwrap_err();
        assert!(err.to_string().contains("/nonexistent-geoweather-dir/app.log"));
    }
}
