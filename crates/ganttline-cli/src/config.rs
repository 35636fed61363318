//! Layout options and "today" resolution for CLI commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use ganttline_core::LayoutOptions;

/// Date format accepted by `--today`; zero padding is optional
const DATE_FORMAT: &str = "%Y-%m-%d";

/// clap value parser for `--today`
pub fn parse_today(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}' ({})", value, e))
}

/// Load layout options from a TOML file, or the defaults when no file is given
pub fn load_options(path: Option<&Path>) -> Result<LayoutOptions> {
    let Some(path) = path else {
        return Ok(LayoutOptions::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let options: LayoutOptions = toml::from_str(&content)
        .with_context(|| format!("Invalid layout options in {}", path.display()))?;

    tracing::debug!(?options, config = %path.display(), "loaded layout options");
    Ok(options)
}

/// The date drawn as "today"
///
/// `--no-today` wins over an explicit date. Without either, the local date is used.
pub fn resolve_today(explicit: Option<NaiveDate>, disabled: bool) -> Option<NaiveDate> {
    if disabled {
        return None;
    }
    Some(explicit.unwrap_or_else(|| Local::now().date_naive()))
}
