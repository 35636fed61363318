//! # ganttline-parser
//!
//! Loads charts from fixture files.
//!
//! This crate provides:
//! - JSON and TOML fixture parsing
//! - Grouped (`groups`) and legacy flat (`tasks` with a `type`) layouts
//! - Lenient calendar dates (`2013-1-28` as well as `2013-01-28`)
//!
//! ## Example
//!
//! ```rust
//! use ganttline_parser::parse_json;
//!
//! let input = r#"{
//!     "title": "Launch",
//!     "groups": [
//!         { "name": "development", "tasks": [
//!             { "name": "sketch", "start": "2013-2-1", "end": "2013-2-6", "progress": 20 }
//!         ]}
//!     ]
//! }"#;
//!
//! let chart = parse_json(input).unwrap();
//! assert_eq!(chart.groups[0].tasks[0].name, "sketch");
//! ```

pub mod fixture;

use ganttline_core::Chart;
use std::path::Path;
use thiserror::Error;

/// Parsing error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid date '{value}' in task '{task}'")]
    InvalidDate { value: String, task: String },

    #[error("Task '{task}' has progress rate {rate}, expected 0-100")]
    InvalidProgressRate { task: String, rate: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

/// Detect file format from extension
pub fn detect_format(path: &Path) -> Option<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Some(FileFormat::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(FileFormat::Toml),
        _ => None,
    }
}

/// Parse a chart from a JSON document
pub fn parse_json(input: &str) -> Result<Chart, ParseError> {
    let raw: fixture::RawChart = serde_json::from_str(input)?;
    raw.into_chart()
}

/// Parse a chart from a TOML document
pub fn parse_toml(input: &str) -> Result<Chart, ParseError> {
    let raw: fixture::RawChart = toml::from_str(input)?;
    raw.into_chart()
}

/// Parse a chart in the given format
pub fn parse_str(input: &str, format: FileFormat) -> Result<Chart, ParseError> {
    match format {
        FileFormat::Json => parse_json(input),
        FileFormat::Toml => parse_toml(input),
    }
}

/// Parse a chart file from a path (format from the extension)
pub fn parse_file(path: &Path) -> Result<Chart, ParseError> {
    let format = detect_format(path)
        .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path)?;
    let chart = parse_str(&content, format)?;
    tracing::debug!(
        path = %path.display(),
        groups = chart.groups.len(),
        tasks = chart.task_count(),
        "loaded chart"
    );
    Ok(chart)
}
