//! WebAssembly bindings for the ganttline layout engine
//!
//! This crate provides JavaScript-callable functions for laying out and
//! rendering charts directly in the browser. The page passes "today" in;
//! nothing here reads the clock.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use ganttline_core::{Chart, LayoutOptions, RenderError, Renderer};
use ganttline_parser::{parse_str, FileFormat};
use ganttline_render::{ChartLayout, HtmlGanttRenderer, JsonRenderer, SvgRenderer};

/// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Lay out a JSON chart and return the records as JSON
#[wasm_bindgen]
pub fn layout(source: &str, today: Option<String>) -> Result<String, JsValue> {
    layout_json(source, today.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Render a JSON chart as a standalone SVG document
#[wasm_bindgen]
pub fn render_svg(source: &str, today: Option<String>) -> Result<String, JsValue> {
    svg_document(source, today.as_deref()).map_err(|e| JsValue::from_str(&e))
}

fn parse_today(today: Option<&str>) -> Result<Option<NaiveDate>, String> {
    today
        .map(|value| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| format!("Invalid today date '{}', expected YYYY-MM-DD", value))
        })
        .transpose()
}

fn parse_chart(source: &str, format: FileFormat) -> Result<Chart, String> {
    parse_str(source, format).map_err(|e| format!("Parse error: {}", e))
}

fn layout_json(source: &str, today: Option<&str>) -> Result<String, String> {
    let chart = parse_chart(source, FileFormat::Json)?;
    let mut renderer = JsonRenderer::new();
    if let Some(today) = parse_today(today)? {
        renderer = renderer.today(today);
    }
    renderer.render(&chart).map_err(|e| e.to_string())
}

fn svg_document(source: &str, today: Option<&str>) -> Result<String, String> {
    let chart = parse_chart(source, FileFormat::Json)?;
    let mut renderer = SvgRenderer::new();
    if let Some(today) = parse_today(today)? {
        renderer = renderer.today(today);
    }
    renderer.render(&chart).map_err(|e| e.to_string())
}

// ============================================================================
// Viewer Class
// ============================================================================

/// A loaded chart with its display settings, for pages that re-render often
#[wasm_bindgen]
pub struct GanttViewer {
    chart: Option<Chart>,
    options: LayoutOptions,
    today: Option<NaiveDate>,
    dark_theme: bool,
    color_by_group: bool,
    last_error: Option<String>,
}

#[derive(Serialize)]
struct LoadResult {
    success: bool,
    error: Option<String>,
    data: Option<ChartSummary>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ChartSummary {
    title: Option<String>,
    groups: usize,
    tasks: usize,
    first_day: String,
    last_day: String,
    days: usize,
}

#[wasm_bindgen]
impl GanttViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            chart: None,
            options: LayoutOptions::default(),
            today: None,
            dark_theme: false,
            color_by_group: false,
            last_error: None,
        }
    }

    /// Load a chart
    ///
    /// # Arguments
    /// * `input` - The chart definition
    /// * `format` - Either "json" or "toml"
    ///
    /// # Returns
    /// `{ success, error, data }` where `data` summarizes the chart
    pub fn load(&mut self, input: &str, format: &str) -> Result<JsValue, JsValue> {
        let result = match self.load_internal(input, format) {
            Ok(summary) => LoadResult {
                success: true,
                error: None,
                data: Some(summary),
            },
            Err(e) => LoadResult {
                success: false,
                error: Some(e),
                data: None,
            },
        };
        serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the layout constants; missing fields keep their defaults
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        self.options = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid layout options: {}", e)))?;
        Ok(())
    }

    /// Set the date drawn as today, or clear it with `undefined`
    pub fn set_today(&mut self, today: Option<String>) -> Result<(), JsValue> {
        self.today = parse_today(today.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn set_dark_theme(&mut self, enabled: bool) {
        self.dark_theme = enabled;
    }

    pub fn set_color_by_group(&mut self, enabled: bool) {
        self.color_by_group = enabled;
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn get_last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    /// Render the chart as SVG, or an empty string when nothing is loaded
    /// or rendering fails (see `get_last_error`)
    pub fn render_svg(&mut self) -> String {
        let Some(chart) = &self.chart else {
            return String::new();
        };
        let mut renderer = SvgRenderer::new().options(self.options.clone());
        if let Some(today) = self.today {
            renderer = renderer.today(today);
        }
        if self.dark_theme {
            renderer = renderer.dark_theme();
        }
        if self.color_by_group {
            renderer = renderer.color_by_group();
        }
        let result = renderer.render(chart);
        self.record(result)
    }

    /// Render the chart as a standalone HTML page
    pub fn render_html(&mut self) -> String {
        let Some(chart) = &self.chart else {
            return String::new();
        };
        let mut renderer = HtmlGanttRenderer::new().options(self.options.clone());
        if let Some(today) = self.today {
            renderer = renderer.today(today);
        }
        if self.dark_theme {
            renderer = renderer.dark_theme();
        }
        if self.color_by_group {
            renderer = renderer.color_by_group();
        }
        let result = renderer.render(chart);
        self.record(result)
    }

    /// Layout records as JSON
    pub fn get_layout_json(&mut self) -> String {
        let Some(chart) = &self.chart else {
            return String::new();
        };
        let mut renderer = JsonRenderer::new().options(self.options.clone());
        if let Some(today) = self.today {
            renderer = renderer.today(today);
        }
        let result = renderer.render(chart);
        self.record(result)
    }

    /// Scroll offset that brings the today column into view
    pub fn scroll_to_today(&self) -> Option<f64> {
        let chart = self.chart.as_ref()?;
        ChartLayout::compute(chart, &self.options, self.today)
            .ok()?
            .scroll_to_today()
    }
}

impl GanttViewer {
    /// Keep a render error in `last_error` and hand back the output or ""
    fn record(&mut self, result: Result<String, RenderError>) -> String {
        match result {
            Ok(output) => {
                self.last_error = None;
                output
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                String::new()
            }
        }
    }

    /// Parse, lay out, and keep a chart. Only a chart that lays out cleanly is kept.
    fn load_internal(&mut self, input: &str, format: &str) -> Result<ChartSummary, String> {
        self.last_error = None;

        match self.summarize(input, format) {
            Ok((chart, summary)) => {
                self.chart = Some(chart);
                Ok(summary)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn summarize(&self, input: &str, format: &str) -> Result<(Chart, ChartSummary), String> {
        let format = match format {
            "toml" => FileFormat::Toml,
            _ => FileFormat::Json,
        };
        let chart = parse_chart(input, format)?;
        let layout =
            ChartLayout::compute(&chart, &self.options, None).map_err(|e| e.to_string())?;
        let summary = ChartSummary {
            title: chart.title.clone(),
            groups: chart.groups.len(),
            tasks: chart.task_count(),
            first_day: layout.range.first().to_string(),
            last_day: layout.range.last().to_string(),
            days: layout.range.len(),
        };
        Ok((chart, summary))
    }
}

impl Default for GanttViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"{
        "title": "Website launch",
        "groups": [
            {"name": "development", "tasks": [
                {"name": "conceptualize", "start": "2013-1-28", "end": "2013-2-1", "progress": 40},
                {"name": "sketch", "start": "2013-2-1", "end": "2013-2-6"}
            ]},
            {"name": "promotion", "tasks": [
                {"name": "advertise", "start": "2013-2-9", "end": "2013-2-12"}
            ]}
        ]
    }"#;

    #[test]
    fn layout_returns_records() {
        let json = layout_json(CHART, Some("2013-02-05")).expect("Should lay out");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["first_day"], "2013-01-28");
        assert_eq!(value["last_day"], "2013-02-12");
        assert_eq!(value["today"]["index"], 8);
        assert_eq!(value["tasks"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn layout_without_today() {
        let json = layout_json(CHART, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("today").is_none());
    }

    #[test]
    fn layout_reports_errors() {
        let err = layout_json(r#"{"groups": []}"#, None).unwrap_err();
        assert!(err.contains("No tasks"));

        let err = layout_json(CHART, Some("tomorrow")).unwrap_err();
        assert!(err.contains("Invalid today date"));

        let err = layout_json("not json", None).unwrap_err();
        assert!(err.starts_with("Parse error"));
    }

    #[test]
    fn render_svg_document() {
        let svg = svg_document(CHART, Some("2013-02-05")).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Website launch"));
        assert!(svg.contains("today-line"));
    }

    #[test]
    fn viewer_load_and_render() {
        let mut viewer = GanttViewer::new();
        assert!(!viewer.has_chart());
        assert_eq!(viewer.render_svg(), "");

        let summary = viewer.load_internal(CHART, "json").unwrap();
        assert_eq!(
            summary,
            ChartSummary {
                title: Some("Website launch".into()),
                groups: 2,
                tasks: 3,
                first_day: "2013-01-28".into(),
                last_day: "2013-02-12".into(),
                days: 16,
            }
        );
        assert!(viewer.has_chart());

        viewer.set_dark_theme(true);
        viewer.set_color_by_group(true);
        let svg = viewer.render_svg();
        assert!(svg.contains("#1a1a2e"));
        assert!(viewer.render_html().starts_with("<!DOCTYPE html>"));
        assert!(viewer.get_layout_json().contains("\"first_day\""));
    }

    #[test]
    fn viewer_scroll_to_today() {
        let mut viewer = GanttViewer::new();
        viewer.load_internal(CHART, "json").unwrap();
        assert_eq!(viewer.scroll_to_today(), None);

        viewer.today = NaiveDate::from_ymd_opt(2013, 2, 5);
        // column 8: 8 * 28 + 14 - 30
        assert_eq!(viewer.scroll_to_today(), Some(208.0));
    }

    #[test]
    fn viewer_render_failure_sets_last_error() {
        let mut viewer = GanttViewer::new();
        viewer.load_internal(CHART, "json").unwrap();
        viewer.chart = Some(Chart::new().title("Nothing scheduled"));

        assert_eq!(viewer.render_svg(), "");
        assert_eq!(
            viewer.get_last_error().as_deref(),
            Some("Layout error: No tasks to lay out")
        );
        assert_eq!(viewer.render_html(), "");
        assert_eq!(viewer.get_layout_json(), "");
        assert!(viewer.get_last_error().is_some());

        viewer.load_internal(CHART, "json").unwrap();
        assert!(viewer.render_svg().starts_with("<svg"));
        assert_eq!(viewer.get_last_error(), None);
    }

    #[test]
    fn viewer_keeps_previous_chart_on_error() {
        let mut viewer = GanttViewer::new();
        viewer.load_internal(CHART, "json").unwrap();

        let err = viewer
            .load_internal("title = \"empty\"", "toml")
            .unwrap_err();
        assert_eq!(viewer.get_last_error(), Some(err));
        assert!(viewer.has_chart());
        assert!(viewer.render_svg().contains("conceptualize"));
    }
}
