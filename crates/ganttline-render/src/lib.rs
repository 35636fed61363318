//! # ganttline-render
//!
//! Layout and rendering backends for ganttline charts.
//!
//! This crate provides:
//! - The layout calculator (`DateRange`, `GroupLayout`, `TaskGeometry`, `ChartLayout`)
//! - Calendar markers (weekends, month boundaries, "today")
//! - SVG Gantt chart rendering
//! - Interactive HTML Gantt chart rendering
//! - JSON layout records for external drawing surfaces
//!
//! ## Example
//!
//! ```rust,ignore
//! use ganttline_core::{LayoutOptions, Renderer};
//! use ganttline_render::{ChartLayout, HtmlGanttRenderer, JsonRenderer, SvgRenderer};
//!
//! // Raw geometry
//! let layout = ChartLayout::compute(&chart, &LayoutOptions::default(), Some(today))?;
//!
//! // Single SVG document
//! let svg = SvgRenderer::new().today(today).render(&chart)?;
//!
//! // Standalone HTML page with tooltips and scroll panes
//! let html = HtmlGanttRenderer::new().today(today).render(&chart)?;
//!
//! // Records for another renderer
//! let json = JsonRenderer::new().render(&chart)?;
//! ```

pub mod calendar;
pub mod gantt;
pub mod layout;
pub mod panes;
pub mod theme;

pub use calendar::{DayColumn, TodayMarker};
pub use gantt::HtmlGanttRenderer;
pub use layout::{
    BarState, ChartLayout, DateRange, GroupBand, GroupLayout, GroupRecord, PlacedTask,
    TaskGeometry, TaskRecord,
};
pub use panes::{tooltip_text, BarColoring};
pub use theme::GanttTheme;

use chrono::NaiveDate;
use ganttline_core::{Chart, LayoutOptions, RenderError, Renderer};
use serde::Serialize;
use svg::node::element::{Rectangle, Text};
use svg::Document;

/// Height reserved above the chart for the title
const TITLE_HEIGHT: f64 = 30.0;

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
    pub options: LayoutOptions,
    pub theme: GanttTheme,
    /// Date highlighted by the today marker
    pub today: Option<NaiveDate>,
    pub coloring: BarColoring,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure layout constants
    pub fn options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = GanttTheme::dark();
        self
    }

    /// Highlight `date` as today
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Fill bars with their group color instead of progress colors
    pub fn color_by_group(mut self) -> Self {
        self.coloring = BarColoring::Group;
        self
    }

    /// Build the SVG document for an already computed layout
    pub fn document(&self, layout: &ChartLayout, title: Option<&str>) -> Document {
        let title_height = if title.is_some() { TITLE_HEIGHT } else { 0.0 };
        let width = layout.width();
        let height = layout.height() + title_height;
        let label_width = layout.options.label_width;
        let header_height = layout.options.header_height();

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg")
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", self.theme.background_color.as_str()),
            );

        if let Some(title) = title {
            document = document.add(
                Text::new(title)
                    .set("x", 4)
                    .set("y", TITLE_HEIGHT / 2.0)
                    .set("font-family", self.theme.font_family.as_str())
                    .set("font-size", self.theme.font_size + 5)
                    .set("font-weight", "bold")
                    .set("fill", self.theme.text_color.as_str())
                    .set("dominant-baseline", "central"),
            );
        }

        let at = |x: f64, y: f64| format!("translate({}, {})", x, y + title_height);

        document
            .add(panes::corner(layout, &self.theme).set("transform", at(0.0, 0.0)))
            .add(panes::date_header(layout, &self.theme).set("transform", at(label_width, 0.0)))
            .add(
                panes::group_labels(layout, &self.theme, self.coloring)
                    .set("transform", at(0.0, header_height)),
            )
            .add(
                panes::task_area(layout, &self.theme, self.coloring)
                    .set("transform", at(label_width, header_height)),
            )
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, chart: &Chart) -> Result<String, RenderError> {
        let layout = ChartLayout::compute_themed(chart, &self.options, &self.theme, self.today)?;
        let document = self.document(&layout, chart.title.as_deref());
        write_svg(&document)
    }
}

/// Serialize an SVG document to a string
pub(crate) fn write_svg(document: &Document) -> Result<String, RenderError> {
    let mut output = Vec::new();
    svg::write(&mut output, document)
        .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

    String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
}

/// Layout records as JSON, for drawing surfaces outside this crate
#[derive(Clone, Debug, Default)]
pub struct JsonRenderer {
    pub options: LayoutOptions,
    pub theme: GanttTheme,
    pub today: Option<NaiveDate>,
    /// Indent the output
    pub pretty: bool,
}

/// Document produced by [`JsonRenderer`]
#[derive(Debug, Serialize)]
pub struct LayoutDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub width: f64,
    pub height: f64,
    pub day_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<TodayMarker>,
    pub columns: Vec<DayColumn>,
    pub groups: Vec<GroupRecord>,
    pub tasks: Vec<TaskRecord>,
}

impl LayoutDocument {
    pub fn new(layout: &ChartLayout, title: Option<String>) -> Self {
        Self {
            title,
            first_day: layout.range.first(),
            last_day: layout.range.last(),
            width: layout.timeline_width(),
            height: layout.body_height(),
            day_width: layout.options.day_width,
            today: layout.today,
            columns: layout.columns.clone(),
            groups: layout.group_records(),
            tasks: layout.task_records(),
        }
    }
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure layout constants
    pub fn options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, chart: &Chart) -> Result<String, RenderError> {
        let layout = ChartLayout::compute_themed(chart, &self.options, &self.theme, self.today)?;
        let document = LayoutDocument::new(&layout, chart.title.clone());
        let result = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        result.map_err(|e| RenderError::Format(format!("Failed to write JSON: {}", e)))
    }
}
