//! Interactive HTML Gantt Chart Renderer
//!
//! Generates standalone HTML files with the chart split into four SVG panes.
//! Features:
//! - Date header and group column that follow the task area when scrolling
//! - Hover tooltips with task details
//! - "Today" button, shown while the today line is scrolled out of view
//! - Light and dark themes

use chrono::NaiveDate;
use ganttline_core::{Chart, LayoutOptions, RenderError, Renderer};
use svg::node::element::Group;
use svg::Document;

use crate::layout::ChartLayout;
use crate::panes::{self, BarColoring};
use crate::theme::GanttTheme;
use crate::write_svg;

/// HTML Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlGanttRenderer {
    pub options: LayoutOptions,
    pub theme: GanttTheme,
    /// Date highlighted by the today marker
    pub today: Option<NaiveDate>,
    pub coloring: BarColoring,
    /// Enable interactivity (tooltips, scroll sync, today button)
    pub interactive: bool,
    /// Prefix for element ids, so several charts can share a page
    pub id_prefix: String,
    /// Visible size of the task pane in pixels (width, height)
    pub viewport: (u32, u32),
}

impl Default for HtmlGanttRenderer {
    fn default() -> Self {
        Self {
            options: LayoutOptions::default(),
            theme: GanttTheme::default(),
            today: None,
            coloring: BarColoring::default(),
            interactive: true,
            id_prefix: "gantt".into(),
            viewport: (800, 400),
        }
    }
}

impl HtmlGanttRenderer {
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

    /// Disable interactivity
    pub fn static_chart(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Set the element id prefix
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Configure the visible task pane size
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    fn pane_id(&self, pane: &str) -> String {
        format!("{}-{}", self.id_prefix, pane)
    }

    /// Wrap one pane in its own SVG element
    fn pane_svg(&self, pane: Group, width: f64, height: f64) -> Result<String, RenderError> {
        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .add(pane);
        write_svg(&document)
    }

    fn generate_html(&self, chart: &Chart, layout: &ChartLayout) -> Result<String, RenderError> {
        let options = &layout.options;
        let header = options.header_height();

        let corner = self.pane_svg(
            panes::corner(layout, &self.theme),
            options.label_width,
            header,
        )?;
        let dates = self.pane_svg(
            panes::date_header(layout, &self.theme),
            layout.timeline_width(),
            header,
        )?;
        let groups = self.pane_svg(
            panes::group_labels(layout, &self.theme, self.coloring),
            options.label_width,
            layout.body_height(),
        )?;
        let tasks = self.pane_svg(
            panes::task_area(layout, &self.theme, self.coloring),
            layout.timeline_width(),
            layout.body_height(),
        )?;

        let title = chart.title.as_deref().unwrap_or("Gantt Chart");
        let css = self.generate_css(layout);
        let js = if self.interactive {
            self.generate_js(layout)?
        } else {
            String::new()
        };
        let today_button = if self.interactive && layout.today.is_some() {
            format!(
                r#"<button id="{id}" class="today-button" hidden>Today</button>"#,
                id = self.pane_id("today-button")
            )
        } else {
            String::new()
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Gantt Chart</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="gantt-container">
        <div class="gantt-header">
            <h1>{title}</h1>
            {today_button}
        </div>
        <div class="gantt-grid">
            <div class="pane corner" id="{corner_id}">{corner}</div>
            <div class="pane dates" id="{dates_id}">{dates}</div>
            <div class="pane groups" id="{groups_id}">{groups}</div>
            <div class="pane tasks" id="{tasks_id}">{tasks}</div>
        </div>
        <div id="{tooltip_id}" class="tooltip"></div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            today_button = today_button,
            corner_id = self.pane_id("corner"),
            dates_id = self.pane_id("dates"),
            groups_id = self.pane_id("groups"),
            tasks_id = self.pane_id("tasks"),
            tooltip_id = self.pane_id("tooltip"),
            corner = corner,
            dates = dates,
            groups = groups,
            tasks = tasks,
            js = js,
        ))
    }

    /// Generate CSS styles
    fn generate_css(&self, layout: &ChartLayout) -> String {
        let (view_width, view_height) = self.viewport;
        format!(
            r#"        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: {font};
            background: {bg};
            color: {text};
            padding: 20px;
        }}
        .gantt-header {{ display: flex; align-items: center; gap: 16px; margin-bottom: 12px; }}
        .gantt-header h1 {{ font-size: 18px; }}
        .today-button {{
            border: 1px solid {today};
            color: {today};
            background: transparent;
            border-radius: 4px;
            padding: 2px 10px;
            cursor: pointer;
        }}
        .gantt-grid {{
            display: grid;
            grid-template-columns: {label_width}px {view_width}px;
            grid-template-rows: {header_height}px {view_height}px;
        }}
        .pane {{ overflow: hidden; }}
        .pane.tasks {{ overflow: auto; }}
        .task-bar {{ cursor: pointer; }}
        .task-bar:hover rect {{ opacity: 0.85; }}
        .tooltip {{
            position: fixed;
            display: none;
            pointer-events: none;
            white-space: pre-line;
            background: {bg};
            border: 1px solid {grid};
            border-radius: 4px;
            padding: 8px 12px;
            font-size: 12px;
            box-shadow: 0 2px 6px rgba(0, 0, 0, 0.15);
        }}"#,
            font = self.theme.font_family,
            bg = self.theme.background_color,
            text = self.theme.text_color,
            today = self.theme.today_color,
            grid = self.theme.grid_color,
            label_width = layout.options.label_width,
            header_height = layout.options.header_height(),
            view_width = view_width,
            view_height = view_height,
        )
    }

    /// Generate the scroll sync, tooltip and today button script
    fn generate_js(&self, layout: &ChartLayout) -> Result<String, RenderError> {
        let tooltips: Vec<String> = layout
            .tasks
            .iter()
            .map(|placed| {
                panes::tooltip_text(&placed.task, &layout.groups.bands[placed.group_index].name)
            })
            .collect();
        let tooltips = serde_json::to_string(&tooltips)
            .map(|json| script_escape(&json))
            .map_err(|e| RenderError::Format(format!("Failed to encode tooltips: {}", e)))?;
        let today = match layout.today {
            Some(marker) => format!(
                "{{ x: {}, scroll: {} }}",
                marker.center_x,
                marker.scroll_offset()
            ),
            None => "null".into(),
        };

        Ok(format!(
            r#"        (function () {{
            const tooltips = {tooltips};
            const today = {today};
            const tasks = document.getElementById('{tasks_id}');
            const dates = document.getElementById('{dates_id}');
            const groups = document.getElementById('{groups_id}');
            const tooltip = document.getElementById('{tooltip_id}');
            const todayButton = document.getElementById('{button_id}');

            function updateTodayButton() {{
                if (!today || !todayButton) return;
                const left = tasks.scrollLeft;
                const right = left + tasks.clientWidth;
                todayButton.hidden = today.x >= left && today.x <= right;
            }}

            // Header and group column follow the task area
            tasks.addEventListener('scroll', () => {{
                dates.scrollLeft = tasks.scrollLeft;
                groups.scrollTop = tasks.scrollTop;
                updateTodayButton();
            }});

            if (todayButton) {{
                todayButton.addEventListener('click', () => {{
                    tasks.scrollLeft = today.scroll;
                }});
            }}

            tasks.querySelectorAll('.task-bar').forEach(bar => {{
                const text = tooltips[Number(bar.getAttribute('data-index'))];
                const native = bar.querySelector('title');
                if (native) native.remove();

                bar.addEventListener('mouseenter', () => {{
                    tooltip.textContent = text;
                    tooltip.style.display = 'block';
                }});
                bar.addEventListener('mousemove', (e) => {{
                    tooltip.style.left = (e.clientX + 15) + 'px';
                    tooltip.style.top = (e.clientY + 15) + 'px';
                }});
                bar.addEventListener('mouseleave', () => {{
                    tooltip.style.display = 'none';
                }});
            }});

            updateTodayButton();
        }})();"#,
            tooltips = tooltips,
            today = today,
            tasks_id = self.pane_id("tasks"),
            dates_id = self.pane_id("dates"),
            groups_id = self.pane_id("groups"),
            tooltip_id = self.pane_id("tooltip"),
            button_id = self.pane_id("today-button"),
        ))
    }
}

impl Renderer for HtmlGanttRenderer {
    type Output = String;

    fn render(&self, chart: &Chart) -> Result<String, RenderError> {
        let layout = ChartLayout::compute_themed(chart, &self.options, &self.theme, self.today)?;
        self.generate_html(chart, &layout)
    }
}

/// Make encoded JSON safe inside an inline `<script>`
///
/// `<`, `>` and `&` become `\u` escapes, which JSON and JavaScript read back
/// as the same characters, so task text can never close the script element.
fn script_escape(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// HTML-escape a string
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
