//! SVG building blocks for the four chart panes.
//!
//! A chart is drawn as four panes: the corner above the group column, the
//! date header, the group column, and the task area. [`SvgRenderer`] places
//! them in one document; [`HtmlGanttRenderer`] gives each pane its own SVG so
//! the header and group column can scroll with the task area.
//!
//! All coordinates are pane-local.
//!
//! [`SvgRenderer`]: crate::SvgRenderer
//! [`HtmlGanttRenderer`]: crate::HtmlGanttRenderer

use ganttline_core::Task;
use svg::node::element::{Circle, Element, Group, Line, Rectangle, Text};
use svg::Node;

use crate::layout::ChartLayout;
use crate::theme::GanttTheme;

/// Which color fills a task bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarColoring {
    /// Started / completed color with a progress fill on top
    #[default]
    Progress,
    /// The owning group's palette color; group bands are tinted to match
    Group,
}

/// Tooltip lines for a task
pub fn tooltip_text(task: &Task, group: &str) -> String {
    let mut text = format!(
        "Task: {}\nGroup: {}\nStarts: {}\nEnds: {}",
        task.name, group, task.start, task.end
    );
    if let Some(progress) = task.progress {
        text.push_str(&format!("\nProgress: {}%", progress));
    }
    if let Some(details) = &task.details {
        text.push_str(&format!("\nDetails: {}", details));
    }
    text
}

fn stroke_line(theme: &GanttTheme, x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", theme.grid_color.as_str())
        .set("stroke-width", theme.stroke_width)
}

fn label(theme: &GanttTheme, content: impl Into<String>, x: f64, y: f64) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-family", theme.font_family.as_str())
        .set("font-size", theme.font_size)
        .set("fill", theme.text_color.as_str())
        .set("dominant-baseline", "central")
}

fn title(content: String) -> Element {
    let mut title = Element::new("title");
    title.append(svg::node::Text::new(content));
    title
}

/// Corner above the group column
pub fn corner(layout: &ChartLayout, theme: &GanttTheme) -> Group {
    let width = layout.options.label_width;
    let header = layout.options.header_height();

    Group::new()
        .set("class", "corner")
        .add(stroke_line(theme, 0.0, header, width, header))
        .add(stroke_line(theme, width, 0.0, width, header))
}

/// Year-month and day-number header rows
pub fn date_header(layout: &ChartLayout, theme: &GanttTheme) -> Group {
    let options = &layout.options;
    let day_width = options.day_width;
    let header = options.header_height();
    let day_row_center = options.month_header_height + options.day_header_height / 2.0;

    let mut group = Group::new()
        .set("class", "dates")
        .add(stroke_line(theme, 0.0, header, layout.timeline_width(), header));

    for column in &layout.columns {
        let mut cell = Group::new()
            .set("class", "date")
            .set("transform", format!("translate({}, 0)", column.x));

        if column.ends_month {
            cell = cell.add(stroke_line(theme, day_width, 0.0, day_width, header));
        }

        if let Some(month) = &column.month_label {
            cell = cell.add(label(
                theme,
                month.as_str(),
                day_width * 0.5,
                options.month_header_height / 2.0,
            ));
        }

        if column.is_today {
            cell = cell
                .add(
                    Circle::new()
                        .set("class", "today-circle")
                        .set("cx", day_width * 0.5)
                        .set("cy", day_row_center)
                        .set("r", theme.today_radius)
                        .set("fill", theme.today_color.as_str()),
                )
                .add(
                    label(theme, column.label.as_str(), day_width * 0.5, day_row_center)
                        .set("fill", theme.label_color.as_str())
                        .set("text-anchor", "middle"),
                );
        } else {
            cell = cell.add(
                label(theme, column.label.as_str(), day_width * 0.5, day_row_center)
                    .set("text-anchor", "middle"),
            );
        }

        group = group.add(cell);
    }

    group
}

/// Group column with one labelled band per group
pub fn group_labels(layout: &ChartLayout, theme: &GanttTheme, coloring: BarColoring) -> Group {
    let width = layout.options.label_width;
    let mut group = Group::new().set("class", "groups").add(stroke_line(
        theme,
        width,
        0.0,
        width,
        layout.body_height(),
    ));

    for (index, band) in layout.groups.bands.iter().enumerate() {
        let mut cell = Group::new()
            .set("class", "group")
            .set("transform", format!("translate(0, {})", band.top));

        if coloring == BarColoring::Group {
            cell = cell.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", band.height)
                    .set("fill", theme.group_color(index))
                    .set("opacity", 0.2),
            );
        }

        cell = cell
            .add(stroke_line(theme, 0.0, band.height, width, band.height))
            .add(label(theme, band.name.as_str(), 4.0, band.height / 2.0));
        group = group.add(cell);
    }

    group
}

/// Day grid, holidays, today line and task bars
pub fn task_area(layout: &ChartLayout, theme: &GanttTheme, coloring: BarColoring) -> Group {
    let options = &layout.options;
    let day_width = options.day_width;
    let height = layout.body_height();
    let width = layout.timeline_width();

    let mut grid = Group::new().set("class", "grid");
    for column in &layout.columns {
        let mut cell = Group::new().set("transform", format!("translate({}, 0)", column.x));
        if column.is_holiday {
            cell = cell.add(
                Rectangle::new()
                    .set("class", "holiday")
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", day_width)
                    .set("height", height)
                    .set("fill", theme.holiday_color.as_str()),
            );
        }
        cell = cell.add(stroke_line(theme, day_width, 0.0, day_width, height));
        if column.ends_month {
            cell = cell.add(
                stroke_line(theme, day_width, 0.0, day_width, height)
                    .set("class", "month-end")
                    .set("stroke-width", theme.stroke_width * 3.0),
            );
        }
        grid = grid.add(cell);
    }

    for band in &layout.groups.bands {
        grid = grid.add(stroke_line(theme, 0.0, band.bottom(), width, band.bottom()));
    }

    if let Some(today) = layout.today {
        grid = grid.add(
            Line::new()
                .set("class", "today-line")
                .set("x1", today.center_x)
                .set("y1", 0)
                .set("x2", today.center_x)
                .set("y2", height)
                .set("stroke", theme.today_color.as_str())
                .set("stroke-width", 1),
        );
    }

    let mut bars = Group::new().set("class", "tasks");
    for (index, placed) in layout.tasks.iter().enumerate() {
        let geometry = &placed.geometry;
        let group_name = &layout.groups.bands[placed.group_index].name;
        let fill = match coloring {
            BarColoring::Progress => placed.fill_color.as_str(),
            BarColoring::Group => placed.group_color.as_str(),
        };

        let mut bar = Group::new()
            .set("class", "task-bar")
            .set("data-index", index.to_string())
            .set(
                "transform",
                format!("translate({}, {})", geometry.left, placed.top),
            )
            .add(title(tooltip_text(&placed.task, group_name)))
            .add(
                Rectangle::new()
                    .set("rx", 3)
                    .set("ry", 3)
                    .set("width", geometry.width)
                    .set("height", options.task_height)
                    .set("fill", fill),
            );

        if coloring == BarColoring::Progress && geometry.progress_width > 0.0 {
            bar = bar.add(
                Rectangle::new()
                    .set("class", "progress")
                    .set("rx", 3)
                    .set("ry", 3)
                    .set("width", geometry.progress_width)
                    .set("height", options.task_height)
                    .set("fill", placed.progress_color.as_str()),
            );
        }

        bar = bar.add(
            label(
                theme,
                placed.task.name.as_str(),
                geometry.width / 2.0,
                options.task_height / 2.0,
            )
            .set("fill", theme.label_color.as_str())
            .set("text-anchor", "middle"),
        );
        bars = bars.add(bar);
    }

    Group::new()
        .set("class", "task-area")
        .add(grid)
        .add(bars)
        .add(stroke_line(theme, 0.0, height, width, height))
}
