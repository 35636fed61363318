//! Renderer output for the demo charts

use chrono::NaiveDate;
use ganttline_core::{Chart, LayoutOptions, Renderer};
use ganttline_parser::parse_file;
use ganttline_render::{ChartLayout, HtmlGanttRenderer, JsonRenderer, SvgRenderer};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn demo(name: &str) -> Chart {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name);
    parse_file(&path).unwrap()
}

#[test]
fn launch_group_bands_follow_file_order() {
    let chart = demo("launch.json");
    let options = LayoutOptions::default();
    let layout = ChartLayout::compute(&chart, &options, None).unwrap();

    let names: Vec<_> = layout.groups.bands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["development", "coding", "promotion", "celebration", "meeting"]
    );

    // 3 tasks: 5 + 3 * 15 + 2 * 10 + 5, 2 tasks: 5 + 2 * 15 + 10 + 5
    let tops: Vec<_> = layout.groups.bands.iter().map(|b| b.top).collect();
    assert_eq!(tops, vec![0.0, 75.0, 125.0, 175.0, 225.0]);
    assert_eq!(layout.body_height(), 300.0);
    assert_eq!(layout.tasks.len(), 12);
}

#[test]
fn launch_svg_contains_every_task() {
    let chart = demo("launch.json");
    let svg = SvgRenderer::new()
        .today(date(2013, 2, 12))
        .render(&chart)
        .unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Website launch"));
    for (_, task) in chart.tasks() {
        assert!(svg.contains(&task.name), "missing {}", task.name);
    }
    assert!(svg.contains("2013-01"));
    assert!(svg.contains("2013-02"));
    assert!(svg.contains("today-line"));
    assert_eq!(svg.matches("class=\"task-bar\"").count(), 12);
}

#[test]
fn launch_svg_tooltips_carry_details() {
    let svg = SvgRenderer::new().render(&demo("launch.json")).unwrap();
    assert!(svg.contains("Task: conceptualize"));
    assert!(svg.contains("Details: Rough outline of the site map"));
}

#[test]
fn legacy_chart_renders_like_grouped_chart() {
    let chart = demo("legacy.json");
    let layout = ChartLayout::compute(&chart, &LayoutOptions::default(), None).unwrap();

    assert_eq!(layout.groups.bands[0].name, "development");
    assert_eq!(layout.groups.bands[0].task_tops.len(), 3);
    // No progress in the legacy format: every bar starts unfilled
    assert!(layout.tasks.iter().all(|t| t.geometry.progress_width == 0.0));

    let html = HtmlGanttRenderer::new().render(&chart).unwrap();
    assert!(html.contains("Gantt Chart Process"));
}

#[test]
fn launch_html_scrolls_to_today() {
    let html = HtmlGanttRenderer::new()
        .today(date(2013, 2, 12))
        .render(&demo("launch.json"))
        .unwrap();

    // column 15: 15 * 28 + 14 = 434, minus the 30px lead
    assert!(html.contains("const today = { x: 434, scroll: 404 };"));
    assert!(html.contains("class=\"today-button\""));
}

#[test]
fn compact_options_shrink_the_chart() {
    let chart = demo("launch.json");
    let compact = LayoutOptions::new()
        .day_width(20.0)
        .task_height(24.0)
        .task_gap(4.0)
        .group_padding(4.0, 4.0);

    let layout = ChartLayout::compute(&chart, &compact, None).unwrap();
    assert_eq!(layout.timeline_width(), 400.0);
    // 3 tasks: 4 + 72 + 8 + 4
    assert_eq!(layout.groups.bands[0].height, 88.0);
}

#[test]
fn sprint_json_records() {
    let json = JsonRenderer::new()
        .today(date(2024, 3, 8))
        .render(&demo("sprint.toml"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Sprint 12");
    assert_eq!(value["first_day"], "2024-03-04");
    assert_eq!(value["last_day"], "2024-03-15");
    assert_eq!(value["today"]["index"], 4);

    let tasks = value["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0]["label"], "schema migration");
    assert_eq!(tasks[0]["progress_width"], 0.0);
    assert_eq!(tasks[0]["fill_color"], "#56CC27");
    assert_eq!(tasks[1]["details"], "Pagination still open");
    assert_eq!(tasks[2]["group"], "frontend");
    assert!(tasks[2].get("details").is_none());
}

#[test]
fn today_outside_chart_draws_no_marker() {
    let chart = demo("sprint.toml");
    let svg = SvgRenderer::new()
        .today(date(2030, 1, 1))
        .render(&chart)
        .unwrap();
    assert!(!svg.contains("today-line"));

    let json = JsonRenderer::new()
        .today(date(2030, 1, 1))
        .render(&chart)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("today").is_none());
}
