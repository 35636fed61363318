//! Layout properties checked against the demo charts and generated inputs

use chrono::{Duration, NaiveDate};
use ganttline_core::{Chart, Group, LayoutError, LayoutOptions, Task};
use ganttline_parser::parse_file;
use ganttline_render::layout::{group_height, task_top_in_group};
use ganttline_render::{ChartLayout, DateRange, TaskGeometry};
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

/// Deterministic spread of tasks across a quarter, some crossing month ends
fn generated_chart(groups: usize, per_group: usize) -> Chart {
    let base = date(2024, 1, 1);
    let mut chart = Chart::new();
    for g in 0..groups {
        let mut group = Group::new(format!("group {g}"));
        for t in 0..per_group {
            let offset = ((g * 7 + t * 11) % 60) as i64;
            let length = ((g + t * 3) % 9) as i64;
            let start = base + Duration::days(offset);
            group = group.task(
                Task::new(format!("task {g}.{t}"), start, start + Duration::days(length))
                    .progress(((g * 13 + t * 29) % 101) as u8),
            );
        }
        chart = chart.group(group);
    }
    chart
}

#[test]
fn demo_range_covers_min_start_to_max_end() {
    let chart = demo("launch.json");
    let layout = ChartLayout::compute(&chart, &LayoutOptions::default(), None).unwrap();

    assert_eq!(layout.range.first(), date(2013, 1, 28));
    assert_eq!(layout.range.last(), date(2013, 2, 16));
    assert_eq!(layout.range.len(), 20);
    assert_eq!(
        layout.range.len() as i64,
        (layout.range.last() - layout.range.first()).num_days() + 1
    );
}

#[test]
fn range_length_matches_day_difference() {
    for (groups, per_group) in [(1, 1), (2, 5), (5, 3), (8, 8)] {
        let chart = generated_chart(groups, per_group);
        let range = DateRange::from_tasks(chart.tasks().map(|(_, t)| t)).unwrap();
        let min = chart.tasks().map(|(_, t)| t.start).min().unwrap();
        let max = chart.tasks().map(|(_, t)| t.end).max().unwrap();

        assert_eq!(range.len() as i64, (max - min).num_days() + 1);
        let days: Vec<_> = range.days().collect();
        assert!(days.windows(2).all(|w| w[1] - w[0] == Duration::days(1)));
    }
}

#[test]
fn bars_never_leave_the_timeline() {
    for options in [
        LayoutOptions::default(),
        LayoutOptions::new().day_width(13.5),
        LayoutOptions::new().day_width(1.0),
    ] {
        for chart in [demo("launch.json"), demo("sprint.toml"), generated_chart(6, 7)] {
            let layout = ChartLayout::compute(&chart, &options, None).unwrap();
            let limit = options.day_width * layout.range.len() as f64;
            for placed in &layout.tasks {
                assert!(
                    placed.geometry.left + placed.geometry.width <= limit + 1e-9,
                    "{} overflows",
                    placed.task.name
                );
                assert!(placed.geometry.progress_width <= placed.geometry.width);
            }
        }
    }
}

#[test]
fn group_height_non_decreasing() {
    for options in [
        LayoutOptions::default(),
        LayoutOptions::new().task_height(20.0).task_gap(4.0).group_padding(5.0, 5.0),
        LayoutOptions::new().task_gap(0.0).group_padding(0.0, 0.0),
    ] {
        let mut previous = group_height(&options, 0);
        for n in 1..50 {
            let height = group_height(&options, n);
            assert!(height >= previous);
            previous = height;
        }
    }
}

#[test]
fn rows_inside_group_do_not_overlap() {
    let options = LayoutOptions::default();
    let layout = ChartLayout::compute(&generated_chart(4, 6), &options, None).unwrap();

    for band in &layout.groups.bands {
        for pair in band.task_tops.windows(2) {
            assert_eq!(pair[1] - pair[0], options.task_height + options.task_gap);
        }
        let last = band.task_tops.last().copied().unwrap();
        assert_eq!(last + options.task_height + options.group_padding_bottom, band.height);
    }
}

#[test]
fn layout_is_idempotent() {
    let chart = demo("launch.json");
    let options = LayoutOptions::default();
    let today = Some(date(2013, 2, 12));

    let first = ChartLayout::compute(&chart, &options, today).unwrap();
    let second = ChartLayout::compute(&chart, &options, today).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.task_records(), second.task_records());
}

#[test]
fn documented_bar_example() {
    let day_width = 28.0;
    let range = DateRange::new(date(2013, 2, 1), date(2013, 2, 5)).unwrap();
    assert_eq!(range.len(), 5);

    let one = TaskGeometry::compute(
        &Task::new("one", date(2013, 2, 1), date(2013, 2, 1)),
        &range,
        day_width,
    )
    .unwrap();
    let two = TaskGeometry::compute(
        &Task::new("two", date(2013, 2, 3), date(2013, 2, 5)),
        &range,
        day_width,
    )
    .unwrap();

    assert_eq!((one.left, one.width), (0.0, day_width));
    assert_eq!((two.left, two.width), (2.0 * day_width, 3.0 * day_width));
}

#[test]
fn documented_group_example() {
    let options = LayoutOptions::new()
        .task_height(20.0)
        .task_gap(4.0)
        .group_padding(5.0, 5.0);

    assert_eq!(group_height(&options, 3), 78.0);
    let offsets: Vec<_> = (0..3).map(|i| task_top_in_group(&options, i)).collect();
    assert_eq!(offsets, vec![5.0, 29.0, 53.0]);
}

#[test]
fn documented_progress_example() {
    let range = DateRange::new(date(2013, 2, 1), date(2013, 2, 10)).unwrap();
    let task = Task::new("half", date(2013, 2, 1), date(2013, 2, 10));

    let partial = TaskGeometry::compute(&task.clone().progress(40), &range, 10.0).unwrap();
    assert_eq!(partial.width, 100.0);
    assert_eq!(partial.progress_width, 40.0);

    let done = TaskGeometry::compute(&task.progress(100), &range, 10.0).unwrap();
    assert_eq!(done.progress_width, 0.0);
}

#[test]
fn demo_today_marker_matches_column() {
    let chart = demo("launch.json");
    let layout =
        ChartLayout::compute(&chart, &LayoutOptions::default(), Some(date(2013, 2, 12))).unwrap();

    let marker = layout.today.unwrap();
    assert_eq!(marker.index, 15);
    assert_eq!(layout.columns[15].date, date(2013, 2, 12));
    assert!(layout.columns[15].is_today);
    assert_eq!(layout.columns.iter().filter(|c| c.is_today).count(), 1);
}

#[test]
fn demo_weekends_are_marked() {
    let chart = demo("launch.json");
    let layout = ChartLayout::compute(&chart, &LayoutOptions::default(), None).unwrap();

    let holidays: Vec<_> = layout
        .columns
        .iter()
        .filter(|c| c.is_holiday)
        .map(|c| c.date)
        .collect();
    assert_eq!(
        holidays,
        vec![
            date(2013, 2, 2),
            date(2013, 2, 3),
            date(2013, 2, 9),
            date(2013, 2, 10),
            date(2013, 2, 16),
        ]
    );
}

#[test]
fn task_outside_range_is_rejected() {
    let range = DateRange::new(date(2013, 2, 1), date(2013, 2, 5)).unwrap();
    let task = Task::new("late", date(2013, 2, 4), date(2013, 2, 9));
    assert_eq!(
        TaskGeometry::compute(&task, &range, 28.0),
        Err(LayoutError::DateNotInRange {
            date: date(2013, 2, 9),
            first: date(2013, 2, 1),
            last: date(2013, 2, 5),
        })
    );
}
