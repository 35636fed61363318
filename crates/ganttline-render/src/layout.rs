//! Chart geometry
//!
//! Turns a [`Chart`] into pixel coordinates. Three independent calculations
//! compose into a [`ChartLayout`]:
//! - [`DateRange`]: the day columns, from the earliest start to the latest end
//! - [`GroupLayout`]: vertical bands for groups and the rows inside them
//! - [`TaskGeometry`]: horizontal span and progress fill of each bar
//!
//! Every pass is a pure function of its input: the same chart, options and
//! "today" always produce the same layout. Any invalid task fails the whole
//! pass instead of producing partial geometry.

use chrono::NaiveDate;
use ganttline_core::{Chart, Group, LayoutError, LayoutOptions, Task};
use serde::Serialize;

use crate::calendar::{day_columns, DayColumn, TodayMarker};
use crate::theme::GanttTheme;

// ============================================================================
// Date range
// ============================================================================

/// Inclusive run of consecutive calendar days
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DateRange {
    /// Range covering `first..=last`, or `None` when `last` precedes `first`
    pub fn new(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        (first <= last).then_some(Self { first, last })
    }

    /// Range from the earliest task start to the latest task end
    pub fn from_tasks<'a, I>(tasks: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for task in tasks {
            if task.end < task.start {
                return Err(LayoutError::InvertedTask {
                    task: task.name.clone(),
                    start: task.start,
                    end: task.end,
                });
            }
            bounds = Some(match bounds {
                Some((first, last)) => (first.min(task.start), last.max(task.end)),
                None => (task.start, task.end),
            });
        }

        let (first, last) = bounds.ok_or(LayoutError::EmptyInput)?;
        Ok(Self { first, last })
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    /// Number of days, counting both ends
    pub fn len(&self) -> usize {
        (self.last - self.first).num_days() as usize + 1
    }

    /// Always false: a range holds at least one day
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// Column index of `date`
    pub fn index_of(&self, date: NaiveDate) -> Result<usize, LayoutError> {
        if !self.contains(date) {
            return Err(LayoutError::DateNotInRange {
                date,
                first: self.first,
                last: self.last,
            });
        }
        Ok((date - self.first).num_days() as usize)
    }

    /// Date of the column at `index`
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.days().nth(index)
    }

    /// Every day of the range in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.len())
    }
}

// ============================================================================
// Group layout
// ============================================================================

/// Height of a group holding `task_count` bars
///
/// An empty group keeps its paddings and no gap.
pub fn group_height(options: &LayoutOptions, task_count: usize) -> f64 {
    let bars = task_count as f64;
    let gaps = task_count.saturating_sub(1) as f64;
    options.task_height * bars
        + options.task_gap * gaps
        + options.group_padding_top
        + options.group_padding_bottom
}

/// Top of the bar at `index`, relative to its group
pub fn task_top_in_group(options: &LayoutOptions, index: usize) -> f64 {
    options.group_padding_top + index as f64 * (options.task_height + options.task_gap)
}

/// Vertical placement of one group
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupBand {
    pub name: String,
    /// Top edge, relative to the task area
    pub top: f64,
    pub height: f64,
    /// Bar tops relative to `top`, one per task in order
    pub task_tops: Vec<f64>,
}

impl GroupBand {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Bar top relative to the task area
    pub fn absolute_task_top(&self, index: usize) -> Option<f64> {
        self.task_tops.get(index).map(|offset| self.top + offset)
    }
}

/// Stacked group bands
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupLayout {
    pub bands: Vec<GroupBand>,
    pub total_height: f64,
}

impl GroupLayout {
    pub fn compute(groups: &[Group], options: &LayoutOptions) -> Self {
        let mut bands = Vec::with_capacity(groups.len());
        let mut top = 0.0;

        for group in groups {
            let height = group_height(options, group.len());
            let task_tops = (0..group.len())
                .map(|i| task_top_in_group(options, i))
                .collect();
            bands.push(GroupBand {
                name: group.name.clone(),
                top,
                height,
                task_tops,
            });
            top += height;
        }

        Self {
            bands,
            total_height: top,
        }
    }

    /// Band of the first group with this name
    pub fn band(&self, name: &str) -> Option<&GroupBand> {
        self.bands.iter().find(|b| b.name == name)
    }

    /// Bar top of a task as (group-relative, absolute)
    pub fn task_top(&self, group_index: usize, task_index: usize) -> Option<(f64, f64)> {
        let band = self.bands.get(group_index)?;
        let relative = *band.task_tops.get(task_index)?;
        Some((relative, band.top + relative))
    }
}

// ============================================================================
// Task geometry
// ============================================================================

/// Drawing state of a bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarState {
    NotStarted,
    InProgress,
    Completed,
}

impl BarState {
    pub fn from_progress(rate: u8) -> Self {
        match rate {
            0 => BarState::NotStarted,
            100 => BarState::Completed,
            _ => BarState::InProgress,
        }
    }
}

/// Progress-fill width for a bar of `width` pixels
///
/// A completed bar gets no fill: it is drawn entirely in the completed color.
pub fn progress_width(width: f64, rate: u8) -> f64 {
    if rate >= 100 {
        0.0
    } else {
        width * f64::from(rate) / 100.0
    }
}

/// Horizontal placement of one bar
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TaskGeometry {
    pub start_index: usize,
    pub end_index: usize,
    pub left: f64,
    pub width: f64,
    pub progress_width: f64,
    pub state: BarState,
}

impl TaskGeometry {
    pub fn compute(task: &Task, range: &DateRange, day_width: f64) -> Result<Self, LayoutError> {
        let rate = task.progress_rate();
        if rate > 100 {
            return Err(LayoutError::InvalidProgressRate {
                task: task.name.clone(),
                rate,
            });
        }
        if task.end < task.start {
            return Err(LayoutError::InvertedTask {
                task: task.name.clone(),
                start: task.start,
                end: task.end,
            });
        }

        let start_index = range.index_of(task.start)?;
        let end_index = range.index_of(task.end)?;
        let width = day_width * (end_index - start_index + 1) as f64;

        Ok(Self {
            start_index,
            end_index,
            left: day_width * start_index as f64,
            width,
            progress_width: progress_width(width, rate),
            state: BarState::from_progress(rate),
        })
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

// ============================================================================
// Chart layout
// ============================================================================

/// A task with its final position and colors
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedTask {
    pub group_index: usize,
    pub task_index: usize,
    pub task: Task,
    pub geometry: TaskGeometry,
    /// Bar top relative to its group
    pub top_in_group: f64,
    /// Bar top relative to the task area
    pub top: f64,
    pub fill_color: String,
    pub progress_color: String,
    pub group_color: String,
}

/// Flat record for an external drawing surface
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: String,
    pub progress_width: f64,
    pub progress_color: String,
    pub label: String,
    pub group: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Flat record for one group band
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupRecord {
    pub y: f64,
    pub height: f64,
    pub label: String,
    pub color: String,
}

/// Full geometry of a chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartLayout {
    #[serde(skip)]
    pub options: LayoutOptions,
    pub range: DateRange,
    pub columns: Vec<DayColumn>,
    pub groups: GroupLayout,
    /// Palette color of each band, in band order
    pub group_colors: Vec<String>,
    pub tasks: Vec<PlacedTask>,
    pub today: Option<TodayMarker>,
}

impl ChartLayout {
    /// Lay out a chart with the default theme colors
    pub fn compute(
        chart: &Chart,
        options: &LayoutOptions,
        today: Option<NaiveDate>,
    ) -> Result<Self, LayoutError> {
        Self::compute_themed(chart, options, &GanttTheme::default(), today)
    }

    /// Lay out a chart, taking bar and group colors from `theme`
    pub fn compute_themed(
        chart: &Chart,
        options: &LayoutOptions,
        theme: &GanttTheme,
        today: Option<NaiveDate>,
    ) -> Result<Self, LayoutError> {
        let range = DateRange::from_tasks(chart.tasks().map(|(_, task)| task))?;
        let groups = GroupLayout::compute(&chart.groups, options);
        let group_colors: Vec<String> = (0..groups.bands.len())
            .map(|index| theme.group_color(index).to_string())
            .collect();

        let mut tasks = Vec::with_capacity(chart.task_count());
        for (group_index, (group, band)) in chart.groups.iter().zip(&groups.bands).enumerate() {
            let group_color = &group_colors[group_index];
            for (task_index, task) in group.tasks.iter().enumerate() {
                let geometry = TaskGeometry::compute(task, &range, options.day_width)?;
                let top_in_group = band.task_tops[task_index];
                tasks.push(PlacedTask {
                    group_index,
                    task_index,
                    task: task.clone(),
                    geometry,
                    top_in_group,
                    top: band.top + top_in_group,
                    fill_color: theme.bar_color(geometry.state).to_string(),
                    progress_color: theme.in_progress_color.clone(),
                    group_color: group_color.clone(),
                });
            }
        }

        let today = today.and_then(|date| TodayMarker::locate(&range, options.day_width, date));
        let columns = day_columns(&range, options.day_width, today.map(|t| t.date));

        tracing::debug!(
            days = range.len(),
            groups = groups.bands.len(),
            tasks = tasks.len(),
            today = ?today.map(|t| t.date),
            "computed chart layout"
        );

        Ok(Self {
            options: options.clone(),
            range,
            columns,
            groups,
            group_colors,
            tasks,
            today,
        })
    }

    /// Width of the day area
    pub fn timeline_width(&self) -> f64 {
        self.options.day_width * self.range.len() as f64
    }

    /// Height of the task area
    pub fn body_height(&self) -> f64 {
        self.groups.total_height
    }

    /// Full chart width including the group column
    pub fn width(&self) -> f64 {
        self.options.label_width + self.timeline_width()
    }

    /// Full chart height including both header rows
    pub fn height(&self) -> f64 {
        self.options.header_height() + self.body_height()
    }

    /// Horizontal scroll position that brings "today" into view
    pub fn scroll_to_today(&self) -> Option<f64> {
        self.today.map(|marker| marker.scroll_offset())
    }

    pub fn task_records(&self) -> Vec<TaskRecord> {
        self.tasks
            .iter()
            .map(|placed| TaskRecord {
                x: placed.geometry.left,
                y: placed.top,
                width: placed.geometry.width,
                height: self.options.task_height,
                fill_color: placed.fill_color.clone(),
                progress_width: placed.geometry.progress_width,
                progress_color: placed.progress_color.clone(),
                label: placed.task.name.clone(),
                group: self.groups.bands[placed.group_index].name.clone(),
                start: placed.task.start,
                end: placed.task.end,
                progress: placed.task.progress_rate(),
                details: placed.task.details.clone(),
            })
            .collect()
    }

    pub fn group_records(&self) -> Vec<GroupRecord> {
        self.groups
            .bands
            .iter()
            .enumerate()
            .map(|(index, band)| GroupRecord {
                y: band.top,
                height: band.height,
                label: band.name.clone(),
                color: self.group_colors.get(index).cloned().unwrap_or_default(),
            })
            .collect()
    }
}
