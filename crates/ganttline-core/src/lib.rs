//! # ganttline-core
//!
//! Core domain model and traits for the ganttline layout engine.
//!
//! This crate provides:
//! - Domain types: `Chart`, `Group`, `Task`
//! - Layout configuration: `LayoutOptions`
//! - Core trait: `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ganttline_core::{Chart, Group, Task};
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2013, m, d).unwrap();
//!
//! let chart = Chart::new()
//!     .title("Launch")
//!     .group(
//!         Group::new("development")
//!             .task(Task::new("conceptualize", day(1, 28), day(2, 1)).progress(40))
//!             .task(Task::new("sketch", day(2, 1), day(2, 6))),
//!     );
//! assert_eq!(chart.task_count(), 2);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Task
// ============================================================================

/// A named unit of work spanning whole calendar days
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Label drawn on the bar
    pub name: String,
    /// First day of the task (inclusive)
    pub start: NaiveDate,
    /// Last day of the task (inclusive)
    pub end: NaiveDate,
    /// Completion percentage, 0-100. `None` means not started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Free text shown in tooltips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Task {
    /// Create a task covering `start..=end`
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            progress: None,
            details: None,
        }
    }

    /// Set the completion percentage
    pub fn progress(mut self, rate: u8) -> Self {
        self.progress = Some(rate);
        self
    }

    /// Attach tooltip details
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Progress rate with the "not started" default applied
    pub fn progress_rate(&self) -> u8 {
        self.progress.unwrap_or(0)
    }

    /// Number of calendar days covered, counting both ends
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn is_completed(&self) -> bool {
        self.progress == Some(100)
    }
}

// ============================================================================
// Group
// ============================================================================

/// A named row-band of tasks, drawn in insertion order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Append a task (builder style)
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ============================================================================
// Chart
// ============================================================================

/// The complete input of one layout pass
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    /// Optional heading for rendered output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Groups in display order
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a group (builder style)
    pub fn group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// All tasks in display order, paired with their owning group
    pub fn tasks(&self) -> impl Iterator<Item = (&Group, &Task)> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.tasks.iter().map(move |task| (group, task)))
    }

    pub fn task_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// True when there is no task to lay out (groups may still exist)
    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }

    /// Find a group by name
    pub fn get_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }
}

// ============================================================================
// Layout Options
// ============================================================================

/// Pixel constants shared by every layout pass and renderer
///
/// Missing fields fall back to [`LayoutOptions::default`] when deserialized,
/// so a config file only needs to list the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Width of one day column
    pub day_width: f64,
    /// Height of a task bar
    pub task_height: f64,
    /// Vertical space between two bars of the same group
    pub task_gap: f64,
    /// Space above the first bar of a group
    pub group_padding_top: f64,
    /// Space below the last bar of a group
    pub group_padding_bottom: f64,
    /// Width of the group label column
    pub label_width: f64,
    /// Height of the year-month header row
    pub month_header_height: f64,
    /// Height of the day-number header row
    pub day_header_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            day_width: 28.0,
            task_height: 15.0,
            task_gap: 10.0,
            group_padding_top: 5.0,
            group_padding_bottom: 5.0,
            label_width: 200.0,
            month_header_height: 20.0,
            day_header_height: 20.0,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure day column width
    pub fn day_width(mut self, width: f64) -> Self {
        self.day_width = width;
        self
    }

    /// Configure bar height
    pub fn task_height(mut self, height: f64) -> Self {
        self.task_height = height;
        self
    }

    /// Configure gap between bars
    pub fn task_gap(mut self, gap: f64) -> Self {
        self.task_gap = gap;
        self
    }

    /// Configure group padding (top, bottom)
    pub fn group_padding(mut self, top: f64, bottom: f64) -> Self {
        self.group_padding_top = top;
        self.group_padding_bottom = bottom;
        self
    }

    /// Configure group label column width
    pub fn label_width(mut self, width: f64) -> Self {
        self.label_width = width;
        self
    }

    /// Combined height of both header rows
    pub fn header_height(&self) -> f64 {
        self.month_header_height + self.day_header_height
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a chart to the output format
    fn render(&self, chart: &Chart) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Layout error. Any of these aborts the whole layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("No tasks to lay out")]
    EmptyInput,

    #[error("Date {date} is outside the chart range {first}..={last}")]
    DateNotInRange {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },

    #[error("Task '{task}' has progress rate {rate}, expected 0-100")]
    InvalidProgressRate { task: String, rate: u8 },

    #[error("Task '{task}' ends ({end}) before it starts ({start})")]
    InvertedTask {
        task: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================
