//! Raw fixture shapes and their conversion to the domain model.
//!
//! Two layouts are accepted, and may be mixed in one file:
//!
//! ```json
//! { "groups": [ { "name": "coding", "tasks": [ { "name": "HTML", "start": "2013-2-2", "end": "2013-2-6" } ] } ] }
//! ```
//!
//! ```json
//! { "tasks": [ { "task": "HTML", "type": "coding", "startTime": "2013-2-2", "endTime": "2013-2-6" } ] }
//! ```
//!
//! Flat tasks are grouped by `type` in first-seen order and appended to a
//! same-named group when one already exists.

use chrono::NaiveDate;
use ganttline_core::{Chart, Group, Task};
use serde::Deserialize;

use crate::ParseError;

/// Accepted date layout; chrono accepts unpadded month/day numbers here.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
pub struct RawChart {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub groups: Vec<RawGroup>,
    #[serde(default)]
    pub tasks: Vec<RawFlatTask>,
}

#[derive(Debug, Deserialize)]
pub struct RawGroup {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
pub struct RawTask {
    #[serde(alias = "task")]
    pub name: String,
    #[serde(alias = "startTime")]
    pub start: String,
    #[serde(alias = "endTime")]
    pub end: String,
    /// Read wide so that any out-of-range rate is reported against its task
    #[serde(default, alias = "progressRate")]
    pub progress: Option<i64>,
    #[serde(default)]
    pub details: Option<String>,
}

/// A task of the legacy flat layout, carrying its category inline
#[derive(Debug, Deserialize)]
pub struct RawFlatTask {
    #[serde(rename = "type", alias = "group")]
    pub category: String,
    #[serde(flatten)]
    pub task: RawTask,
}

impl RawTask {
    fn into_task(self) -> Result<Task, ParseError> {
        let start = parse_date(&self.start, &self.name)?;
        let end = parse_date(&self.end, &self.name)?;
        let progress = self
            .progress
            .map(|rate| parse_progress(rate, &self.name))
            .transpose()?;
        Ok(Task {
            name: self.name,
            start,
            end,
            progress,
            details: self.details,
        })
    }
}

impl RawChart {
    pub fn into_chart(self) -> Result<Chart, ParseError> {
        let mut groups = self
            .groups
            .into_iter()
            .map(|raw| {
                let tasks = raw
                    .tasks
                    .into_iter()
                    .map(RawTask::into_task)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Group {
                    name: raw.name,
                    tasks,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        for flat in self.tasks {
            let task = flat.task.into_task()?;
            match groups.iter_mut().find(|g| g.name == flat.category) {
                Some(group) => group.tasks.push(task),
                None => groups.push(Group {
                    name: flat.category,
                    tasks: vec![task],
                }),
            }
        }

        Ok(Chart {
            title: self.title,
            groups,
        })
    }
}

/// Parse a calendar date, reporting the owning task on failure
pub fn parse_date(value: &str, task: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        value: value.to_string(),
        task: task.to_string(),
    })
}

/// Check a progress rate, reporting the owning task on failure
pub fn parse_progress(rate: i64, task: &str) -> Result<u8, ParseError> {
    match u8::try_from(rate) {
        Ok(rate) if rate <= 100 => Ok(rate),
        _ => Err(ParseError::InvalidProgressRate {
            task: task.to_string(),
            rate,
        }),
    }
}
