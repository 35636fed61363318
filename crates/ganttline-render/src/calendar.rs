//! Day columns and calendar markers: weekends, month boundaries, "today".

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::layout::DateRange;

/// Lead kept to the left of the today line when scrolling to it
pub const TODAY_SCROLL_LEAD: f64 = 30.0;

/// Weekend days are shaded as holidays
pub fn is_holiday(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().map_or(true, |next| next.month() != date.month())
}

/// One day column of the timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayColumn {
    pub index: usize,
    pub date: NaiveDate,
    /// Left edge, relative to the timeline
    pub x: f64,
    /// Day of month, unpadded
    pub label: String,
    /// `YYYY-MM`, on the first column and on the first of each month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_label: Option<String>,
    pub is_holiday: bool,
    pub is_today: bool,
    /// A month separator follows this column
    pub ends_month: bool,
}

pub fn day_columns(range: &DateRange, day_width: f64, today: Option<NaiveDate>) -> Vec<DayColumn> {
    range
        .days()
        .enumerate()
        .map(|(index, date)| DayColumn {
            index,
            date,
            x: day_width * index as f64,
            label: date.day().to_string(),
            month_label: (index == 0 || date.day() == 1)
                .then(|| date.format("%Y-%m").to_string()),
            is_holiday: is_holiday(date),
            is_today: today == Some(date),
            ends_month: is_last_day_of_month(date),
        })
        .collect()
}

/// Position of the injected "today" date on the timeline
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TodayMarker {
    pub date: NaiveDate,
    pub index: usize,
    /// Left edge of the today column
    pub x: f64,
    /// Where the today line is drawn
    pub center_x: f64,
}

impl TodayMarker {
    /// Marker for `today`, or `None` when it falls outside the range
    pub fn locate(range: &DateRange, day_width: f64, today: NaiveDate) -> Option<Self> {
        let index = range.index_of(today).ok()?;
        let x = day_width * index as f64;
        Some(Self {
            date: today,
            index,
            x,
            center_x: x + day_width / 2.0,
        })
    }

    /// Scroll-left of the task pane that shows the today line
    pub fn scroll_offset(&self) -> f64 {
        (self.center_x - TODAY_SCROLL_LEAD).max(0.0)
    }
}
