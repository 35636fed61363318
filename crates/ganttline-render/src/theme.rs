//! Colors and typography shared by the renderers.

use crate::layout::BarState;

/// Ordered palette for groups, assigned by first-seen position
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color theme for the Gantt chart
#[derive(Clone, Debug, PartialEq)]
pub struct GanttTheme {
    /// Group colors; wraps around when there are more groups than entries
    pub palette: Vec<String>,
    /// Bar color for tasks that are not completed
    pub started_color: String,
    /// Progress-fill color
    pub in_progress_color: String,
    /// Bar color for tasks at 100%
    pub completed_color: String,
    pub background_color: String,
    pub grid_color: String,
    pub holiday_color: String,
    pub today_color: String,
    pub text_color: String,
    /// Text drawn on top of bars and the today circle
    pub label_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub stroke_width: f64,
    /// Radius of the circle behind today's day number
    pub today_radius: f64,
}

impl Default for GanttTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl GanttTheme {
    pub fn light() -> Self {
        Self {
            palette: CATEGORY10.iter().map(|c| (*c).to_string()).collect(),
            started_color: "#80C4E4".into(),
            in_progress_color: "#008ACA".into(),
            completed_color: "#56CC27".into(),
            background_color: "#ffffff".into(),
            grid_color: "#dadada".into(),
            holiday_color: "#f5f5f5".into(),
            today_color: "#EF410B".into(),
            text_color: "#2c3e50".into(),
            label_color: "#ffffff".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 11,
            stroke_width: 0.5,
            today_radius: 10.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            background_color: "#1a1a2e".into(),
            grid_color: "#2d2d44".into(),
            holiday_color: "#22223a".into(),
            text_color: "#eaeaea".into(),
            ..Self::light()
        }
    }

    /// Color of the group at `index` in display order
    pub fn group_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return &self.started_color;
        }
        &self.palette[index % self.palette.len()]
    }

    /// Base bar color for a drawing state
    pub fn bar_color(&self, state: BarState) -> &str {
        match state {
            BarState::Completed => &self.completed_color,
            BarState::NotStarted | BarState::InProgress => &self.started_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_colors_wrap_around() {
        let theme = GanttTheme::default();
        assert_eq!(theme.group_color(0), "#1f77b4");
        assert_eq!(theme.group_color(3), "#d62728");
        assert_eq!(theme.group_color(10), "#1f77b4");
    }

    #[test]
    fn empty_palette_falls_back_to_bar_color() {
        let theme = GanttTheme {
            palette: vec![],
            ..GanttTheme::default()
        };
        assert_eq!(theme.group_color(4), theme.started_color);
    }

    #[test]
    fn completed_bars_use_completed_color() {
        let theme = GanttTheme::light();
        assert_eq!(theme.bar_color(BarState::Completed), "#56CC27");
        assert_eq!(theme.bar_color(BarState::InProgress), "#80C4E4");
        assert_eq!(theme.bar_color(BarState::NotStarted), "#80C4E4");
    }

    #[test]
    fn dark_theme_keeps_bar_colors() {
        let dark = GanttTheme::dark();
        assert_eq!(dark.completed_color, GanttTheme::light().completed_color);
        assert_ne!(dark.background_color, GanttTheme::light().background_color);
    }
}
