//! Rendering pipeline: one entry point per view, four output formats.
//!
//! Renderers never mutate their input and never treat "no activities" as an
//! error. The only error paths are a week render with zero requested days
//! and JSON serialization itself.

mod csv;
mod json;
mod table;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::activity::Activity;
use crate::grouping::group_by_day;
use crate::taxi;
use crate::timeline::Timeline;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Csv,
    Taxi,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Taxi => "taxi",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "taxi" => Ok(Self::Taxi),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Error type for unknown format selectors.
#[derive(Debug, Clone)]
pub struct UnknownFormat(String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown format: {} (expected table, json, csv, or taxi)", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

/// Rendering knobs shared by every format.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Keep only the first N activities (earliest timestamps), applied to the
    /// merged sorted list before any grouping.
    pub max_items: Option<usize>,
    /// Include descriptions, durations, and URLs in table output.
    pub show_details: bool,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("week rendering requires at least one day")]
    NoDaysRequested,
    #[error("failed to serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders a single day's timeline in the requested format.
///
/// Every output ends with exactly one trailing newline.
pub fn render_timeline(
    timeline: &Timeline,
    format: Format,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let shown = limit(timeline.activities(), options.max_items);
    match format {
        Format::Table => Ok(table::format_day(shown, options)),
        Format::Json => json::format_day(timeline.date, shown),
        Format::Csv => Ok(csv::format_activities(shown)),
        Format::Taxi => Ok(taxi::format_day(timeline.date, shown)),
    }
}

/// Renders activities bucketed into the requested days.
///
/// `activities` must already be in timestamp order. Activities outside the
/// requested days are dropped; requesting zero days is a caller error.
pub fn render_week(
    activities: &[Activity],
    days: &[NaiveDate],
    format: Format,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    if days.is_empty() {
        return Err(RenderError::NoDaysRequested);
    }
    let shown = limit(activities, options.max_items);
    let buckets = group_by_day(shown, days);
    match format {
        Format::Table => Ok(table::format_week(&buckets, options)),
        Format::Json => json::format_week(&buckets),
        Format::Csv => Ok(csv::format_activities(
            buckets.iter().flat_map(|b| &b.activities),
        )),
        Format::Taxi => Ok(taxi::format_week(&buckets)),
    }
}

fn limit(activities: &[Activity], max_items: Option<usize>) -> &[Activity] {
    match max_items {
        Some(n) if n < activities.len() => &activities[..n],
        _ => activities,
    }
}

/// Formats milliseconds as "Xh Ym" past an hour, "Xm" below it.
/// Negative durations clamp to "0m".
#[must_use]
pub fn format_duration(ms: i64) -> String {
    if ms < 0 {
        return "0m".to_string();
    }
    let total_minutes = ms / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
