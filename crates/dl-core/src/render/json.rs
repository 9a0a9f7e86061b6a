//! JSON rendering via serde.

use chrono::NaiveDate;
use serde::Serialize;

use super::RenderError;
use crate::activity::Activity;
use crate::grouping::DayBucket;

#[derive(Serialize)]
struct DayView<'a> {
    date: NaiveDate,
    activities: &'a [Activity],
}

#[derive(Serialize)]
struct WeekView<'a> {
    days: &'a [DayBucket],
}

pub(super) fn format_day(date: NaiveDate, activities: &[Activity]) -> Result<String, RenderError> {
    pretty(&DayView { date, activities })
}

pub(super) fn format_week(buckets: &[DayBucket]) -> Result<String, RenderError> {
    pretty(&WeekView { days: buckets })
}

fn pretty<T: Serialize>(view: &T) -> Result<String, RenderError> {
    let mut out = serde_json::to_string_pretty(view)?;
    out.push('\n');
    Ok(out)
}
