//! Taxi timesheet engine.
//!
//! Collapses a day of activities into rounded quarter-hour blocks that read
//! like a hand-written timesheet.
//!
//! # Algorithm Summary
//!
//! 1. Give every activity a raw end: its own duration when it has one, else
//!    stretch to the next activity when the gap is small, else a fixed block
//! 2. Round starts down to a quarter-hour boundary, ends strictly up
//! 3. Print one line per entry, folding near-adjacent entries into a
//!    continuation form that repeats only the end time

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use std::fmt::Write;

use crate::activity::Activity;
use crate::grouping::DayBucket;
use crate::labels::source_label;

/// Largest gap to the next activity that still counts as occupied time.
const MAX_CHAIN_GAP_MIN: i64 = 30;
/// Block length assumed when nothing better is known.
const DEFAULT_BLOCK_MIN: i64 = 15;
/// Rounding granularity.
const QUARTER_MIN: u32 = 15;
/// How close a start must be to the previous end to print as a continuation.
const CONTINUATION_SLACK_MIN: i64 = 5;

/// One rounded timesheet block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxiEntry {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub label: String,
}

/// Derives rounded entries from activities already in timestamp order.
#[must_use]
pub fn entries(activities: &[Activity]) -> Vec<TaxiEntry> {
    let mut out = Vec::with_capacity(activities.len());
    for (i, activity) in activities.iter().enumerate() {
        let start = activity.timestamp;
        let end = raw_end(start, activity.duration_ms, activities.get(i + 1));
        out.push(TaxiEntry {
            start: floor_to_quarter(start),
            end: ceil_to_quarter(end),
            label: format!("{} ({})", activity.title, source_label(&activity.source)),
        });
    }
    out
}

fn raw_end(
    start: DateTime<FixedOffset>,
    duration_ms: Option<i64>,
    next: Option<&Activity>,
) -> DateTime<FixedOffset> {
    if let Some(ms) = duration_ms.filter(|&ms| ms > 0) {
        return start + Duration::milliseconds(ms);
    }
    let chains = next.filter(|n| n.timestamp - start <= Duration::minutes(MAX_CHAIN_GAP_MIN));
    if let Some(next) = chains {
        return next.timestamp;
    }
    start + Duration::minutes(DEFAULT_BLOCK_MIN)
}

fn floor_to_quarter(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let past = i64::from(t.minute() % QUARTER_MIN) * 60 + i64::from(t.second());
    t - Duration::seconds(past) - Duration::nanoseconds(i64::from(t.nanosecond()))
}

/// Ends always advance to the next boundary, even when already on one.
fn ceil_to_quarter(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    floor_to_quarter(t) + Duration::minutes(i64::from(QUARTER_MIN))
}

/// Renders one day as a date header plus one line per entry.
///
/// An entry starting within five minutes of the previous entry's end prints
/// in continuation form (`-HH:MM label`), so adjacent blocks read as one
/// span. A day with no activities prints only its header.
#[must_use]
pub fn format_day(date: NaiveDate, activities: &[Activity]) -> String {
    let mut out = String::new();
    writeln!(out, "{}", date.format("%d/%m/%Y")).unwrap();

    let mut prev_end: Option<DateTime<FixedOffset>> = None;
    for entry in entries(activities) {
        let continues = prev_end.is_some_and(|end| {
            (entry.start - end).abs() <= Duration::minutes(CONTINUATION_SLACK_MIN)
        });
        if continues {
            writeln!(out, "-{} {}", entry.end.format("%H:%M"), entry.label).unwrap();
        } else {
            writeln!(
                out,
                "{}-{} {}",
                entry.start.format("%H:%M"),
                entry.end.format("%H:%M"),
                entry.label
            )
            .unwrap();
        }
        prev_end = Some(entry.end);
    }
    out
}

/// Renders each day bucket independently, with a blank line after every
/// non-empty day that has days following it.
#[must_use]
pub fn format_week(buckets: &[DayBucket]) -> String {
    let mut out = String::new();
    for (i, bucket) in buckets.iter().enumerate() {
        out.push_str(&format_day(bucket.date, &bucket.activities));
        if !bucket.activities.is_empty() && i + 1 < buckets.len() {
            out.push('\n');
        }
    }
    out
}
