//! Shared helpers for CLI commands.

use std::io::Write;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Datelike, Duration, Local, NaiveDate};
use dl_core::{ActivityKind, TimelineSummary};
use regex::Regex;

use crate::theme::kind_tag;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+days?\s+ago$").unwrap());

/// Conservative bound for relative date parsing (~1000 years).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Parse a date argument, defaulting to today.
///
/// Supports:
/// - Calendar dates: "2025-06-02"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago"
pub fn resolve_date(input: Option<&str>) -> anyhow::Result<NaiveDate> {
    let today = Local::now().date_naive();
    let Some(input) = input else {
        return Ok(today);
    };

    match input {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => {
            if let Some(caps) = RELATIVE_DATE_RE.captures(other) {
                let n: i64 = caps[1]
                    .parse()
                    .context("failed to parse number in relative date")?;
                if n > MAX_RELATIVE_DAYS {
                    anyhow::bail!("relative date too far back: {n} days");
                }
                return Ok(today - Duration::days(n));
            }
            NaiveDate::parse_from_str(other, "%Y-%m-%d").with_context(|| {
                format!(
                    "invalid date: {other}. Use YYYY-MM-DD, \"today\", \"yesterday\", or \"N days ago\""
                )
            })
        }
    }
}

/// The seven days of the week containing `date`, Monday first.
pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

/// Writes the activity-count legend that precedes table output.
///
/// One line of per-kind counts plus a trailing blank line; nothing at all
/// for an empty summary, so the renderer's own empty message stands alone.
pub fn write_legend<W: Write>(
    writer: &mut W,
    summary: &TimelineSummary,
    color: bool,
) -> anyhow::Result<()> {
    if summary.total == 0 {
        return Ok(());
    }

    let counts: Vec<String> = ActivityKind::ALL
        .into_iter()
        .filter_map(|kind| {
            summary
                .by_kind
                .get(&kind)
                .map(|count| format!("{count} {}", kind_tag(kind, color)))
        })
        .collect();

    writeln!(writer, "{} activities: {}", summary.total, counts.join("  "))?;
    writeln!(writer)?;
    Ok(())
}
