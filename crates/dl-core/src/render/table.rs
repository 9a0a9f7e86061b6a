//! Plain-text table rendering.

use chrono::{DateTime, Duration, FixedOffset};
use std::fmt::Write;

use super::{RenderOptions, format_duration};
use crate::activity::Activity;
use crate::grouping::DayBucket;
use crate::labels::source_label;

/// Silence between consecutive activities that earns a visible marker.
const GAP_MARKER_MIN: i64 = 60;

/// Indent matching the `HH:MM  ` time column.
const DETAIL_INDENT: &str = "       ";

pub(super) fn format_day(activities: &[Activity], options: &RenderOptions) -> String {
    if activities.is_empty() {
        return "No activities.\n".to_string();
    }
    let mut out = String::new();
    write_activity_lines(&mut out, activities, options);
    out
}

/// One section per non-empty day; days with no activities are skipped.
pub(super) fn format_week(buckets: &[DayBucket], options: &RenderOptions) -> String {
    if buckets.iter().all(|b| b.activities.is_empty()) {
        return "No activities for the week.\n".to_string();
    }

    let mut out = String::new();
    let mut first = true;
    for bucket in buckets {
        if bucket.activities.is_empty() {
            continue;
        }
        if !first {
            writeln!(out).unwrap();
        }
        first = false;
        writeln!(out, "{}", bucket.date.format("%A, %b %-d, %Y")).unwrap();
        write_activity_lines(&mut out, &bucket.activities, options);
    }
    out
}

fn write_activity_lines(out: &mut String, activities: &[Activity], options: &RenderOptions) {
    let mut prev: Option<DateTime<FixedOffset>> = None;
    for activity in activities {
        if let Some(prev) = prev {
            let gap = activity.timestamp - prev;
            if gap > Duration::minutes(GAP_MARKER_MIN) {
                writeln!(
                    out,
                    "{DETAIL_INDENT}-- gap {} --",
                    format_duration(gap.num_milliseconds())
                )
                .unwrap();
            }
        }

        writeln!(
            out,
            "{}  {:<15}  {}  ({})",
            activity.timestamp.format("%H:%M"),
            format!("[{}]", activity.kind),
            activity.title,
            source_label(&activity.source)
        )
        .unwrap();

        if options.show_details {
            if let Some(description) = activity.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(out, "{DETAIL_INDENT}{description}").unwrap();
            }
            if let Some(ms) = activity.duration_ms {
                writeln!(out, "{DETAIL_INDENT}duration: {}", format_duration(ms)).unwrap();
            }
            if let Some(url) = &activity.url {
                writeln!(out, "{DETAIL_INDENT}url: {url}").unwrap();
            }
        }

        prev = Some(activity.timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use chrono::{NaiveDate, TimeZone};

    fn at(day: u32, hour: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, day, hour, min, 0)
            .unwrap()
    }

    fn act(title: &str, hour: u32, min: u32) -> Activity {
        Activity::new(title, ActivityKind::GitCommit, title, at(2, hour, min), "github")
    }

    #[test]
    fn lines_show_time_kind_title_and_source() {
        let out = format_day(&[act("Fix auth bug", 9, 7)], &RenderOptions::default());
        assert_eq!(out, "09:07  [git-commit]     Fix auth bug  (GitHub)\n");
    }

    #[test]
    fn empty_day_prints_a_message() {
        let out = format_day(&[], &RenderOptions::default());
        assert_eq!(out, "No activities.\n");
    }

    #[test]
    fn gap_marker_appears_only_past_one_hour() {
        let activities = [
            act("morning", 9, 0),
            act("near", 10, 0),
            act("afternoon", 14, 0),
        ];
        let out = format_day(&activities, &RenderOptions::default());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("morning"));
        // Exactly one hour between the first two lines, so no marker there.
        assert!(lines[1].contains("near"));
        assert_eq!(lines[2], "       -- gap 4h 0m --");
        assert!(lines[3].contains("afternoon"));
    }

    #[test]
    fn details_add_indented_lines() {
        let activity = act("Fix auth bug", 9, 7)
            .with_description("Race in token refresh")
            .with_duration_ms(25 * 60 * 1000)
            .with_url("https://github.com/acme/app/commit/abc123");
        let options = RenderOptions {
            show_details: true,
            ..RenderOptions::default()
        };

        let out = format_day(&[activity], &options);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "       Race in token refresh");
        assert_eq!(lines[2], "       duration: 25m");
        assert_eq!(lines[3], "       url: https://github.com/acme/app/commit/abc123");
    }

    #[test]
    fn details_are_hidden_by_default() {
        let activity = act("Fix auth bug", 9, 7).with_description("Race in token refresh");
        let out = format_day(&[activity], &RenderOptions::default());
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn week_headers_only_cover_non_empty_days() {
        let buckets = vec![
            DayBucket {
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                activities: vec![act("Fix auth bug", 9, 0)],
            },
            DayBucket {
                date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
                activities: vec![],
            },
            DayBucket {
                date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
                activities: vec![act("Deploy", 15, 30)],
            },
        ];
        let out = format_week(&buckets, &RenderOptions::default());

        assert!(out.contains("Monday, Jun 2, 2025"));
        assert!(!out.contains("Jun 3"));
        assert!(out.contains("Wednesday, Jun 4, 2025"));
        assert_eq!(out.matches('\n').count(), 5);
    }

    #[test]
    fn empty_week_prints_a_message() {
        let buckets = vec![DayBucket {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            activities: vec![],
        }];
        let out = format_week(&buckets, &RenderOptions::default());
        assert_eq!(out, "No activities for the week.\n");
    }
}
