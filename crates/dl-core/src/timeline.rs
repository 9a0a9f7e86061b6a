//! Ordered collection of one day's activities plus summary statistics.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::activity::{Activity, ActivityKind};

/// A day's worth of activities, kept sorted by timestamp.
///
/// The `date` field is informational. Activities whose timestamps fall on a
/// different day are accepted as-is; callers that want a single-day view
/// filter before insertion.
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    /// The day this timeline nominally covers.
    pub date: NaiveDate,
    activities: Vec<Activity>,
}

impl Timeline {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            activities: Vec::new(),
        }
    }

    /// The activities in ascending timestamp order.
    ///
    /// Equal timestamps keep their insertion order, so re-sorting after every
    /// mutation never reshuffles ties.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
        self.activities.sort_by_key(|a| a.timestamp);
    }

    /// Bulk insert with a single re-sort at the end.
    pub fn add_activities(&mut self, activities: impl IntoIterator<Item = Activity>) {
        self.activities.extend(activities);
        self.activities.sort_by_key(|a| a.timestamp);
    }

    /// Activities matching `kind` exactly, in timeline order.
    #[must_use]
    pub fn filter_by_kind(&self, kind: ActivityKind) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|a| a.kind == kind)
            .cloned()
            .collect()
    }

    /// Activities from the named source, in timeline order.
    #[must_use]
    pub fn filter_by_source(&self, source: &str) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|a| a.source == source)
            .cloned()
            .collect()
    }

    /// Activities strictly inside the open interval `(start, end)`.
    ///
    /// Boundary timestamps are excluded on both ends.
    #[must_use]
    pub fn filter_by_time_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|a| a.timestamp > start && a.timestamp < end)
            .cloned()
            .collect()
    }

    /// Earliest and latest timestamps, or `None` for an empty timeline.
    #[must_use]
    pub fn time_range(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let first = self.activities.first()?;
        let last = self.activities.last()?;
        Some((first.timestamp, last.timestamp))
    }

    /// Computes all summary statistics in one pass over the activities.
    #[must_use]
    pub fn summary(&self) -> TimelineSummary {
        let mut by_kind: HashMap<ActivityKind, usize> = HashMap::new();
        let mut by_source: HashMap<String, usize> = HashMap::new();
        for activity in &self.activities {
            *by_kind.entry(activity.kind).or_insert(0) += 1;
            *by_source.entry(activity.source.clone()).or_insert(0) += 1;
        }
        TimelineSummary {
            total: self.activities.len(),
            by_kind,
            by_source,
            time_range: self.time_range(),
        }
    }
}

/// Aggregate statistics for a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSummary {
    pub total: usize,
    pub by_kind: HashMap<ActivityKind, usize>,
    pub by_source: HashMap<String, usize>,
    /// `None` when the timeline holds no activities.
    pub time_range: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn at(hour: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 2, hour, min, 0)
            .unwrap()
    }

    fn act(id: &str, kind: ActivityKind, hour: u32, min: u32) -> Activity {
        Activity::new(id, kind, format!("activity {id}"), at(hour, min), "github")
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn activities_stay_sorted_after_out_of_order_inserts() {
        let mut timeline = Timeline::new(day());
        timeline.add_activity(act("b", ActivityKind::GitCommit, 14, 0));
        timeline.add_activity(act("a", ActivityKind::GitCommit, 9, 0));
        timeline.add_activity(act("c", ActivityKind::GitCommit, 11, 30));

        let ids: Vec<&str> = timeline.activities().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let mut timeline = Timeline::new(day());
        timeline.add_activities([
            act("first", ActivityKind::Slack, 10, 0),
            act("second", ActivityKind::Slack, 10, 0),
            act("third", ActivityKind::Slack, 10, 0),
        ]);
        timeline.add_activity(act("fourth", ActivityKind::Slack, 10, 0));

        let ids: Vec<&str> = timeline.activities().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn filter_by_kind_returns_only_exact_matches() {
        let mut timeline = Timeline::new(day());
        timeline.add_activities([
            act("a", ActivityKind::GitCommit, 9, 0),
            act("b", ActivityKind::Calendar, 10, 0),
            act("c", ActivityKind::GitCommit, 11, 0),
        ]);

        let commits = timeline.filter_by_kind(ActivityKind::GitCommit);
        assert_eq!(commits.len(), 2);
        assert!(commits.iter().all(|a| a.kind == ActivityKind::GitCommit));

        assert!(timeline.filter_by_kind(ActivityKind::Browser).is_empty());
    }

    #[test]
    fn filter_by_time_range_excludes_boundaries() {
        let mut timeline = Timeline::new(day());
        timeline.add_activities([
            act("start", ActivityKind::System, 9, 0),
            act("inside", ActivityKind::System, 10, 0),
            act("end", ActivityKind::System, 11, 0),
        ]);

        let inside = timeline.filter_by_time_range(at(9, 0), at(11, 0));
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].id, "inside");
    }

    #[test]
    fn empty_timeline_has_no_time_range() {
        let timeline = Timeline::new(day());
        assert!(timeline.time_range().is_none());

        let summary = timeline.summary();
        assert_eq!(summary.total, 0);
        assert!(summary.by_kind.is_empty());
        assert!(summary.by_source.is_empty());
        assert!(summary.time_range.is_none());
    }

    #[test]
    fn summary_counts_kinds_and_sources() {
        let mut timeline = Timeline::new(day());
        let mut slack = act("s", ActivityKind::Slack, 12, 0);
        slack.source = "slack".to_string();
        timeline.add_activities([
            act("a", ActivityKind::GitCommit, 9, 0),
            act("b", ActivityKind::GitCommit, 10, 0),
            slack,
        ]);

        let summary = timeline.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_kind[&ActivityKind::GitCommit], 2);
        assert_eq!(summary.by_kind[&ActivityKind::Slack], 1);
        assert_eq!(summary.by_source["github"], 2);
        assert_eq!(summary.by_source["slack"], 1);
        assert_eq!(summary.time_range, Some((at(9, 0), at(12, 0))));
    }

    #[test]
    fn cross_day_activities_are_kept() {
        let other_day = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 3, 1, 0, 0)
            .unwrap();
        let mut timeline = Timeline::new(day());
        timeline.add_activity(Activity::new(
            "late",
            ActivityKind::System,
            "after midnight",
            other_day,
            "system",
        ));
        assert_eq!(timeline.len(), 1);
    }
}
