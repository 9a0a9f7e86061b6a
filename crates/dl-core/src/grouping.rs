//! Bucketing activities into calendar days for week views.

use chrono::NaiveDate;
use serde::Serialize;

use crate::activity::Activity;

/// One requested day and the activities that fell on it.
#[derive(Debug, Clone, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

/// Buckets `activities` into the requested `days`, preserving the caller's
/// day order.
///
/// Every requested day gets a bucket, even when nothing matched. An activity
/// lands on the day its own timestamp truncates to (the source's offset, no
/// zone conversion), and on the first requested occurrence of that day if the
/// caller repeats one. Activities outside the requested days are dropped.
#[must_use]
pub fn group_by_day(activities: &[Activity], days: &[NaiveDate]) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = days
        .iter()
        .map(|date| DayBucket {
            date: *date,
            activities: Vec::new(),
        })
        .collect();

    for activity in activities {
        let day = activity.timestamp.date_naive();
        match buckets.iter_mut().find(|b| b.date == day) {
            Some(bucket) => bucket.activities.push(activity.clone()),
            None => {
                tracing::trace!(id = %activity.id, day = %day, "activity outside requested days");
            }
        }
    }

    buckets
}
