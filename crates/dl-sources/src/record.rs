//! Pre-normalized activity records, as served by webhooks and feed files.

use chrono::{DateTime, FixedOffset};
use dl_core::{Activity, ActivityKind};
use serde::Deserialize;
use std::collections::HashMap;

/// An activity as an external producer writes it.
///
/// The shape matches [`Activity`] except that `id` and `source` may be
/// omitted; missing ids get a generated UUID and missing sources fall back
/// to the consuming connector's name.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl RawRecord {
    pub(crate) fn into_activity(self, fallback_source: &str) -> Activity {
        Activity {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            kind: self.kind,
            title: self.title,
            description: self.description,
            timestamp: self.timestamp,
            duration_ms: self.duration_ms,
            source: self.source.unwrap_or_else(|| fallback_source.to_string()),
            url: self.url,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record_gets_id_and_source_filled_in() {
        let record: RawRecord = serde_json::from_str(
            r#"{"title": "Standup", "timestamp": "2025-06-02T09:30:00+02:00"}"#,
        )
        .unwrap();
        let activity = record.into_activity("feed");

        assert!(!activity.id.is_empty());
        assert_eq!(activity.kind, ActivityKind::Custom);
        assert_eq!(activity.source, "feed");
    }

    #[test]
    fn explicit_fields_are_preserved() {
        let record: RawRecord = serde_json::from_str(
            r#"{
                "id": "cal-7",
                "type": "calendar",
                "title": "Planning",
                "timestamp": "2025-06-02T10:00:00+02:00",
                "duration_ms": 3600000,
                "source": "calendar",
                "metadata": {"room": "3a"}
            }"#,
        )
        .unwrap();
        let activity = record.into_activity("webhook");

        assert_eq!(activity.id, "cal-7");
        assert_eq!(activity.kind, ActivityKind::Calendar);
        assert_eq!(activity.source, "calendar");
        assert_eq!(activity.duration_ms, Some(3_600_000));
        assert_eq!(activity.metadata.get("room").map(String::as_str), Some("3a"));
    }
}
