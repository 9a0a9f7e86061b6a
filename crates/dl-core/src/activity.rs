//! Activity record and the kind enum as the single source of truth for kind tags.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A single unit of recorded work from any source.
///
/// Timestamps keep whatever UTC offset the source reported. Nothing in the
/// core ever converts between zones, so an activity recorded at 09:07+02:00
/// renders as 09:07.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Source-scoped identifier (commit SHA, event id, generated UUID).
    pub id: String,
    /// What kind of work this was.
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    /// One-line human-readable summary.
    pub title: String,
    /// Longer free-form context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the activity occurred, offset preserved from the source.
    pub timestamp: DateTime<FixedOffset>,
    /// Explicit duration in milliseconds, when the source knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    /// Machine name of the producing source, e.g. `github`.
    pub source: String,
    /// Link back to the activity, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source-specific string key/value pairs.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        kind: ActivityKind,
        title: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: None,
            timestamp,
            duration_ms: None,
            source: source.into(),
            url: None,
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Canonical activity kinds.
///
/// Kind tags arrive from external payloads, so parsing never fails: any tag
/// outside the canonical set maps to [`ActivityKind::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityKind {
    GitCommit,
    Calendar,
    Slack,
    IssueTracker,
    File,
    Browser,
    Application,
    System,
    #[default]
    Custom,
}

impl ActivityKind {
    /// All canonical kinds, in display order.
    pub const ALL: [Self; 9] = [
        Self::GitCommit,
        Self::Calendar,
        Self::Slack,
        Self::IssueTracker,
        Self::File,
        Self::Browser,
        Self::Application,
        Self::System,
        Self::Custom,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitCommit => "git-commit",
            Self::Calendar => "calendar",
            Self::Slack => "slack",
            Self::IssueTracker => "issue-tracker",
            Self::File => "file",
            Self::Browser => "browser",
            Self::Application => "application",
            Self::System => "system",
            Self::Custom => "custom",
        }
    }

    /// Parses a kind tag, mapping anything unrecognized to `Custom`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "git-commit" => Self::GitCommit,
            "calendar" => Self::Calendar,
            "slack" => Self::Slack,
            "issue-tracker" => Self::IssueTracker,
            "file" => Self::File,
            "browser" => Self::Browser,
            "application" => Self::Application,
            "system" => Self::System,
            _ => Self::Custom,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl Serialize for ActivityKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&s))
    }
}
