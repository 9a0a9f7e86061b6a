//! GitLab activity source backed by the user events API.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use dl_core::{Activity, ActivityKind};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::settings::{FieldKind, FieldSpec, Requirement, SourceSettings, resolve_options};
use crate::{Source, SourceError, USER_AGENT};

pub(crate) const NAME: &str = "gitlab";
const DEFAULT_BASE_URL: &str = "https://gitlab.com";
const PER_PAGE: u32 = 100;

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "user_id",
        kind: FieldKind::Text,
        requirement: Requirement::Required,
    },
    FieldSpec {
        name: "token",
        kind: FieldKind::Secret,
        requirement: Requirement::Optional,
    },
    FieldSpec {
        name: "base_url",
        kind: FieldKind::Url,
        requirement: Requirement::Default(DEFAULT_BASE_URL),
    },
];

/// Fetches a user's contribution events: pushes, issue and merge request
/// actions, and comments.
pub struct GitlabSource {
    http: reqwest::Client,
    base_url: String,
    user_id: String,
    token: Option<String>,
}

impl fmt::Debug for GitlabSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitlabSource")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl GitlabSource {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let options = resolve_options(NAME, settings, FIELDS)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: options.required("base_url")?,
            user_id: options.required("user_id")?,
            token: options.optional("token"),
        })
    }
}

#[async_trait]
impl Source for GitlabSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<Activity>, SourceError> {
        let url = format!(
            "{}/api/v4/users/{}/events?per_page={PER_PAGE}",
            self.base_url, self.user_id
        );
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.header("PRIVATE-TOKEN", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedResponse {
                source_name: NAME.to_string(),
                reason: format!("status {status}"),
            });
        }

        let events: Vec<GlEvent> = response.json().await?;
        Ok(events
            .iter()
            .filter(|event| event.created_at.date_naive() == date)
            .filter_map(map_event)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct GlEvent {
    id: i64,
    action_name: String,
    created_at: DateTime<FixedOffset>,
    #[serde(default)]
    target_type: Option<String>,
    #[serde(default)]
    target_title: Option<String>,
    #[serde(default)]
    target_iid: Option<i64>,
    #[serde(default)]
    push_data: Option<GlPushData>,
}

#[derive(Debug, Deserialize)]
struct GlPushData {
    #[serde(default)]
    commit_count: i64,
    #[serde(rename = "ref", default)]
    ref_name: Option<String>,
    #[serde(default)]
    commit_title: Option<String>,
}

fn map_event(event: &GlEvent) -> Option<Activity> {
    if let Some(push) = &event.push_data {
        return Some(push_activity(event, push));
    }

    let target_title = event.target_title.as_deref()?;
    let target = match (event.target_type.as_deref(), event.target_iid) {
        (Some("MergeRequest"), Some(iid)) => format!("MR !{iid}"),
        (Some("Issue"), Some(iid)) => format!("issue #{iid}"),
        (Some(other), _) => other.to_lowercase(),
        (None, _) => return None,
    };

    Some(Activity::new(
        event.id.to_string(),
        ActivityKind::IssueTracker,
        format!("{} {target}: {target_title}", event.action_name),
        event.created_at,
        NAME,
    ))
}

fn push_activity(event: &GlEvent, push: &GlPushData) -> Activity {
    let title = push.commit_title.clone().unwrap_or_else(|| {
        format!("pushed {} commits", push.commit_count.max(1))
    });
    let mut activity = Activity::new(
        event.id.to_string(),
        ActivityKind::GitCommit,
        title,
        event.created_at,
        NAME,
    )
    .with_metadata("commits", push.commit_count.max(1).to_string());
    if let Some(ref_name) = &push.ref_name {
        activity = activity.with_metadata("ref", ref_name);
    }
    activity
}
