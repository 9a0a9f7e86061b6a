//! GitHub activity source backed by the public events API.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use dl_core::{Activity, ActivityKind};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::settings::{FieldKind, FieldSpec, Requirement, SourceSettings, resolve_options};
use crate::{Source, SourceError, USER_AGENT};

pub(crate) const NAME: &str = "github";
const DEFAULT_API_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "username",
        kind: FieldKind::Text,
        requirement: Requirement::Required,
    },
    FieldSpec {
        name: "token",
        kind: FieldKind::Secret,
        requirement: Requirement::Optional,
    },
    FieldSpec {
        name: "api_url",
        kind: FieldKind::Url,
        requirement: Requirement::Default(DEFAULT_API_URL),
    },
];

/// Fetches a user's public event stream and keeps the day's commits,
/// issue activity, and pull request activity.
pub struct GithubSource {
    http: reqwest::Client,
    api_url: String,
    username: String,
    token: Option<String>,
}

impl fmt::Debug for GithubSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubSource")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl GithubSource {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let options = resolve_options(NAME, settings, FIELDS)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::ClientBuild)?;
        Ok(Self {
            http,
            api_url: options.required("api_url")?,
            username: options.required("username")?,
            token: options.optional("token"),
        })
    }
}

#[async_trait]
impl Source for GithubSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<Activity>, SourceError> {
        let url = format!(
            "{}/users/{}/events?per_page={PER_PAGE}",
            self.api_url, self.username
        );
        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedResponse {
                source_name: NAME.to_string(),
                reason: format!("status {status}"),
            });
        }

        let events: Vec<GhEvent> = response.json().await?;
        Ok(events
            .iter()
            .filter(|event| event.created_at.date_naive() == date)
            .flat_map(map_event)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct GhEvent {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    created_at: DateTime<FixedOffset>,
    repo: GhRepo,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GhRepo {
    name: String,
}

fn map_event(event: &GhEvent) -> Vec<Activity> {
    match event.kind.as_str() {
        "PushEvent" => push_activities(event),
        "IssuesEvent" => issue_activity(event, None).into_iter().collect(),
        "IssueCommentEvent" => issue_activity(event, Some("commented on"))
            .into_iter()
            .collect(),
        "PullRequestEvent" => pull_request_activity(event).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// One activity per commit in the push; all share the push's timestamp.
fn push_activities(event: &GhEvent) -> Vec<Activity> {
    let Some(commits) = event.payload.get("commits").and_then(|c| c.as_array()) else {
        return Vec::new();
    };

    commits
        .iter()
        .filter_map(|commit| {
            let sha = commit.get("sha").and_then(|v| v.as_str())?;
            let message = commit.get("message").and_then(|v| v.as_str())?;
            let title = message.lines().next().unwrap_or(message);
            let mut activity = Activity::new(
                sha,
                ActivityKind::GitCommit,
                title,
                event.created_at,
                NAME,
            )
            .with_metadata("repo", &event.repo.name);
            if let Some(url) = commit.get("url").and_then(|v| v.as_str()) {
                activity = activity.with_url(url);
            }
            Some(activity)
        })
        .collect()
}

fn issue_activity(event: &GhEvent, action_override: Option<&str>) -> Option<Activity> {
    let issue = event.payload.get("issue")?;
    let title = issue.get("title").and_then(|v| v.as_str())?;
    let number = issue.get("number").and_then(serde_json::Value::as_i64)?;
    let action = match action_override {
        Some(action) => action.to_string(),
        None => event
            .payload
            .get("action")
            .and_then(|v| v.as_str())
            .unwrap_or("updated")
            .to_string(),
    };

    let mut activity = Activity::new(
        event.id.clone(),
        ActivityKind::IssueTracker,
        format!("{action} issue #{number}: {title}"),
        event.created_at,
        NAME,
    )
    .with_metadata("repo", &event.repo.name);
    if let Some(url) = issue.get("html_url").and_then(|v| v.as_str()) {
        activity = activity.with_url(url);
    }
    Some(activity)
}

fn pull_request_activity(event: &GhEvent) -> Option<Activity> {
    let pull = event.payload.get("pull_request")?;
    let title = pull.get("title").and_then(|v| v.as_str())?;
    let number = pull.get("number").and_then(serde_json::Value::as_i64)?;
    let action = event
        .payload
        .get("action")
        .and_then(|v| v.as_str())
        .unwrap_or("updated");

    let mut activity = Activity::new(
        event.id.clone(),
        ActivityKind::IssueTracker,
        format!("{action} PR #{number}: {title}"),
        event.created_at,
        NAME,
    )
    .with_metadata("repo", &event.repo.name);
    if let Some(url) = pull.get("html_url").and_then(|v| v.as_str()) {
        activity = activity.with_url(url);
    }
    Some(activity)
}
