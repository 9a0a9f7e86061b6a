//! Claude API integration for daylog.
//!
//! Turns a day's timeline into a short prose summary of what the day was
//! spent on.

use std::fmt;
use std::time::Duration;

use dl_core::{ActivityKind, Timeline, source_label};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DAY_SUMMARY_MAX_TOKENS: u32 = 500;
const DAY_SUMMARY_TEMPERATURE: f32 = 0.3;

/// Activities included in the prompt before the rest is folded into a count.
const PROMPT_ACTIVITY_LIMIT: usize = 50;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Claude API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();

        if api_key.is_empty() {
            return Err(LlmError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self { http, api_key })
    }

    /// Summarizes a day of activities in a few sentences of prose.
    pub async fn summarize_day(
        &self,
        model: &str,
        timeline: &Timeline,
    ) -> Result<String, LlmError> {
        let prompt = build_day_prompt(timeline);
        let request = MessageRequest {
            model: model.to_string(),
            max_tokens: DAY_SUMMARY_MAX_TOKENS,
            temperature: DAY_SUMMARY_TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| LlmError::Api {
                message: format!("status {status}: {body}"),
            }));
        }

        let payload: MessageResponse = serde_json::from_str(&body)
            .map_err(|err| LlmError::InvalidResponse(err.to_string()))?;
        let text = extract_text(payload.content)?;
        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
}

fn extract_text(blocks: Vec<ContentBlock>) -> Result<String, LlmError> {
    let mut pieces = Vec::new();
    for block in blocks {
        let ContentBlock::Text { text } = block;
        pieces.push(text);
    }
    if pieces.is_empty() {
        return Err(LlmError::InvalidResponse(
            "missing text content".to_string(),
        ));
    }
    Ok(pieces.join("\n"))
}

fn parse_api_error(body: &str) -> Option<LlmError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| LlmError::Api {
            message: payload.error.message,
        })
}

fn build_day_prompt(timeline: &Timeline) -> String {
    let summary = timeline.summary();
    let mut lines = Vec::new();
    lines.push(
        "You are a work-journal assistant. Summarize this day of activity in 2-4 sentences."
            .to_string(),
    );
    lines.push("Rules:".to_string());
    lines.push("- Plain prose, no lists, no preamble.".to_string());
    lines.push("- Group related work; do not enumerate every item.".to_string());
    lines.push("- Do not include secrets, credentials, or URLs.".to_string());
    lines.push(String::new());
    lines.push(format!("date: {}", timeline.date));
    lines.push(format!("total_activities: {}", summary.total));

    let mut kinds: Vec<(ActivityKind, usize)> = summary.by_kind.into_iter().collect();
    kinds.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    if !kinds.is_empty() {
        let rendered = kinds
            .iter()
            .map(|(kind, count)| format!("{kind}({count})"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("kinds: {rendered}"));
    }

    let mut sources: Vec<(String, usize)> = summary.by_source.into_iter().collect();
    sources.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if !sources.is_empty() {
        let rendered = sources
            .iter()
            .map(|(source, count)| format!("{}({count})", source_label(source)))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("sources: {rendered}"));
    }

    lines.push(String::new());
    lines.push("activities:".to_string());
    for activity in timeline.activities().iter().take(PROMPT_ACTIVITY_LIMIT) {
        lines.push(format!(
            "- {} [{}] {}",
            activity.timestamp.format("%H:%M"),
            activity.kind,
            activity.title
        ));
    }
    let hidden = timeline.len().saturating_sub(PROMPT_ACTIVITY_LIMIT);
    if hidden > 0 {
        lines.push(format!("... and {hidden} more"));
    }

    lines.join("\n")
}
