//! Generic webhook source: pulls pre-normalized activity records over HTTP.

use async_trait::async_trait;
use chrono::NaiveDate;
use dl_core::Activity;
use std::fmt;
use std::time::Duration;

use crate::record::RawRecord;
use crate::settings::{FieldKind, FieldSpec, Requirement, SourceSettings, resolve_options};
use crate::{Source, SourceError, USER_AGENT};

pub(crate) const NAME: &str = "webhook";

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "url",
        kind: FieldKind::Url,
        requirement: Requirement::Required,
    },
    FieldSpec {
        name: "token",
        kind: FieldKind::Secret,
        requirement: Requirement::Optional,
    },
];

/// Fetches a JSON array of activity records from a single endpoint.
///
/// The endpoint owns filtering decisions; this connector only drops records
/// that fall outside the requested day.
pub struct WebhookSource {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl fmt::Debug for WebhookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSource")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl WebhookSource {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let options = resolve_options(NAME, settings, FIELDS)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::ClientBuild)?;
        Ok(Self {
            http,
            url: options.required("url")?,
            token: options.optional("token"),
        })
    }
}

#[async_trait]
impl Source for WebhookSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<Activity>, SourceError> {
        let mut request = self.http.get(&self.url);
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

        let records: Vec<RawRecord> = response.json().await?;
        Ok(records
            .into_iter()
            .filter(|record| record.timestamp.date_naive() == date)
            .map(|record| record.into_activity(NAME))
            .collect())
    }
}
