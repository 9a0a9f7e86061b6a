//! Activity source connectors for daylog.
//!
//! Each connector implements [`Source`]: given a calendar day, produce the
//! normalized activities it knows about. A [`SourceRegistry`] builds enabled
//! connectors from configuration, and [`collect_activities`] fans fetches out
//! across them, skipping failures so one broken source never empties a day.

use async_trait::async_trait;
use chrono::NaiveDate;
use dl_core::Activity;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

mod feed;
mod github;
mod gitlab;
mod record;
pub mod settings;
mod webhook;

pub use feed::FeedSource;
pub use github::GithubSource;
pub use gitlab::GitlabSource;
pub use settings::{FieldKind, FieldSpec, Requirement, SourceSettings};
pub use webhook::WebhookSource;

pub(crate) const USER_AGENT: &str = concat!("daylog/", env!("CARGO_PKG_VERSION"));

/// Connector errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Configuration names a source kind this build doesn't know.
    #[error("unknown source kind: {0}")]
    UnknownKind(String),
    #[error("{source_name}: missing required option `{option}`")]
    MissingOption {
        source_name: String,
        option: &'static str,
    },
    #[error("{source_name}: invalid option `{option}`: {reason}")]
    InvalidOption {
        source_name: String,
        option: &'static str,
        reason: String,
    },
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{source_name}: unexpected response: {reason}")]
    UnexpectedResponse {
        source_name: String,
        reason: String,
    },
    #[error("failed to read {}: {cause}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("invalid activity record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

/// A provider of activities for a given day.
#[async_trait]
pub trait Source: Send + Sync {
    /// Machine name, also used as the default `Activity::source` value.
    fn name(&self) -> &str;

    /// Fetches the day's activities, in any order.
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<Activity>, SourceError>;
}

/// Source kinds this build can construct, in listing order.
#[must_use]
pub const fn kinds() -> &'static [&'static str] {
    &[feed::NAME, github::NAME, gitlab::NAME, webhook::NAME]
}

/// Declared options for a source kind, for display and validation.
#[must_use]
pub fn field_specs(kind: &str) -> Option<&'static [FieldSpec]> {
    match kind {
        feed::NAME => Some(feed::FIELDS),
        github::NAME => Some(github::FIELDS),
        gitlab::NAME => Some(gitlab::FIELDS),
        webhook::NAME => Some(webhook::FIELDS),
        _ => None,
    }
}

fn create_source(name: &str, settings: &SourceSettings) -> Result<Arc<dyn Source>, SourceError> {
    match name {
        feed::NAME => Ok(Arc::new(FeedSource::from_settings(settings)?)),
        github::NAME => Ok(Arc::new(GithubSource::from_settings(settings)?)),
        gitlab::NAME => Ok(Arc::new(GitlabSource::from_settings(settings)?)),
        webhook::NAME => Ok(Arc::new(WebhookSource::from_settings(settings)?)),
        other => Err(SourceError::UnknownKind(other.to_string())),
    }
}

/// The enabled connectors, keyed by name.
///
/// Construction fails fast on unknown kinds and invalid options; a config
/// typo should surface at startup, not as a silently empty day.
pub struct SourceRegistry {
    sources: BTreeMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    pub fn from_config(
        configs: &BTreeMap<String, SourceSettings>,
    ) -> Result<Self, SourceError> {
        let mut sources = BTreeMap::new();
        for (name, settings) in configs {
            if !settings.enabled {
                tracing::debug!(source = %name, "source disabled");
                continue;
            }
            sources.insert(name.clone(), create_source(name, settings)?);
        }
        Ok(Self { sources })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Source>> {
        self.sources.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Fetches one day from every registered source in parallel.
///
/// Failing sources are logged and skipped. Results merge in source-name
/// order, so output is deterministic regardless of completion order; callers
/// still sort by feeding the result through a timeline.
pub async fn collect_activities(registry: &SourceRegistry, date: NaiveDate) -> Vec<Activity> {
    let mut set = JoinSet::new();
    for source in registry.iter() {
        let source = Arc::clone(source);
        set.spawn(async move {
            let name = source.name().to_string();
            let result = source.fetch(date).await;
            (name, result)
        });
    }

    let mut by_source: BTreeMap<String, Vec<Activity>> = BTreeMap::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((name, Ok(activities))) => {
                tracing::debug!(source = %name, count = activities.len(), "fetched activities");
                by_source.insert(name, activities);
            }
            Ok((name, Err(err))) => {
                tracing::warn!(source = %name, error = %err, "skipping source after fetch error");
            }
            Err(err) => {
                tracing::warn!(error = %err, "source task panicked");
            }
        }
    }

    by_source.into_values().flatten().collect()
}
