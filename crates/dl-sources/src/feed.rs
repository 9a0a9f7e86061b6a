//! Feed source: reads pre-normalized activity records from a local JSON file.
//!
//! Useful for piping activities out of tools with no API, and as a
//! deterministic source in end-to-end tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use dl_core::Activity;
use std::path::PathBuf;

use crate::record::RawRecord;
use crate::settings::{FieldKind, FieldSpec, Requirement, SourceSettings, resolve_options};
use crate::{Source, SourceError};

pub(crate) const NAME: &str = "feed";

pub(crate) const FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "path",
    kind: FieldKind::Text,
    requirement: Requirement::Required,
}];

/// Reads one JSON file holding an array of activity records.
#[derive(Debug)]
pub struct FeedSource {
    path: PathBuf,
}

impl FeedSource {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let options = resolve_options(NAME, settings, FIELDS)?;
        Ok(Self {
            path: PathBuf::from(options.required("path")?),
        })
    }
}

#[async_trait]
impl Source for FeedSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<Activity>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|cause| SourceError::Io {
                path: self.path.clone(),
                cause,
            })?;

        let records: Vec<RawRecord> = serde_json::from_str(&raw)?;
        Ok(records
            .into_iter()
            .filter(|record| record.timestamp.date_naive() == date)
            .map(|record| record.into_activity(NAME))
            .collect())
    }
}
