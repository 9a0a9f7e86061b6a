//! Summary command: ask Claude for a prose recap of one day.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dl_core::Timeline;
use dl_sources::{SourceRegistry, collect_activities};

pub async fn run<W: Write>(
    writer: &mut W,
    registry: &SourceRegistry,
    api_key: Option<&str>,
    model: &str,
    date: NaiveDate,
) -> Result<()> {
    let api_key = api_key
        .context("no API key configured; set api_key in config.toml or ANTHROPIC_API_KEY")?;
    let client = dl_llm::Client::new(api_key).context("failed to create API client")?;

    let activities = collect_activities(registry, date).await;
    let mut timeline = Timeline::new(date);
    timeline.add_activities(activities);

    if timeline.is_empty() {
        writeln!(writer, "No activities to summarize for {date}.")?;
        return Ok(());
    }

    tracing::debug!(date = %date, count = timeline.len(), "requesting day summary");
    let summary = client
        .summarize_day(model, &timeline)
        .await
        .context("summary request failed")?;
    writeln!(writer, "{summary}")?;
    Ok(())
}
