//! Day command: one day's activities in the requested format.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dl_core::{Format, RenderOptions, Timeline, render_timeline};
use dl_sources::{SourceRegistry, collect_activities};

use crate::commands::util;

pub async fn run<W: Write>(
    writer: &mut W,
    registry: &SourceRegistry,
    date: NaiveDate,
    format: Format,
    options: &RenderOptions,
    color: bool,
) -> Result<()> {
    let activities = collect_activities(registry, date).await;
    let mut timeline = Timeline::new(date);
    timeline.add_activities(activities);

    if format == Format::Table {
        util::write_legend(writer, &timeline.summary(), color)?;
    }

    let output = render_timeline(&timeline, format, options).context("failed to render day")?;
    write!(writer, "{output}")?;
    Ok(())
}
