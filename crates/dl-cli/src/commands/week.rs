//! Week command: seven days of activities, grouped by day.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dl_core::{Format, RenderOptions, Timeline, render_week};
use dl_sources::{SourceRegistry, collect_activities};

use crate::commands::util;

/// Renders the Monday-to-Sunday week containing `date`.
///
/// Fetches finish for every day before the first byte of output, so a
/// renderer always sees the complete sorted week.
pub async fn run<W: Write>(
    writer: &mut W,
    registry: &SourceRegistry,
    date: NaiveDate,
    format: Format,
    options: &RenderOptions,
    color: bool,
) -> Result<()> {
    let days = util::week_of(date);

    let mut merged = Vec::new();
    for day in &days {
        merged.extend(collect_activities(registry, *day).await);
    }
    let mut timeline = Timeline::new(days[0]);
    timeline.add_activities(merged);

    if format == Format::Table {
        util::write_legend(writer, &timeline.summary(), color)?;
    }

    let output = render_week(timeline.activities(), &days, format, options)
        .context("failed to render week")?;
    write!(writer, "{output}")?;
    Ok(())
}
