//! Core domain logic for daylog.
//!
//! This crate contains the fundamental types and logic for:
//! - Activities: normalized work records from any source
//! - Timelines: day-scoped, timestamp-ordered activity collections
//! - Rendering: table, JSON, CSV, and taxi timesheet output

pub mod activity;
pub mod grouping;
pub mod labels;
pub mod render;
pub mod taxi;
pub mod timeline;

pub use activity::{Activity, ActivityKind};
pub use grouping::{DayBucket, group_by_day};
pub use labels::source_label;
pub use render::{
    Format, RenderError, RenderOptions, UnknownFormat, format_duration, render_timeline,
    render_week,
};
pub use taxi::TaxiEntry;
pub use timeline::{Timeline, TimelineSummary};
