//! CLI subcommand implementations.

pub mod day;
pub mod sources;
pub mod summary;
pub mod util;
pub mod week;
