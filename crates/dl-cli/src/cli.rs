//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dl_core::Format;

/// Activity timeline aggregator.
///
/// Pulls a day's work from configured sources (GitHub, GitLab, webhooks,
/// local feeds) into one timeline and renders it as a table, JSON, CSV, or
/// taxi-style timesheet.
#[derive(Debug, Parser)]
#[command(name = "dl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one day's activities.
    Day {
        /// Day to show: YYYY-MM-DD, "today", "yesterday", or "N days ago".
        #[arg(long)]
        date: Option<String>,

        /// Output format.
        #[arg(long, default_value_t = Format::Table)]
        format: Format,

        /// Show at most this many activities.
        #[arg(long)]
        max_items: Option<usize>,

        /// Include descriptions, durations, and URLs.
        #[arg(long)]
        details: bool,
    },

    /// Show the week (Monday to Sunday) around a day.
    Week {
        /// Any day inside the week to show.
        #[arg(long)]
        date: Option<String>,

        /// Output format.
        #[arg(long, default_value_t = Format::Table)]
        format: Format,

        /// Show at most this many activities across the whole week.
        #[arg(long)]
        max_items: Option<usize>,

        /// Include descriptions, durations, and URLs.
        #[arg(long)]
        details: bool,
    },

    /// List configured sources and the options each kind accepts.
    Sources,

    /// Summarize a day's activities with Claude.
    Summary {
        /// Day to summarize: YYYY-MM-DD, "today", "yesterday", or "N days ago".
        #[arg(long)]
        date: Option<String>,

        /// Model to use.
        #[arg(long, default_value = "claude-sonnet-4-5")]
        model: String,
    },
}
