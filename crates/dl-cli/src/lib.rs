//! daylog CLI library.
//!
//! This crate provides the command-line interface for daylog.

mod cli;
pub mod commands;
mod config;
mod theme;

pub use cli::{Cli, Commands};
pub use config::Config;
