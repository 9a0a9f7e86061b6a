use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use dl_core::RenderOptions;
use dl_sources::SourceRegistry;
use tracing_subscriber::EnvFilter;

use dl_cli::commands::{day, sources, summary, util, week};
use dl_cli::{Cli, Commands, Config};

fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn build_registry(config: &Config) -> Result<SourceRegistry> {
    let registry =
        SourceRegistry::from_config(&config.sources).context("failed to build source registry")?;
    if registry.is_empty() {
        tracing::warn!("no sources enabled; output will be empty");
    }
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout();
    let color = stdout.is_terminal();

    match &cli.command {
        Some(Commands::Day {
            date,
            format,
            max_items,
            details,
        }) => {
            let config = load_config(&cli)?;
            let registry = build_registry(&config)?;
            let date = util::resolve_date(date.as_deref())?;
            let options = RenderOptions {
                max_items: *max_items,
                show_details: *details,
            };
            day::run(&mut stdout, &registry, date, *format, &options, color).await?;
        }
        Some(Commands::Week {
            date,
            format,
            max_items,
            details,
        }) => {
            let config = load_config(&cli)?;
            let registry = build_registry(&config)?;
            let date = util::resolve_date(date.as_deref())?;
            let options = RenderOptions {
                max_items: *max_items,
                show_details: *details,
            };
            week::run(&mut stdout, &registry, date, *format, &options, color).await?;
        }
        Some(Commands::Sources) => {
            let config = load_config(&cli)?;
            sources::run(&mut stdout, &config)?;
        }
        Some(Commands::Summary { date, model }) => {
            let config = load_config(&cli)?;
            let registry = build_registry(&config)?;
            let date = util::resolve_date(date.as_deref())?;
            let api_key = config
                .api_key
                .clone()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
            summary::run(&mut stdout, &registry, api_key.as_deref(), model, date).await?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
