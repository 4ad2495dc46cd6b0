mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use wellpulse::Pipeline;
use wellpulse_core::AppConfig;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load(cli.config.as_deref())?);

    if let Commands::Version = cli.command {
        return commands::version::run();
    }

    let pipeline = Pipeline::new(Arc::clone(&config));
    let year = |y: Option<i32>| y.unwrap_or(config.years.default);

    match cli.command {
        Commands::Serve { bind, no_warm } => {
            commands::serve::run(Arc::new(pipeline), bind.as_deref(), !no_warm)
        }
        Commands::Regions => commands::regions::run(&pipeline),
        Commands::Sentiment { region, year: y } => {
            commands::sentiment::run(&pipeline, &region, year(y))
        }
        Commands::Stats { year: y } => commands::stats::run(&pipeline, year(y)),
        Commands::Resources { region, year: y } => {
            commands::resources::run(&pipeline, &region, year(y))
        }
        Commands::Chart {
            region,
            year: y,
            kind,
            out,
        } => commands::chart::run(&pipeline, &region, year(y), &kind, &out),
        Commands::Version => commands::version::run(),
    }
}
