use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use threadline_cli::{
    cli::{Cli, Commands, LogLevel},
    commands,
    config::{CliConfig, CliOverrides},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(
        cli.config.clone(),
        CliOverrides {
            width: cli.width,
            fixtures: cli.fixtures.clone(),
            no_color: cli.no_color,
        },
    )?;

    init_logging(cli.level_override(), &config);

    if !config.display.color {
        colored::control::set_override(false);
    }
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Render { file, click, json } => {
            commands::render::execute(config, file, click, json).await?
        }
        Commands::Ask { query, article } => commands::ask::execute(config, query, article).await?,
        Commands::Feed { watch, interval } => {
            commands::feed::execute(config, watch, interval).await?
        }
        Commands::Config(cmd) => commands::config::execute(config, cmd).await?,
    }

    Ok(())
}

/// Logs go to stderr so rendered output stays clean on stdout.
fn init_logging(flag: Option<LogLevel>, config: &CliConfig) {
    let level: LevelFilter = flag
        .map(LevelFilter::from)
        .or_else(|| {
            config
                .logging
                .level
                .as_deref()
                .and_then(|l| l.parse::<LevelFilter>().ok())
        })
        .unwrap_or(LevelFilter::OFF);

    let env_filter = format!(
        "threadline_cli={level},threadline_core={level},threadline_oil={level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();
}
