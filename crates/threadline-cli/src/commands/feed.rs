use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use super::{transcript_view, RenderSettings};
use crate::config::CliConfig;
use crate::feed::{poll_feed, FeedPanel};
use crate::source::FixtureSource;

/// The panel as printable text; an empty feed gets a one-line notice.
pub fn render_panel(panel: &FeedPanel, settings: RenderSettings) -> String {
    if panel.is_empty() {
        return "No trending threads right now.".to_string();
    }
    settings.render(&transcript_view(panel.messages(), settings))
}

/// Execute feed command
pub async fn execute(config: CliConfig, watch_mode: bool, interval: Option<u64>) -> Result<()> {
    let source = FixtureSource::new(&config.feed.fixtures);
    let settings = RenderSettings::from_config(&config);
    let mut panel = FeedPanel::new();

    if !watch_mode {
        panel
            .refresh_from(&source)
            .await
            .context("Failed to load trending threads")?;
        println!("{}", render_panel(&panel, settings));
        return Ok(());
    }

    let every = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.refresh_interval());
    info!(seconds = every.as_secs(), "watching trending feed");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
        let _ = shutdown_tx.send(true);
    });

    let refreshes = poll_feed(&mut panel, &source, every, shutdown_rx, |panel| {
        println!(
            "{}",
            format!("── refreshed {} ──", Local::now().format("%H:%M:%S")).dimmed()
        );
        println!("{}\n", render_panel(panel, settings));
    })
    .await;

    println!("{} {} refreshes", "Stopped after".dimmed(), refreshes);
    Ok(())
}
