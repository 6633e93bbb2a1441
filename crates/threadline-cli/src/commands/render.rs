use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use threadline_core::BlockSequence;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use super::RenderSettings;
use crate::actions::{ActionLog, ThreadAction};
use crate::blocks::{ActionTarget, BlockRenderer, Inspection};
use crate::config::CliConfig;

/// Result of rendering a document and pressing its buttons
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub output: String,
    pub targets: Vec<ActionTarget>,
    pub inspections: Vec<Inspection>,
    /// Actions fired by the requested clicks, in click order
    pub actions: Vec<ThreadAction>,
    /// Hotkeys that matched no button
    pub missed: Vec<usize>,
    pub unknown_blocks: usize,
}

/// Parse `json`, render it and press `clicks` in order.
pub fn render_document(json: &str, clicks: &[usize], settings: RenderSettings) -> Result<RenderOutcome> {
    let blocks = BlockSequence::from_json(json).context("Failed to read block document")?;
    Ok(render_sequence(&blocks, clicks, settings))
}

pub fn render_sequence(
    blocks: &BlockSequence,
    clicks: &[usize],
    settings: RenderSettings,
) -> RenderOutcome {
    let log = ActionLog::new();
    let view = BlockRenderer::new(blocks)
        .timeline_title_width(settings.timeline_title_width)
        .on_action(&log)
        .render(&settings.context());

    let missed = clicks
        .iter()
        .copied()
        .filter(|hotkey| !view.click(*hotkey))
        .collect();

    RenderOutcome {
        output: settings.render(&view.node),
        targets: view.targets().to_vec(),
        inspections: view.inspections().to_vec(),
        actions: log.entries(),
        missed,
        unknown_blocks: blocks.unknown_count(),
    }
}

/// Normalized wire JSON for a document
pub fn normalize_document(json: &str) -> Result<String> {
    let blocks = BlockSequence::from_json(json).context("Failed to read block document")?;
    Ok(blocks.to_json_pretty()?)
}

async fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("Failed to read stdin")?;
        Ok(input)
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))
    }
}

/// Execute render command
pub async fn execute(config: CliConfig, file: PathBuf, click: Vec<usize>, json: bool) -> Result<()> {
    let input = read_input(&file).await?;

    if json {
        println!("{}", normalize_document(&input)?);
        return Ok(());
    }

    let outcome = render_document(&input, &click, RenderSettings::from_config(&config))?;
    if outcome.unknown_blocks > 0 {
        warn!(count = outcome.unknown_blocks, "document contains unsupported blocks");
    }

    println!("{}", outcome.output);

    if !outcome.targets.is_empty() {
        println!("\n{}", "Buttons:".bold());
        for target in &outcome.targets {
            println!(
                "  {} {} {}",
                target.hotkey.to_string().cyan(),
                target.label,
                format!("({}: {})", target.action_id, target.value).dimmed()
            );
        }
    }

    if !outcome.inspections.is_empty() {
        println!("\n{}", "Timeline:".bold());
        for entry in &outcome.inspections {
            println!("  {} {}", entry.label.cyan(), entry.detail);
        }
    }

    for hotkey in &outcome.missed {
        println!("{} No button with hotkey {}", "Warning:".yellow().bold(), hotkey);
    }
    for action in &outcome.actions {
        info!(%action, "clicked");
        println!("{} {}", "→".green(), action);
    }

    Ok(())
}
