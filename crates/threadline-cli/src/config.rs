use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::blocks::DEFAULT_TIMELINE_TITLE_WIDTH;
use crate::chat::DEFAULT_MAX_MESSAGES;

/// Width used when neither config nor terminal provide one
pub const FALLBACK_WIDTH: usize = 80;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Output layout
    #[serde(default)]
    pub display: DisplayConfig,
    /// Chat and feed sources
    #[serde(default)]
    pub feed: FeedConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Fixed render width; the terminal width is used when unset
    pub width: Option<usize>,

    /// Emit ANSI styling
    #[serde(default = "default_true")]
    pub color: bool,

    /// Display width of timeline titles
    #[serde(default = "default_timeline_title_width")]
    pub timeline_title_width: usize,
}

/// Feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Directory holding `analysis.json` and `trending.json`
    #[serde(default = "default_fixtures")]
    pub fixtures: PathBuf,

    /// Seconds between feed refreshes in watch mode
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Retained chat history
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Level used when no CLI flag is given (off, error, warn, info, debug, trace)
    pub level: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: None,
            color: true,
            timeline_title_width: default_timeline_title_width(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            fixtures: default_fixtures(),
            refresh_interval_secs: default_refresh_interval(),
            max_messages: default_max_messages(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeline_title_width() -> usize {
    DEFAULT_TIMELINE_TITLE_WIDTH
}

fn default_fixtures() -> PathBuf {
    PathBuf::from("fixtures")
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

/// Command line values that take precedence over file and environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub fixtures: Option<PathBuf>,
    pub no_color: bool,
}

impl CliConfig {
    /// Load configuration with precedence: defaults < file < env < args
    pub fn load(config_file: Option<PathBuf>, overrides: CliOverrides) -> Result<Self> {
        let mut config = Self::from_file_or_default(config_file)?;

        config.apply_env(|key| std::env::var(key).ok());

        if let Some(width) = overrides.width {
            config.display.width = Some(width);
        }
        if let Some(fixtures) = overrides.fixtures {
            config.feed.fixtures = fixtures;
        }
        if overrides.no_color {
            config.display.color = false;
        }

        Ok(config)
    }

    /// Apply `THREADLINE_*` variables read through `lookup`. Unparsable
    /// values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup("THREADLINE_WIDTH").and_then(|w| w.parse().ok()) {
            self.display.width = Some(width);
        }
        if let Some(dir) = lookup("THREADLINE_FIXTURES") {
            self.feed.fixtures = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("THREADLINE_FEED_INTERVAL").and_then(|s| s.parse().ok()) {
            self.feed.refresh_interval_secs = secs;
        }
        if let Some(level) = lookup("THREADLINE_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.display.color = false;
        }
    }

    /// Width to render at: configured, else terminal, else 80.
    pub fn render_width(&self) -> usize {
        self.display
            .width
            .or_else(|| {
                crossterm::terminal::size()
                    .ok()
                    .map(|(cols, _)| cols as usize)
                    .filter(|w| *w > 0)
            })
            .unwrap_or(FALLBACK_WIDTH)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.feed.refresh_interval_secs.max(1))
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("threadline");
        Ok(config_dir.join("config.toml"))
    }

    /// Create a new config file with example values
    pub fn create_example(path: &Path) -> Result<()> {
        let example = r#"# threadline configuration
# Location: ~/.config/threadline/config.toml

[display]
# Fixed render width; defaults to the terminal width
# width = 100

# ANSI styling (also disabled by --no-color or NO_COLOR)
color = true

# Display width of timeline titles; full titles are listed below the strip
timeline_title_width = 12

[feed]
# Directory holding analysis.json and trending.json
fixtures = "fixtures"

# Seconds between refreshes for `threadline feed --watch`
refresh_interval_secs = 300

# Chat messages kept in history
max_messages = 200

[logging]
# off, error, warn, info, debug, trace
# level = "warn"
"#;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        std::fs::write(path, example).context("Failed to write config file")?;

        Ok(())
    }

    /// Load config from file or return default
    fn from_file_or_default(config_file: Option<PathBuf>) -> Result<Self> {
        if std::env::var("THREADLINE_TEST_MODE").is_ok() && config_file.is_none() {
            return Ok(Self::default());
        }

        let path = config_file
            .or_else(|| Self::default_config_path().ok())
            .filter(|p| p.exists());

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Display the current configuration as TOML
    pub fn display_as_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config as TOML")
    }
}
