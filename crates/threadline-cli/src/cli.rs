use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "threadline")]
#[command(about = "threadline - render story threads and trending feeds in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value or defaults to 'off'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/threadline/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Render width in columns (defaults to the terminal width)
    #[arg(short = 'w', long, global = true)]
    pub width: Option<usize>,

    /// Disable ANSI styling
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding analysis.json and trending.json
    #[arg(long, global = true)]
    pub fixtures: Option<PathBuf>,
}

impl Cli {
    /// Level from flags, `None` when neither flag was given
    pub fn level_override(&self) -> Option<LogLevel> {
        if self.verbose {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a block document (JSON array or object with `blocks`)
    Render {
        /// Document path, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathBuf,

        /// Press the button with this hotkey after rendering (repeatable)
        #[arg(short = 'k', long = "click", value_name = "HOTKEY")]
        click: Vec<usize>,

        /// Print the normalized block sequence as JSON instead of rendering
        #[arg(long)]
        json: bool,
    },

    /// Ask for threads related to a query or pasted article
    Ask {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Treat the query as pasted article text
        #[arg(long)]
        article: bool,
    },

    /// Show threads attached to trending topics
    Feed {
        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,

        /// Seconds between refreshes (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize a new config file
    Init {
        /// Path for the config file (defaults to ~/.config/threadline/config.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite existing config file
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Show the current effective configuration
    Show,
}
