//! Logger setup built on `tracing-subscriber`.
//!
//! Console output with color control and an optional log file written in
//! one of three formats (full, compact, json).

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConsoleSettings, FileSettings, LoggerSettings};

/// Output format of the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Full,
    Compact,
    #[default]
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown log format '{other}'"),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Full => "full",
            Self::Compact => "compact",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// Build the level filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Console layer, or `None` when console output is disabled.
fn console_layer<S>(settings: &ConsoleSettings) -> Option<fmt::Layer<S>> {
    let use_ansi = settings.colored && std::io::stdout().is_terminal();
    settings.enabled.then(|| {
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
    })
}

/// Install the global subscriber described by `settings`.
pub fn init_logger(settings: &LoggerSettings) -> anyhow::Result<()> {
    anyhow::ensure!(
        settings.console.enabled || settings.file.enabled,
        "At least one output (console or file) must be enabled"
    );
    let filter = build_filter(&settings.level);

    if !settings.file.enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(&settings.console))
            .try_init()?;
        return Ok(());
    }

    let writer = Arc::new(open_log_file(&settings.file)?);
    let format: LogFormat = settings.file.format.parse()?;

    // The file layer goes first so console ANSI settings do not leak into span fields
    // written to the file.
    match format {
        LogFormat::Full => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer(&settings.console))
                .try_init()?;
        }
        LogFormat::Compact => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer(&settings.console))
                .try_init()?;
        }
        LogFormat::Json => {
            let file_layer = fmt::layer().with_ansi(false).json().with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer(&settings.console))
                .try_init()?;
        }
    }

    Ok(())
}

/// Open (and create the parent directory of) the configured log file.
pub fn open_log_file(settings: &FileSettings) -> anyhow::Result<File> {
    let path = Path::new(&settings.path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if settings.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    options
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
