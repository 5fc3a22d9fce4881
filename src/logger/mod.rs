//! Logger Module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output with multiple formats (Full, Compact, JSON)

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{ConsoleSettings, FileSettings, LoggerSettings};

/// Initialize the global logger from logger settings.
///
/// Can only be called once per process; a second call fails when the global
/// subscriber is already set.
pub fn init_logger(settings: &LoggerSettings) -> anyhow::Result<()> {
    settings.validate()?;

    // Create filter from level string
    let filter = EnvFilter::try_new(&settings.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match (settings.console.enabled, settings.file.enabled) {
        (true, true) => init_both(settings, filter)?,
        (true, false) => init_console_only(&settings.console, filter),
        (false, true) => init_file_only(&settings.file, filter)?,
        (false, false) => anyhow::bail!("At least one output (console or file) must be enabled"),
    }

    Ok(())
}

fn init_console_only(settings: &ConsoleSettings, filter: EnvFilter) {
    let is_tty = std::io::stdout().is_terminal();
    let use_ansi = settings.colored && is_tty;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

fn init_file_only(settings: &FileSettings, filter: EnvFilter) -> anyhow::Result<()> {
    let writer = open_log_file(settings)?;

    match settings.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .compact()
                        .with_writer(writer),
                )
                .init();
        }
        // validate() pinned the format; the remaining value is "full"
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(writer),
                )
                .init();
        }
    }

    Ok(())
}

fn init_both(settings: &LoggerSettings, filter: EnvFilter) -> anyhow::Result<()> {
    let is_tty = std::io::stdout().is_terminal();
    let use_ansi = settings.console.colored && is_tty;
    let writer = open_log_file(&settings.file)?;

    // The file layer must be added BEFORE the console layer so ANSI codes do
    // not leak into file output; span field formatting follows the first
    // layer's ANSI setting. See https://github.com/tokio-rs/tracing/issues/1817
    match settings.file.format.to_lowercase().as_str() {
        "json" => {
            let file_layer = fmt::layer().with_ansi(false).json().with_writer(writer);

            let console_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer)
                .init();
        }
        "compact" => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer);

            let console_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer)
                .init();
        }
        _ => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);

            let console_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer)
                .init();
        }
    }

    Ok(())
}

/// Open the log file per the file settings, creating parent directories.
fn open_log_file(settings: &FileSettings) -> anyhow::Result<Arc<File>> {
    let path = Path::new(&settings.path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(settings.append)
        .truncate(!settings.append)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(Arc::new(file))
}
