//! Logging backend setup
//!
//! Installs an `env_logger` backend that writes either plain text or JSON lines to
//! stdout. Every record carries the environment and service name. When a log file
//! is configured, each record is also appended to it as a JSON line.

use crate::config::Settings;
use chrono::{SecondsFormat, Utc};
use env_logger::{Builder, Target};
use log::Record;
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Fields stamped on every record
#[derive(Debug, Clone)]
pub struct LogContext {
    pub environment: String,
    pub service: String,
}

impl LogContext {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            environment: settings.environment.to_string(),
            service: settings.service.name.clone(),
        }
    }
}

/// Install the global logger.
///
/// `RUST_LOG`, when set, takes precedence over the environment's default level.
pub fn init(settings: &Settings) -> Result<(), log::SetLoggerError> {
    let context = LogContext::from_settings(settings);
    let json = settings.log.json;

    let (file, file_error) = match settings.log.file.as_deref() {
        Some(path) => match open_log_file(path) {
            Ok(file) => (Some(Arc::new(Mutex::new(file))), None),
            Err(e) => (None, Some(format!("failed to open log file {}: {e}", path.display()))),
        },
        None => (None, None),
    };

    let mut builder = Builder::new();
    builder
        .filter_level(settings.log.level)
        .parse_default_env()
        .target(Target::Stdout)
        .format(move |buf, record| {
            if let Some(file) = &file {
                if let Ok(mut file) = file.lock() {
                    // Best effort: a failing log file must not break stdout logging.
                    let _ = writeln!(file, "{}", json_line(record, &context));
                }
            }
            if json {
                writeln!(buf, "{}", json_line(record, &context))
            } else {
                writeln!(buf, "{}", text_line(record, &context))
            }
        });
    builder.try_init()?;

    if let Some(message) = file_error {
        log::warn!("{message}; logging to stdout only");
    }

    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn source(record: &Record<'_>) -> String {
    match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_string(),
        _ => String::new(),
    }
}

/// Render a record as a single JSON object
pub fn json_line(record: &Record<'_>, context: &LogContext) -> String {
    json!({
        "time": timestamp(),
        "level": record.level().as_str(),
        "target": record.target(),
        "source": source(record),
        "message": record.args().to_string(),
        "environment": context.environment,
        "service": context.service,
    })
    .to_string()
}

/// Render a record as a human readable line
pub fn text_line(record: &Record<'_>, context: &LogContext) -> String {
    format!(
        "{} {:<5} [{}] {} environment={} service={}",
        timestamp(),
        record.level(),
        record.target(),
        record.args(),
        context.environment,
        context.service,
    )
}
