//! Logging setup
//!
//! `RUST_LOG` wins over the configured level. Output goes to stdout unless
//! a log directory is configured and exists.

use std::path::Path;

use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "mealdesk-mock";

/// Initialize the global subscriber, optionally as JSON and into a daily file
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match (json, file_appender(log_dir)) {
        (true, Some(writer)) => builder.json().with_writer(writer).init(),
        (true, None) => builder.json().init(),
        (false, Some(writer)) => builder.with_ansi(false).with_writer(writer).init(),
        (false, None) => builder.init(),
    }
}

/// Daily rolling appender, `None` when the directory is unset or missing
fn file_appender(log_dir: Option<&str>) -> Option<RollingFileAppender> {
    let dir = Path::new(log_dir?);
    if !dir.is_dir() {
        return None;
    }
    Some(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
}
