//! Logger setup for the pipeline binary and library callers.

use std::io::{self, Write};

use colored::Colorize;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Installs the process-wide `env_logger`.
///
/// `RUST_LOG` is applied first, then `level` caps everything including this
/// crate. `sqlx` is held at Warn because the loader issues one statement per
/// feature; `reqwest` and `hyper` are held at Info.
///
/// ```bash
/// # per-module filters still come from RUST_LOG
/// RUST_LOG=geo_points::storage=trace geo_points run --log-level debug
/// ```
///
/// # Errors
///
/// `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("geo_points", level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            writeln!(
                buf,
                "{}",
                json_line(chrono::Utc::now().timestamp_millis(), record)
            )
        }),
        LogFormat::Plain => builder.format(|buf, record| write_plain_line(buf, record)),
    };

    builder.try_init()?;
    Ok(())
}

/// One JSON object per record: `ts` (epoch millis), `level`, `target`, `msg`.
fn json_line(ts_millis: i64, record: &Record<'_>) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": record.level().to_string(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}

fn write_plain_line<W: Write>(out: &mut W, record: &Record<'_>) -> io::Result<()> {
    let label = record.level().to_string();
    let level = match record.level() {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    };
    writeln!(
        out,
        "{} {} [{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        record.target().cyan(),
        level,
        record.args()
    )
}
