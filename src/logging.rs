use std::io::Write;

use env_logger::{Builder, Target, fmt::Formatter};
use log::{Level, LevelFilter};

use crate::error::{Error, Result};

/// Installs the global logger, writing to stderr.
pub fn init_logger(level: LevelFilter, timestamps: bool) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| {
            if timestamps {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
