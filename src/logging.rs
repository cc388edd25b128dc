//! File logging via log4rs.
//!
//! The terminal belongs to the renderer, so log records go to a file and
//! nowhere else. Without a configured path no logger is installed and the
//! `log` macros compile down to no-ops.

use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    Handle,
};

use crate::config::AppConfig;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} {m}{n}";

/// Build the log4rs configuration for a log file at `path`.
pub fn build_config(path: &Path, level: LevelFilter) -> Result<Config> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(level))
        .context("build log config")
}

/// Install the global logger if `config.log_path` is set.
pub fn init(config: &AppConfig) -> Result<Option<Handle>> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(None);
    };
    if config.log_level == LevelFilter::Off {
        return Ok(None);
    }

    let log_config = build_config(path, config.log_level)?;
    let handle = log4rs::init_config(log_config).context("install logger")?;
    Ok(Some(handle))
}
