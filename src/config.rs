//! Runner configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MINI_TETRIS_SEED` | clock-derived | RNG seed for pieces and spawn columns |
//! | `MINI_TETRIS_GRAVITY_MS` | 1000 | Gravity period |
//! | `MINI_TETRIS_CLEAR_DELAY_MS` | 500 | How long full rows flash before removal |
//! | `MINI_TETRIS_LOG_PATH` | unset | Log file; logging is off when unset |
//! | `MINI_TETRIS_LOG_LEVEL` | `info` | `off`, `error`, `warn`, `info`, `debug`, `trace` |
//!
//! Values that fail to parse fall back to their default and are recorded in
//! [`AppConfig::warnings`] so they can be logged once the logger is up.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

use crate::core::Timing;
use crate::types::{GRAVITY_MS, LINE_CLEAR_DELAY_MS};

pub const ENV_SEED: &str = "MINI_TETRIS_SEED";
pub const ENV_GRAVITY_MS: &str = "MINI_TETRIS_GRAVITY_MS";
pub const ENV_CLEAR_DELAY_MS: &str = "MINI_TETRIS_CLEAR_DELAY_MS";
pub const ENV_LOG_PATH: &str = "MINI_TETRIS_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "MINI_TETRIS_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed: u32,
    pub timing: Timing,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            timing: Timing::default(),
            log_path: None,
            log_level: LevelFilter::Info,
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (used by tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = parse_or(value(ENV_SEED), ENV_SEED, &mut warnings).unwrap_or_else(clock_seed);

        let gravity_ms = parse_or(value(ENV_GRAVITY_MS), ENV_GRAVITY_MS, &mut warnings)
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(GRAVITY_MS);
        let clear_delay_ms =
            parse_or(value(ENV_CLEAR_DELAY_MS), ENV_CLEAR_DELAY_MS, &mut warnings)
                .unwrap_or(LINE_CLEAR_DELAY_MS);

        let log_level = parse_or(value(ENV_LOG_LEVEL), ENV_LOG_LEVEL, &mut warnings)
            .unwrap_or(LevelFilter::Info);
        let log_path = value(ENV_LOG_PATH).map(PathBuf::from);

        Self {
            seed,
            timing: Timing {
                gravity_ms,
                clear_delay_ms,
            },
            log_path,
            log_level,
            warnings,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, warnings: &mut Vec<String>) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warnings.push(format!("ignoring invalid {}={:?}", key, raw));
            None
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
