//! Command line configuration

use crate::constants::{
    DEFAULT_COINS, DEFAULT_CSV_PATH, DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, MIN_WAIT_SECS,
};
use clap::{Parser, ValueHint};
use std::time::Duration;

/// Terminal crypto price tracker with CSV logging and percent-change.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Comma-separated coin ids or symbols (e.g. BTC,ETH or bitcoin,ethereum)
    #[arg(short, long, env = "TRACKER_COINS", default_value = DEFAULT_COINS)]
    pub coins: String,

    /// Refresh interval in seconds (minimum 1)
    #[arg(
        short,
        long,
        env = "TRACKER_INTERVAL",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_INTERVAL_SECS
    )]
    pub interval: i64,

    /// HTTP request timeout in seconds (minimum 1)
    #[arg(
        short,
        long,
        env = "TRACKER_TIMEOUT",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout: i64,

    /// CSV file to append prices to (set empty to disable)
    #[arg(
        short = 'o',
        long,
        env = "TRACKER_CSV",
        value_hint = ValueHint::FilePath,
        default_value = DEFAULT_CSV_PATH
    )]
    pub csv: String,

    /// Disable CSV logging (overrides --csv)
    #[arg(long)]
    pub no_csv: bool,

    /// Fetch once and exit
    #[arg(long)]
    pub once: bool,

    /// Disable colorized output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// CSV path to log to; empty when logging is disabled
    pub fn csv_path(&self) -> &str {
        if self.no_csv {
            ""
        } else {
            &self.csv
        }
    }

    pub fn color(&self) -> bool {
        !self.no_color
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            interval: clamp_secs(self.interval),
            timeout: clamp_secs(self.timeout),
            run_once: self.once,
        }
    }
}

/// Settings the poll loop runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Wait between cycles, also used before retrying a failed cycle
    pub interval: Duration,
    /// Upper bound on a single fetch
    pub timeout: Duration,
    /// Stop after the first successful cycle
    pub run_once: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval: clamp_secs(DEFAULT_INTERVAL_SECS),
            timeout: clamp_secs(DEFAULT_TIMEOUT_SECS),
            run_once: false,
        }
    }
}

fn clamp_secs(secs: i64) -> Duration {
    Duration::from_secs(secs.max(MIN_WAIT_SECS as i64) as u64)
}
