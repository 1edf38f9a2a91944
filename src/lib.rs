//! # Crypto Price Tracker
//!
//! Polls CoinGecko on a fixed interval, prints a colorized table of prices
//! with the percent change since the previous poll, and appends every poll to
//! a CSV history file.
//!
//! ## Usage
//!
//! ```no_run
//! use crypto_price_tracker::{
//!     providers::CoinGeckoProvider, resolve_coins, HistoryLog, Presenter, Tracker,
//!     TrackerConfig,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolution = resolve_coins("BTC,ETH,solana")?;
//! let config = TrackerConfig::default();
//! let ids = resolution.identifiers().to_vec();
//!
//! let tracker = Tracker::new(
//!     Arc::new(CoinGeckoProvider::new(config.timeout)?),
//!     Presenter::stdout(true),
//!     HistoryLog::from_path("prices.csv", &ids),
//!     ids,
//!     config,
//! );
//! tracker.run(async { tokio::signal::ctrl_c().await.unwrap_or(()) }).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! resolve_coins (symbols -> CoinGecko ids)
//!     ↓
//! Tracker (one cycle every interval)
//!     ↓
//! PriceProvider (CoinGecko) -> Snapshot
//!     ↓
//! delta::compare(Snapshot, PriceMemory) -> rows
//!     ↓
//! Presenter (table) + HistoryLog (CSV row)
//! ```

pub mod config;
pub mod constants;
pub mod delta;
pub mod error;
pub mod history;
pub mod presenter;
pub mod provider;
pub mod providers;
pub mod resolver;
pub mod store;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use config::{Cli, TrackerConfig};
pub use delta::{PriceRow, Trend};
pub use error::{ConfigError, CycleError, HistoryError, ProviderError};
pub use history::HistoryLog;
pub use presenter::Presenter;
pub use provider::PriceProvider;
pub use resolver::{resolve_coins, Resolution};
pub use store::PriceMemory;
pub use tracker::{StopReason, Tracker};
pub use types::{Asset, PriceData, Snapshot};
