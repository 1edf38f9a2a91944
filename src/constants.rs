//! Constants for the crypto price tracker
//!
//! Defaults for every command line flag live here, next to the CoinGecko
//! endpoint settings. Runtime overrides come from `config::Cli`.

/// Coins tracked when `--coins` is not given
pub const DEFAULT_COINS: &str = "bitcoin,ethereum,dogecoin,solana,litecoin";

/// How often to poll the provider (in seconds)
pub const DEFAULT_INTERVAL_SECS: i64 = 30;

/// HTTP request timeout when fetching prices (in seconds)
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;

/// Shortest allowed interval or timeout (in seconds)
pub const MIN_WAIT_SECS: u64 = 1;

/// CSV file prices are appended to by default
pub const DEFAULT_CSV_PATH: &str = "crypto_prices.csv";

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API endpoint for simple price queries
pub const COINGECKO_SIMPLE_PRICE_ENDPOINT: &str = "/simple/price";

/// Quote currency requested from CoinGecko
pub const VS_CURRENCY: &str = "usd";

/// User agent for HTTP requests
pub const USER_AGENT: &str = concat!("crypto-price-tracker/", env!("CARGO_PKG_VERSION"));

/// Timestamp layout shared by the status line and the CSV history
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the table separator line
pub const TABLE_WIDTH: usize = 62;
