//! Types for the crypto price tracker

use std::collections::HashMap;

/// Ticker symbols that resolve to a CoinGecko id without a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    /// Bitcoin
    BTC,
    /// Ethereum
    ETH,
    /// Litecoin
    LTC,
    /// Dogecoin
    DOGE,
    /// Solana
    SOL,
    /// Cardano
    ADA,
    /// XRP
    XRP,
    /// Bitcoin Cash
    BCH,
    /// Polkadot
    DOT,
    /// Chainlink
    LINK,
    /// BNB
    BNB,
    /// Tether
    USDT,
    /// USD Coin
    USDC,
    /// Polygon
    MATIC,
    /// Avalanche
    AVAX,
    /// Shiba Inu
    SHIB,
    /// Tron
    TRX,
    /// Uniswap
    UNI,
}

impl Asset {
    /// Get the asset symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::BTC => "BTC",
            Asset::ETH => "ETH",
            Asset::LTC => "LTC",
            Asset::DOGE => "DOGE",
            Asset::SOL => "SOL",
            Asset::ADA => "ADA",
            Asset::XRP => "XRP",
            Asset::BCH => "BCH",
            Asset::DOT => "DOT",
            Asset::LINK => "LINK",
            Asset::BNB => "BNB",
            Asset::USDT => "USDT",
            Asset::USDC => "USDC",
            Asset::MATIC => "MATIC",
            Asset::AVAX => "AVAX",
            Asset::SHIB => "SHIB",
            Asset::TRX => "TRX",
            Asset::UNI => "UNI",
        }
    }

    /// Get the CoinGecko ID for this asset
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            Asset::BTC => "bitcoin",
            Asset::ETH => "ethereum",
            Asset::LTC => "litecoin",
            Asset::DOGE => "dogecoin",
            Asset::SOL => "solana",
            Asset::ADA => "cardano",
            Asset::XRP => "ripple",
            Asset::BCH => "bitcoin-cash",
            Asset::DOT => "polkadot",
            Asset::LINK => "chainlink",
            Asset::BNB => "binancecoin",
            Asset::USDT => "tether",
            Asset::USDC => "usd-coin",
            Asset::MATIC => "matic-network",
            Asset::AVAX => "avalanche-2",
            Asset::SHIB => "shiba-inu",
            Asset::TRX => "tron",
            Asset::UNI => "uniswap",
        }
    }

    /// Get all supported assets
    pub fn all() -> &'static [Asset] {
        &[
            Asset::BTC,
            Asset::ETH,
            Asset::LTC,
            Asset::DOGE,
            Asset::SOL,
            Asset::ADA,
            Asset::XRP,
            Asset::BCH,
            Asset::DOT,
            Asset::LINK,
            Asset::BNB,
            Asset::USDT,
            Asset::USDC,
            Asset::MATIC,
            Asset::AVAX,
            Asset::SHIB,
            Asset::TRX,
            Asset::UNI,
        ]
    }

    /// Looks up a symbol, ignoring case
    pub fn from_symbol(symbol: &str) -> Option<Asset> {
        let upper = symbol.to_uppercase();
        Self::all().iter().copied().find(|a| a.symbol() == upper)
    }

    /// True if `id` is the CoinGecko id of a known asset
    pub fn is_known_id(id: &str) -> bool {
        Self::all().iter().any(|a| a.coingecko_id() == id)
    }
}

/// Price data for one identifier, as returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct PriceData {
    /// CoinGecko identifier
    pub id: String,

    /// Price in USD
    pub price_usd: f64,

    /// Data source
    pub source: String,
}

impl PriceData {
    /// Create new price data
    pub fn new(id: impl Into<String>, price_usd: f64, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            price_usd,
            source: source.into(),
        }
    }
}

/// One poll's prices for every tracked identifier
///
/// `None` means the provider had no price for that identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    prices: HashMap<String, Option<f64>>,
}

impl Snapshot {
    /// Builds a snapshot covering `ids` from a provider response
    ///
    /// Identifiers missing from `quotes` are recorded as `None`; quotes for
    /// identifiers that were not asked for are ignored.
    pub fn from_quotes(ids: &[String], quotes: &HashMap<String, PriceData>) -> Self {
        let prices = ids
            .iter()
            .map(|id| (id.clone(), quotes.get(id).map(|q| q.price_usd)))
            .collect();
        Self { prices }
    }

    /// Price for `id`, if the provider returned one
    pub fn price(&self, id: &str) -> Option<f64> {
        self.prices.get(id).copied().flatten()
    }

    /// Iterates over identifiers that have a defined price
    pub fn defined(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices
            .iter()
            .filter_map(|(id, price)| price.map(|p| (id.as_str(), p)))
    }
}

impl FromIterator<(String, Option<f64>)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup_ignores_case() {
        assert_eq!(Asset::from_symbol("btc"), Some(Asset::BTC));
        assert_eq!(Asset::from_symbol("Doge"), Some(Asset::DOGE));
        assert_eq!(Asset::from_symbol("bitcoin"), None);
    }

    #[test]
    fn test_every_asset_has_a_distinct_id() {
        let mut ids: Vec<_> = Asset::all().iter().map(|a| a.coingecko_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Asset::all().len());
        assert!(Asset::is_known_id("avalanche-2"));
        assert!(!Asset::is_known_id("AVAX"));
    }

    #[test]
    fn test_snapshot_marks_absent_quotes_missing() {
        let ids = vec!["bitcoin".to_string(), "ethereum".to_string()];
        let mut quotes = HashMap::new();
        quotes.insert("bitcoin".to_string(), PriceData::new("bitcoin", 50000.0, "mock"));
        quotes.insert("dogecoin".to_string(), PriceData::new("dogecoin", 0.1, "mock"));

        let snapshot = Snapshot::from_quotes(&ids, &quotes);

        assert_eq!(snapshot.price("bitcoin"), Some(50000.0));
        assert_eq!(snapshot.price("ethereum"), None);
        assert_eq!(snapshot.price("dogecoin"), None);
        assert_eq!(snapshot.defined().count(), 1);
    }
}
