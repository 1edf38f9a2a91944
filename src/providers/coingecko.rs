//! CoinGecko price provider implementation

use crate::{
    constants::{COINGECKO_API_URL, COINGECKO_SIMPLE_PRICE_ENDPOINT, USER_AGENT, VS_CURRENCY},
    error::ProviderError,
    provider::PriceProvider,
    types::PriceData,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// CoinGecko API response for simple price queries
#[derive(Debug, Deserialize)]
struct CoinGeckoResponse {
    #[serde(flatten)]
    prices: HashMap<String, CoinGeckoPriceData>,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoPriceData {
    #[serde(default)]
    usd: Option<f64>,
}

/// CoinGecko price provider
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Creates a new CoinGecko provider whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::NetworkError)?;

        Ok(Self {
            client,
            base_url: COINGECKO_API_URL.to_string(),
        })
    }

    /// Points the provider at another deployment of the API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the simple price request; ids are percent-encoded by reqwest
    fn build_request(&self, ids: &[String]) -> RequestBuilder {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            COINGECKO_SIMPLE_PRICE_ENDPOINT
        );
        self.client
            .get(url)
            .query(&[("ids", ids.join(",")), ("vs_currencies", VS_CURRENCY.to_string())])
    }

    /// Parses the CoinGecko response into price data
    ///
    /// Entries without a USD price are dropped and show up as missing.
    fn parse_response(&self, response: CoinGeckoResponse) -> HashMap<String, PriceData> {
        response
            .prices
            .into_iter()
            .filter_map(|(id, data)| {
                let price = data.usd?;
                let quote = PriceData::new(id.clone(), price, self.provider_name());
                Some((id, quote))
            })
            .collect()
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    async fn fetch_prices(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, PriceData>, ProviderError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let request = self
            .build_request(ids)
            .build()
            .map_err(ProviderError::NetworkError)?;
        tracing::debug!(url = %request.url(), "Fetching prices from CoinGecko");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ProviderError::NetworkError)?;

        // Check for rate limiting
        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(ProviderError::api(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let response_text = response.text().await.map_err(ProviderError::NetworkError)?;

        let coingecko_response: CoinGeckoResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                ProviderError::invalid_response(format!(
                    "Failed to parse CoinGecko response: {}. Response: {}",
                    e, response_text
                ))
            })?;

        let prices = self.parse_response(coingecko_response);

        tracing::debug!(
            requested = ids.len(),
            received = prices.len(),
            "Fetched prices from CoinGecko"
        );

        Ok(prices)
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> CoinGeckoProvider {
        CoinGeckoProvider::new(Duration::from_secs(10)).unwrap()
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn query(provider: &CoinGeckoProvider, ids: &[String]) -> (String, Vec<(String, String)>) {
        let request = provider.build_request(ids).build().unwrap();
        let url = request.url();
        let pairs = url.query_pairs().into_owned().collect();
        (format!("{}://{}{}", url.scheme(), url.authority(), url.path()), pairs)
    }

    fn expected(ids: &str) -> Vec<(String, String)> {
        vec![
            ("ids".to_string(), ids.to_string()),
            ("vs_currencies".to_string(), "usd".to_string()),
        ]
    }

    #[test]
    fn test_build_request() {
        let (endpoint, pairs) = query(&provider(), &ids(&["bitcoin", "avalanche-2"]));
        assert_eq!(endpoint, "https://api.coingecko.com/api/v3/simple/price");
        assert_eq!(pairs, expected("bitcoin,avalanche-2"));

        let local = provider().with_base_url("http://localhost:8080/");
        let (endpoint, pairs) = query(&local, &ids(&["ethereum"]));
        assert_eq!(endpoint, "http://localhost:8080/simple/price");
        assert_eq!(pairs, expected("ethereum"));
    }

    #[test]
    fn test_raw_ids_are_encoded() {
        let (_, pairs) = query(&provider(), &ids(&["a&b", "c#d+e f"]));
        assert_eq!(pairs, expected("a&b,c#d+e f"));
    }

    #[test]
    fn test_parse_response_skips_entries_without_usd() {
        let body = r#"{"bitcoin":{"usd":50000.5},"ethereum":{},"dogecoin":{"usd":0.08}}"#;
        let response: CoinGeckoResponse = serde_json::from_str(body).unwrap();

        let prices = provider().parse_response(response);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices["bitcoin"].price_usd, 50000.5);
        assert_eq!(prices["dogecoin"].price_usd, 0.08);
        assert_eq!(prices["dogecoin"].source, "coingecko");
        assert!(!prices.contains_key("ethereum"));
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        assert!(serde_json::from_str::<CoinGeckoResponse>(r#"{"bitcoin":{"usd":"high"}}"#).is_err());
        assert!(serde_json::from_str::<CoinGeckoResponse>("[1,2,3]").is_err());
    }

    #[tokio::test]
    async fn test_empty_request_skips_network() {
        let prices = provider().fetch_prices(&[]).await.unwrap();
        assert!(prices.is_empty());
    }
}
