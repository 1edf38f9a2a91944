//! Provider abstraction for fetching prices from external APIs

use crate::{error::ProviderError, types::PriceData};
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for price providers
///
/// The tracker calls `fetch_prices` once per cycle with every tracked
/// identifier. Identifiers the provider has no price for are simply left out
/// of the returned map; only a failed request is an error.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches prices for multiple identifiers in a single request
    ///
    /// # Arguments
    /// * `ids` - Deduplicated identifiers, in display order
    ///
    /// # Returns
    /// HashMap of identifier to price data, or an error if the fetch fails
    async fn fetch_prices(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, PriceData>, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}
