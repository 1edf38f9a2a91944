//! Memory of the previous successful poll

use crate::types::Snapshot;
use std::collections::HashMap;

/// Prices from the last successful cycle
///
/// Only defined prices are kept, so an N/A in one cycle never becomes the
/// baseline for the next. The tracker owns one of these and replaces it
/// wholesale after every successful cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceMemory {
    prices: HashMap<String, f64>,
}

impl PriceMemory {
    /// Creates an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the memory carried into the next cycle from `snapshot`
    pub fn remember(snapshot: &Snapshot) -> Self {
        let prices = snapshot
            .defined()
            .map(|(id, price)| (id.to_string(), price))
            .collect();
        Self { prices }
    }

    /// Previous price for `id`
    pub fn price(&self, id: &str) -> Option<f64> {
        self.prices.get(id).copied()
    }

    /// Checks if a previous price exists for `id`
    pub fn has_price(&self, id: &str) -> bool {
        self.prices.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceMemory {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(id, p)| (id.into(), p)).collect(),
        }
    }
}
