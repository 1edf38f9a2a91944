//! Resolves user supplied coin tokens to CoinGecko identifiers

use crate::{error::ConfigError, types::Asset};
use std::collections::HashSet;

/// Result of resolving a `--coins` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    identifiers: Vec<String>,
    mapping: Vec<(String, String)>,
}

impl Resolution {
    /// Unique identifiers in first-seen order
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Every distinct original token with the identifier it resolved to
    pub fn mapping(&self) -> &[(String, String)] {
        &self.mapping
    }

    /// Identifiers that did not match a known symbol or a known asset id
    ///
    /// These are forwarded to the provider as-is and will show up as N/A
    /// every cycle if the id does not exist.
    pub fn unrecognized(&self) -> Vec<&str> {
        self.identifiers
            .iter()
            .filter(|id| !Asset::is_known_id(id))
            .map(String::as_str)
            .collect()
    }
}

/// Resolves a comma separated list of symbols or CoinGecko ids
///
/// Known symbols (case-insensitive) map through [`Asset`]; anything else is
/// lowercased and assumed to already be a CoinGecko id.
pub fn resolve_coins(raw: &str) -> Result<Resolution, ConfigError> {
    let mut identifiers = Vec::new();
    let mut mapping: Vec<(String, String)> = Vec::new();
    let mut seen = HashSet::new();

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let id = match Asset::from_symbol(token) {
            Some(asset) => asset.coingecko_id().to_string(),
            None => token.to_lowercase(),
        };

        if seen.insert(id.clone()) {
            identifiers.push(id.clone());
        }
        if !mapping.iter().any(|(t, _)| t == token) {
            mapping.push((token.to_string(), id));
        }
    }

    if identifiers.is_empty() {
        return Err(ConfigError::NoCoins);
    }

    tracing::debug!(count = identifiers.len(), "Resolved coin identifiers");

    Ok(Resolution {
        identifiers,
        mapping,
    })
}
