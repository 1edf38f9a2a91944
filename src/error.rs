//! Error types for the crypto price tracker

use thiserror::Error;

/// Errors that can occur when fetching prices from a provider
///
/// Every variant is transient from the tracker's point of view: the cycle is
/// reported and retried after the normal interval.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider API error
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,
}

impl ProviderError {
    /// Creates an InvalidResponse error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Creates an ApiError error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }
}

/// Errors raised while appending to the CSV history
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Startup configuration errors; these stop the program before polling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The coin list resolved to zero identifiers
    #[error("No coins specified")]
    NoCoins,
}

/// Anything that can go wrong inside one poll cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    History(#[from] HistoryError),

    /// Writing the table or status lines failed
    #[error("Output error: {0}")]
    Render(#[from] std::io::Error),
}

impl CycleError {
    /// True for network/API failures, false for local failures
    pub fn is_transient(&self) -> bool {
        matches!(self, CycleError::Provider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_are_transient() {
        let err: CycleError = ProviderError::Timeout.into();
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "Request timeout");
    }

    #[test]
    fn test_local_errors_are_not_transient() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CycleError = HistoryError::from(io).into();
        assert!(!err.is_transient());
        assert!(err.to_string().contains("read-only"));
    }
}
