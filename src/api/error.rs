//! Error type for the remote indicator and catalog APIs.
//!
//! Remote failures are transient: they are surfaced to the caller for a
//! notification, never retried automatically, and never touch the
//! in-memory draft.

use thiserror::Error;

/// Errors that can occur when talking to the remote APIs
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 401 Unauthorized - token invalid or expired
    #[error("{endpoint}: Unauthorized (401)")]
    Unauthorized { endpoint: String },

    /// 429 Rate Limited
    #[error("{endpoint}: Rate limited{}", .retry_after_secs.map(|s| format!(" - retry after {s}s")).unwrap_or_default())]
    RateLimited {
        endpoint: String,
        retry_after_secs: Option<u64>,
    },

    /// Network or timeout error
    #[error("{endpoint}: Network error - {message}")]
    Network { endpoint: String, message: String },

    /// Other HTTP errors
    #[error("{endpoint}: HTTP {status} - {message}")]
    Http {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("{endpoint}: Unreadable response - {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn unauthorized(endpoint: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            endpoint: endpoint.into(),
        }
    }

    pub fn rate_limited(endpoint: impl Into<String>, retry_after: Option<u64>) -> Self {
        ApiError::RateLimited {
            endpoint: endpoint.into(),
            retry_after_secs: retry_after,
        }
    }

    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn http(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Check if this is a rate limiting error
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    /// Get retry-after seconds if rate limited
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ApiError::RateLimited {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }

    /// Get the endpoint this error came from
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Unauthorized { endpoint }
            | ApiError::RateLimited { endpoint, .. }
            | ApiError::Network { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_error() {
        assert!(ApiError::unauthorized("indicators").is_auth_error());
        assert!(!ApiError::rate_limited("indicators", None).is_auth_error());
        assert!(!ApiError::network("indicators", "timeout").is_auth_error());
    }

    #[test]
    fn test_retry_after() {
        assert_eq!(
            ApiError::rate_limited("catalog", Some(30)).retry_after(),
            Some(30)
        );
        assert_eq!(ApiError::rate_limited("catalog", None).retry_after(), None);
        assert_eq!(ApiError::http("catalog", 500, "boom").retry_after(), None);
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(ApiError::network("catalog", "refused").endpoint(), "catalog");
        assert_eq!(ApiError::unauthorized("indicators").endpoint(), "indicators");
    }

    #[test]
    fn test_display() {
        let err = ApiError::rate_limited("indicators", Some(30));
        assert_eq!(err.to_string(), "indicators: Rate limited - retry after 30s");

        let err = ApiError::http("catalog", 502, "bad gateway");
        assert_eq!(err.to_string(), "catalog: HTTP 502 - bad gateway");
    }
}
