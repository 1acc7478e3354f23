//! Runtime configuration for the gateway and the manager. Values come from CLI
//! arguments with environment fallbacks; blank values fall back to defaults.

use crate::error::GatewayError;
use std::time::Duration;
use url::Url;

/// Public fixture backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
/// Default request timeout applied to every gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Parses and validates the base URL.
    ///
    /// # Errors
    /// Returns `GatewayError::Config` if the URL is malformed or not http(s).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let raw = normalize_value(base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw)
            .map_err(|err| GatewayError::Config(format!("invalid base URL {raw}: {err}")))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(GatewayError::Config(format!(
                    "unsupported scheme {scheme} in base URL {raw}"
                )))
            }
        }

        if timeout.is_zero() {
            return Err(GatewayError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self { base_url, timeout })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerConfig {
    /// How long an error message stays visible. `None` keeps it until the next
    /// successful operation.
    pub error_ttl: Option<Duration>,
}

/// Trims a value and rejects it when empty.
#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://api.example.com "),
            Some("https://api.example.com".to_string())
        );
    }

    #[test]
    fn blank_base_url_uses_default() {
        let config = GatewayConfig::new("  ", DEFAULT_TIMEOUT).map(|c| c.base_url.to_string());
        assert_eq!(
            config,
            Ok("https://jsonplaceholder.typicode.com/".to_string())
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let result = GatewayConfig::new("ftp://example.com", DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn rejects_malformed_url_and_zero_timeout() {
        assert!(GatewayConfig::new("not a url", DEFAULT_TIMEOUT).is_err());
        assert!(GatewayConfig::new("http://localhost:3000", Duration::ZERO).is_err());
    }
}
