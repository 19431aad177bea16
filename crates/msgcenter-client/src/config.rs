//! Client configuration.

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum spacing between list fetches.
pub const DEFAULT_FETCH_COOLDOWN: Duration = Duration::from_millis(100);

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Fetches issued closer together than this are dropped.
    pub fetch_cooldown: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Configuration for the given base URL with default timings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            timeout: DEFAULT_TIMEOUT,
            fetch_cooldown: DEFAULT_FETCH_COOLDOWN,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for `ClientConfig`.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    fetch_cooldown: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the fetch cooldown.
    #[must_use]
    pub const fn fetch_cooldown(mut self, cooldown: Duration) -> Self {
        self.fetch_cooldown = Some(cooldown);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            base_url: normalize(self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            fetch_cooldown: self.fetch_cooldown.unwrap_or(DEFAULT_FETCH_COOLDOWN),
        }
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.fetch_cooldown, Duration::from_millis(100));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9000/api/")
            .timeout(Duration::from_secs(2))
            .fetch_cooldown(Duration::ZERO)
            .build();

        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.fetch_cooldown, Duration::ZERO);
    }

    #[test]
    fn test_builder_defaults_match_new() {
        assert_eq!(ClientConfig::builder().build(), ClientConfig::default());
    }
}
