//! Public configuration for the Huoshan HTTP client.

use std::time::Duration;

/// Configuration for [`HuoshanClient`](crate::HuoshanClient).
///
/// # Example
///
/// ```
/// use huoshan_client::HuoshanClientConfig;
/// use std::time::Duration;
///
/// let config = HuoshanClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct HuoshanClientConfig {
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for HuoshanClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("huoshan-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl HuoshanClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds; completions can be slow.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HuoshanClientConfig::new();
        assert!(config.user_agent.starts_with("huoshan-client/"));
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_builder_pattern() {
        let config = HuoshanClientConfig::new()
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
