use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing settings for story fetching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Connection establishment timeout in milliseconds (default: 15000)
    pub connect_timeout_ms: u64,

    /// Timeout for each read of the response in milliseconds (default: 10000)
    pub read_timeout_ms: u64,

    /// Pause before each fetch begins in milliseconds (default: 2000, 0 disables)
    pub fetch_delay_ms: u64,

    /// User agent string to use
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 15_000,
            read_timeout_ms: 10_000,
            fetch_delay_ms: 2_000,
            user_agent: format!("newsdesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetcherConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = FetcherConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_millis(15_000));
        assert_eq!(config.read_timeout(), Duration::from_millis(10_000));
        assert_eq!(config.fetch_delay(), Duration::from_secs(2));
        assert!(config.user_agent.starts_with("newsdesk/"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: FetcherConfig = toml::from_str("fetch_delay_ms = 0").unwrap();
        assert_eq!(config.fetch_delay(), Duration::ZERO);
        assert_eq!(config.connect_timeout_ms, 15_000);
    }
}
