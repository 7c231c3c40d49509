use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tracing::debug;

use crate::app::Result;
use crate::query::ApiConfig;

/// Reports whether a network route is available before any request is made.
#[async_trait]
pub trait Connectivity {
    async fn is_connected(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Probe timeout in milliseconds (default: 3000)
    pub timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self { timeout_ms: 3_000 }
    }
}

impl ConnectivityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Probes connectivity by opening a TCP connection to the API host.
pub struct TcpConnectivity {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpConnectivity {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn for_api(api: &ApiConfig, config: &ConnectivityConfig) -> Result<Self> {
        let (host, port) = api.host_and_port()?;
        Ok(Self::new(host, port, config.timeout()))
    }
}

#[async_trait]
impl Connectivity for TcpConnectivity {
    async fn is_connected(&self) -> bool {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                debug!("Connectivity probe to {}:{} failed: {}", self.host, self.port, e);
                false
            }
            Err(_) => {
                debug!("Connectivity probe to {}:{} timed out", self.host, self.port);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listening_host_is_connected() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let probe = TcpConnectivity::new("127.0.0.1", port, Duration::from_secs(1));
        assert!(probe.is_connected().await);
    }

    #[tokio::test]
    async fn test_closed_port_is_disconnected() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = TcpConnectivity::new("127.0.0.1", port, Duration::from_secs(1));
        assert!(!probe.is_connected().await);
    }

    #[test]
    fn test_for_api_uses_endpoint_host() {
        let probe = TcpConnectivity::for_api(&ApiConfig::default(), &ConnectivityConfig::default())
            .unwrap();
        assert_eq!(probe.host, "content.guardianapis.com");
        assert_eq!(probe.port, 80);
        assert_eq!(probe.timeout, Duration::from_secs(3));
    }
}
