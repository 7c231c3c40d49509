use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};
use url::Url;

use crate::app::Result;
use crate::fetcher::{FetchOutcome, Fetcher, FetcherConfig};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Problem building the URL {:?}: {}", url, e);
                return FetchOutcome::Skipped;
            }
        };

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Problem making the HTTP request to {}: {}", url, e);
                return FetchOutcome::Transport(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!("Error response code: {} from {}", status.as_u16(), url);
            return FetchOutcome::Status(status.as_u16());
        }

        match response.bytes().await {
            Ok(bytes) => {
                debug!("Fetched {} bytes from {}", bytes.len(), url);
                FetchOutcome::Body(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(e) => {
                error!("Problem retrieving the story JSON results from {}: {}", url, e);
                FetchOutcome::Transport(e.to_string())
            }
        }
    }
}
