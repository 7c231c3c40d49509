use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::QueryParams;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::loader::StoryLoader;
use crate::parser::StoryParser;
use crate::presenter::{Connectivity, NewsPresenter, TcpConnectivity};

pub struct AppContext {
    pub config: Config,
    pub presenter: NewsPresenter,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetcher)?);
        let connectivity: Arc<dyn Connectivity + Send + Sync> = Arc::new(
            TcpConnectivity::for_api(&config.api, &config.connectivity)?,
        );

        Ok(Self::with_components(config, fetcher, connectivity))
    }

    pub fn with_components(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        connectivity: Arc<dyn Connectivity + Send + Sync>,
    ) -> Self {
        let loader = StoryLoader::new(fetcher, StoryParser::new(), config.fetcher.fetch_delay());
        let presenter = NewsPresenter::new(config.api.clone(), loader, connectivity);

        Self { config, presenter }
    }

    /// Preferences as configured, read at load start.
    pub fn params(&self) -> QueryParams {
        self.config.preferences.clone()
    }
}
