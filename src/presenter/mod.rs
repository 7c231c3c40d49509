//! Glue between the loader and whatever renders the story list.
//!
//! [`NewsPresenter`] checks connectivity, builds the request URL from the
//! current [`QueryParams`] and starts the [`StoryLoader`]. Views implement
//! [`StoryView`]; [`StoryList`] is the list model shared by the CLI and TUI.

pub mod connectivity;
pub mod list;

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::Result;
use crate::domain::{QueryParams, Story};
use crate::loader::{LoadTicket, StoryLoader};
use crate::query::{build_request_url, ApiConfig};

pub use connectivity::{Connectivity, TcpConnectivity};
pub use list::{EmptyState, StoryList};

/// Receives the results of the story pipeline.
pub trait StoryView {
    /// Called once per completed load; `stories` may be empty.
    fn on_load_finished(&mut self, stories: &[Story]);

    /// The previously delivered stories are no longer valid.
    fn on_reset(&mut self);

    /// No network was available, so nothing was requested.
    fn on_no_connection(&mut self);

    /// A load was requested. Called before the connectivity check, so it
    /// may be followed by `on_no_connection`.
    fn on_load_started(&mut self) {}
}

pub struct NewsPresenter {
    api: ApiConfig,
    loader: StoryLoader,
    connectivity: Arc<dyn Connectivity + Send + Sync>,
}

impl NewsPresenter {
    pub fn new(
        api: ApiConfig,
        loader: StoryLoader,
        connectivity: Arc<dyn Connectivity + Send + Sync>,
    ) -> Self {
        Self {
            api,
            loader,
            connectivity,
        }
    }

    pub fn loader(&self) -> &StoryLoader {
        &self.loader
    }

    /// Start a load for `params` without waiting for it.
    ///
    /// Returns `None` after telling the view there is no connection.
    pub async fn begin<V: StoryView + ?Sized>(
        &self,
        params: &QueryParams,
        view: &mut V,
    ) -> Result<Option<LoadTicket>> {
        self.begin_with(params, view, false).await
    }

    /// Like [`NewsPresenter::begin`] but bypasses a delivered result for
    /// the same request.
    pub async fn refresh<V: StoryView + ?Sized>(
        &self,
        params: &QueryParams,
        view: &mut V,
    ) -> Result<Option<LoadTicket>> {
        self.begin_with(params, view, true).await
    }

    /// Start a load and deliver its result to `view`.
    pub async fn load<V: StoryView + ?Sized>(&self, params: &QueryParams, view: &mut V) -> Result<()> {
        if let Some(ticket) = self.begin(params, view).await? {
            ticket.wait().await.dispatch(view);
        }
        Ok(())
    }

    /// Tear down the pipeline and clear the view.
    pub fn teardown<V: StoryView + ?Sized>(&self, view: &mut V) {
        self.loader.reset();
        view.on_reset();
    }

    pub fn request_url(&self, params: &QueryParams) -> Result<String> {
        Ok(build_request_url(&self.api, params)?.to_string())
    }

    async fn begin_with<V: StoryView + ?Sized>(
        &self,
        params: &QueryParams,
        view: &mut V,
        force: bool,
    ) -> Result<Option<LoadTicket>> {
        view.on_load_started();
        if !self.connectivity.is_connected().await {
            warn!("No network connection; not requesting stories");
            view.on_no_connection();
            return Ok(None);
        }

        let url = self.request_url(params)?;
        info!(
            "Requesting section {:?} ordered by {}",
            params.section, params.order_by
        );

        let ticket = if force {
            self.loader.restart(url)
        } else {
            self.loader.start(url)
        };
        Ok(Some(ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderBy;
    use crate::fetcher::testing::MockFetcher;
    use crate::fetcher::FetchOutcome;
    use crate::loader::LoaderState;
    use crate::parser::StoryParser;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedConnectivity(bool);

    #[async_trait]
    impl Connectivity for FixedConnectivity {
        async fn is_connected(&self) -> bool {
            self.0
        }
    }

    fn presenter(fetcher: Arc<MockFetcher>, connected: bool) -> NewsPresenter {
        let loader = StoryLoader::new(fetcher, StoryParser::new(), Duration::ZERO);
        NewsPresenter::new(
            ApiConfig::default(),
            loader,
            Arc::new(FixedConnectivity(connected)),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_single_story() {
        let fetcher = Arc::new(MockFetcher::new(
            r#"{"response":{"results":[{"sectionName":"Technology","webTitle":"Story A","webUrl":"http://x/a"}]}}"#,
        ));
        let presenter = presenter(fetcher.clone(), true);
        let mut list = StoryList::new();

        let params = QueryParams::new("technology", OrderBy::Newest);
        presenter.load(&params, &mut list).await.unwrap();

        assert_eq!(list.stories(), &[Story::new("Technology", "Story A", "http://x/a")]);
        assert_eq!(list.empty_state(), None);

        let urls = fetcher.urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].contains("sectionName=technology"));
        assert!(urls[0].contains("order-by=newest"));
    }

    #[tokio::test]
    async fn test_end_to_end_empty_results() {
        let fetcher = Arc::new(MockFetcher::new(r#"{"response":{"results":[]}}"#));
        let presenter = presenter(fetcher, true);
        let mut list = StoryList::new();

        presenter
            .load(&QueryParams::default(), &mut list)
            .await
            .unwrap();

        assert!(list.stories().is_empty());
        assert_eq!(list.empty_state(), Some(EmptyState::NoStories));
        assert_eq!(list.message(), Some("No news found."));
    }

    #[tokio::test]
    async fn test_end_to_end_disconnected() {
        let fetcher = Arc::new(MockFetcher::new(r#"{"response":{"results":[]}}"#));
        let presenter = presenter(fetcher.clone(), false);
        let mut list = StoryList::new();

        let ticket = presenter
            .begin(&QueryParams::default(), &mut list)
            .await
            .unwrap();

        assert!(ticket.is_none());
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(presenter.loader().state(), LoaderState::Idle);
        assert_eq!(list.empty_state(), Some(EmptyState::NoConnection));
        assert_eq!(list.message(), Some("No internet connection."));
    }

    #[tokio::test]
    async fn test_end_to_end_transport_failure_shows_no_stories() {
        let fetcher = Arc::new(MockFetcher::answering(FetchOutcome::Transport(
            "connection reset".into(),
        )));
        let presenter = presenter(fetcher.clone(), true);
        let mut list = StoryList::new();

        presenter
            .load(&QueryParams::default(), &mut list)
            .await
            .unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert!(list.stories().is_empty());
        assert_eq!(list.empty_state(), Some(EmptyState::NoStories));
        assert_eq!(list.message(), Some("No news found."));
    }

    #[derive(Default)]
    struct RecordingView(Vec<&'static str>);

    impl StoryView for RecordingView {
        fn on_load_finished(&mut self, _stories: &[Story]) {
            self.0.push("finished");
        }

        fn on_reset(&mut self) {
            self.0.push("reset");
        }

        fn on_no_connection(&mut self) {
            self.0.push("no_connection");
        }

        fn on_load_started(&mut self) {
            self.0.push("started");
        }
    }

    #[tokio::test]
    async fn test_load_started_precedes_connectivity_result() {
        let fetcher = Arc::new(MockFetcher::new(r#"{"response":{"results":[]}}"#));

        let mut offline = RecordingView::default();
        presenter(fetcher.clone(), false)
            .load(&QueryParams::default(), &mut offline)
            .await
            .unwrap();
        assert_eq!(offline.0, vec!["started", "no_connection"]);

        let mut online = RecordingView::default();
        presenter(fetcher, true)
            .load(&QueryParams::default(), &mut online)
            .await
            .unwrap();
        assert_eq!(online.0, vec!["started", "finished"]);
    }

    #[tokio::test]
    async fn test_reload_after_configuration_change_does_not_refetch() {
        let fetcher = Arc::new(MockFetcher::new(
            r#"{"response":{"results":[{"sectionName":"Sport","webTitle":"Story B","webUrl":"http://x/b"}]}}"#,
        ));
        let presenter = presenter(fetcher.clone(), true);
        let params = QueryParams::default();

        let mut first = StoryList::new();
        presenter.load(&params, &mut first).await.unwrap();
        let mut second = StoryList::new();
        presenter.load(&params, &mut second).await.unwrap();
        presenter.load(&params, &mut second).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first.stories(), second.stories());
        assert_eq!(second.stories().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_and_preference_change_refetch() {
        let fetcher = Arc::new(MockFetcher::new(r#"{"response":{"results":[]}}"#));
        let presenter = presenter(fetcher.clone(), true);
        let mut list = StoryList::new();
        let mut params = QueryParams::default();

        presenter.load(&params, &mut list).await.unwrap();
        let ticket = presenter.refresh(&params, &mut list).await.unwrap().unwrap();
        ticket.wait().await.dispatch(&mut list);
        assert_eq!(fetcher.calls(), 2);

        params.order_by = OrderBy::Oldest;
        presenter.load(&params, &mut list).await.unwrap();
        assert_eq!(fetcher.calls(), 3);
        assert!(fetcher.urls()[2].contains("order-by=oldest"));
    }

    #[tokio::test]
    async fn test_teardown_clears_view() {
        let fetcher = Arc::new(MockFetcher::gated(r#"{"response":{"results":[]}}"#));
        let presenter = presenter(fetcher, true);
        let mut list = StoryList::new();

        let ticket = presenter
            .begin(&QueryParams::default(), &mut list)
            .await
            .unwrap()
            .unwrap();
        presenter.teardown(&mut list);

        assert_eq!(ticket.wait().await, crate::loader::Delivery::Reset);
        assert_eq!(presenter.loader().state(), LoaderState::Reset);
        assert!(list.stories().is_empty());
        assert!(!list.is_loading());
    }
}
