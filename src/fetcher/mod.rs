pub mod config;
pub mod http_fetcher;

use async_trait::async_trait;

pub use config::FetcherConfig;
pub use http_fetcher::HttpFetcher;

/// What a single GET produced.
///
/// Every failure is reported here instead of as an error so the pipeline
/// can always complete; callers that only want the payload use
/// [`FetchOutcome::into_body`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTTP 200 with the full response body
    Body(String),
    /// The URL was empty or could not be parsed; no request was made
    Skipped,
    /// The server answered with a status other than 200
    Status(u16),
    /// DNS, connect, timeout or body stream failure
    Transport(String),
}

impl FetchOutcome {
    /// The response body, or an empty string for every non-body outcome
    pub fn into_body(self) -> String {
        match self {
            FetchOutcome::Body(body) => body,
            _ => String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Status(_) | FetchOutcome::Transport(_))
    }
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::watch;

    use super::{FetchOutcome, Fetcher};

    /// Canned fetcher that records every URL it is asked for.
    ///
    /// Every fetch answers with the same [`FetchOutcome`]. When gated, each
    /// fetch waits for [`MockFetcher::release`] before it answers.
    pub(crate) struct MockFetcher {
        outcome: FetchOutcome,
        calls: AtomicUsize,
        urls: Mutex<Vec<String>>,
        gate: Option<watch::Sender<bool>>,
    }

    impl MockFetcher {
        pub(crate) fn new(body: &str) -> Self {
            Self::answering(FetchOutcome::Body(body.to_string()))
        }

        pub(crate) fn answering(outcome: FetchOutcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        pub(crate) fn gated(body: &str) -> Self {
            Self {
                gate: Some(watch::channel(false).0),
                ..Self::new(body)
            }
        }

        pub(crate) fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.send_replace(true);
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            if let Some(gate) = &self.gate {
                let mut open = gate.subscribe();
                let _ = open.wait_for(|open| *open).await;
            }
            self.outcome.clone()
        }
    }
}
