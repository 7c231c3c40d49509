//! Background story loading with per-key deduplication.
//!
//! ```text
//! start(url) → tokio task: delay → Fetcher → StoryParser → watch channel → LoadTicket
//! ```
//!
//! A [`StoryLoader`] keeps at most one load in flight. The key is the
//! request URL: asking for a key that is already loading subscribes to the
//! running work, and asking for a key that was just delivered hands back the
//! cached result without touching the network.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use crate::domain::Story;
use crate::fetcher::Fetcher;
use crate::parser::StoryParser;
use crate::presenter::StoryView;

/// Outcome handed to the subscriber of a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The load completed; the stories may be empty
    Finished(Arc<[Story]>),
    /// The load was cancelled or the loader torn down
    Reset,
}

impl Delivery {
    /// Hand the delivery to a view: `on_load_finished` or `on_reset`.
    pub fn dispatch<V: StoryView + ?Sized>(self, view: &mut V) {
        match self {
            Delivery::Finished(stories) => view.on_load_finished(&stories),
            Delivery::Reset => view.on_reset(),
        }
    }

    pub fn stories(&self) -> Option<&[Story]> {
        match self {
            Delivery::Finished(stories) => Some(stories),
            Delivery::Reset => None,
        }
    }
}

/// Observable loader state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Loading(String),
    Delivered(String),
    Reset,
}

/// Single-shot handle on the result of a load.
#[derive(Debug)]
pub struct LoadTicket {
    rx: watch::Receiver<Option<Delivery>>,
}

impl LoadTicket {
    fn new(rx: watch::Receiver<Option<Delivery>>) -> Self {
        Self { rx }
    }

    fn ready(delivery: Delivery) -> Self {
        let (_tx, rx) = watch::channel(Some(delivery));
        Self { rx }
    }

    /// Wait for the load to finish.
    ///
    /// Resolves to [`Delivery::Reset`] if the work was cancelled.
    pub async fn wait(mut self) -> Delivery {
        let delivery = match self.rx.wait_for(|value| value.is_some()).await {
            Ok(value) => (*value).clone(),
            Err(_) => None,
        };
        delivery.unwrap_or(Delivery::Reset)
    }

    /// Take the delivery if it is ready, otherwise give the ticket back.
    pub fn try_take(self) -> Result<Delivery, LoadTicket> {
        let current = (*self.rx.borrow()).clone();
        if let Some(delivery) = current {
            return Ok(delivery);
        }
        match self.rx.has_changed() {
            // Sender gone without publishing
            Err(_) => Ok(Delivery::Reset),
            Ok(_) => Err(self),
        }
    }
}

struct InFlight {
    key: String,
    generation: u64,
    tx: watch::Sender<Option<Delivery>>,
    abort: AbortHandle,
}

enum Slot {
    Idle,
    Loading(InFlight),
    Delivered { key: String, stories: Arc<[Story]> },
    Reset,
}

struct Inner {
    slot: Slot,
    generation: u64,
}

pub struct StoryLoader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: StoryParser,
    fetch_delay: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl StoryLoader {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        parser: StoryParser,
        fetch_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            parser,
            fetch_delay,
            inner: Arc::new(Mutex::new(Inner {
                slot: Slot::Idle,
                generation: 0,
            })),
        }
    }

    /// Begin loading `key`, reusing in-flight work or a delivered result
    /// for the same key.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, key: impl Into<String>) -> LoadTicket {
        let key = key.into();
        let mut inner = lock(&self.inner);

        match &inner.slot {
            Slot::Loading(flight) if flight.key == key => {
                debug!("Joining in-flight load for {}", key);
                return LoadTicket::new(flight.tx.subscribe());
            }
            Slot::Delivered { key: delivered, stories } if *delivered == key => {
                debug!("Re-delivering {} cached stories for {}", stories.len(), key);
                return LoadTicket::ready(Delivery::Finished(stories.clone()));
            }
            _ => {}
        }

        self.spawn_load(&mut inner, key)
    }

    /// Load `key` again even if it was already delivered.
    ///
    /// A load already in flight for the same key is joined, not duplicated.
    pub fn restart(&self, key: impl Into<String>) -> LoadTicket {
        let key = key.into();
        let mut inner = lock(&self.inner);

        if let Slot::Loading(flight) = &inner.slot {
            if flight.key == key {
                debug!("Joining in-flight load for {}", key);
                return LoadTicket::new(flight.tx.subscribe());
            }
        }

        self.spawn_load(&mut inner, key)
    }

    /// Abort the in-flight load, if any. Its tickets resolve to `Reset`.
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        cancel_in_flight(&mut inner);
    }

    /// Tear down: cancel in-flight work and forget any delivered result.
    pub fn reset(&self) {
        let mut inner = lock(&self.inner);
        cancel_in_flight(&mut inner);
        inner.slot = Slot::Reset;
    }

    pub fn state(&self) -> LoaderState {
        match &lock(&self.inner).slot {
            Slot::Idle => LoaderState::Idle,
            Slot::Loading(flight) => LoaderState::Loading(flight.key.clone()),
            Slot::Delivered { key, .. } => LoaderState::Delivered(key.clone()),
            Slot::Reset => LoaderState::Reset,
        }
    }

    /// Key of the load in flight or last delivered
    pub fn key(&self) -> Option<String> {
        match self.state() {
            LoaderState::Loading(key) | LoaderState::Delivered(key) => Some(key),
            LoaderState::Idle | LoaderState::Reset => None,
        }
    }

    fn spawn_load(&self, inner: &mut Inner, key: String) -> LoadTicket {
        if cancel_in_flight(inner) {
            debug!("Superseded previous load with {}", key);
        }

        inner.generation += 1;
        let generation = inner.generation;
        let (tx, rx) = watch::channel(None);

        info!("Starting story load for {}", key);
        let task = tokio::spawn(run_load(
            self.fetcher.clone(),
            self.parser.clone(),
            self.fetch_delay,
            self.inner.clone(),
            key.clone(),
            generation,
        ));

        inner.slot = Slot::Loading(InFlight {
            key,
            generation,
            tx,
            abort: task.abort_handle(),
        });

        LoadTicket::new(rx)
    }
}

impl Drop for StoryLoader {
    fn drop(&mut self) {
        cancel_in_flight(&mut lock(&self.inner));
    }
}

async fn run_load(
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: StoryParser,
    fetch_delay: Duration,
    inner: Arc<Mutex<Inner>>,
    key: String,
    generation: u64,
) {
    if !fetch_delay.is_zero() {
        tokio::time::sleep(fetch_delay).await;
    }

    let outcome = fetcher.fetch(&key).await;
    if outcome.is_failure() {
        debug!("Fetch for {} failed, delivering an empty list", key);
    }
    let body = outcome.into_body();
    let stories: Arc<[Story]> = parser.parse(&body).into();
    info!("Loaded {} stories for {}", stories.len(), key);

    publish(&inner, generation, stories);
}

fn publish(inner: &Mutex<Inner>, generation: u64, stories: Arc<[Story]>) {
    let mut inner = lock(inner);

    let is_current = matches!(&inner.slot, Slot::Loading(flight) if flight.generation == generation);
    if !is_current {
        debug!("Discarding result of superseded load");
        return;
    }

    if let Slot::Loading(flight) = std::mem::replace(&mut inner.slot, Slot::Idle) {
        flight
            .tx
            .send_replace(Some(Delivery::Finished(stories.clone())));
        inner.slot = Slot::Delivered {
            key: flight.key,
            stories,
        };
    }
}

/// Returns true if a load was cancelled.
fn cancel_in_flight(inner: &mut Inner) -> bool {
    match std::mem::replace(&mut inner.slot, Slot::Idle) {
        Slot::Loading(flight) => {
            flight.abort.abort();
            flight.tx.send_replace(Some(Delivery::Reset));
            info!("Cancelled story load for {}", flight.key);
            true
        }
        other => {
            inner.slot = other;
            false
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
