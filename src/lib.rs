//! # Newsdesk
//!
//! A terminal client for a content search API that lists news stories
//! for a section in a chosen order.
//!
//! ## Architecture
//!
//! ```text
//! QueryParams → URL builder → Fetcher → Parser → Loader → Presenter → View
//! ```
//!
//! - [`query`]: Builds the search request URL from preferences
//! - [`fetcher`]: HTTP GET of the response body
//! - [`parser`]: Turns the JSON response into [`Story`](domain::Story) values
//! - [`loader`]: Runs one fetch-and-parse per request key, off the caller's task
//! - [`presenter`]: Checks connectivity and hands results to a view
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the stories for the configured section
//! newsdesk
//!
//! # Technology stories, oldest first
//! newsdesk list --section technology --order-by oldest
//!
//! # Show the request URL only
//! newsdesk url
//!
//! # Launch the TUI
//! newsdesk tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// parser, loader and presenter.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/newsdesk/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Story`](domain::Story): One search result
/// - [`QueryParams`](domain::QueryParams): Section and sort order preferences
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for fetching a URL
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Background loading keyed by request URL.
pub mod loader;

/// Search response parsing.
pub mod parser;

/// Presenter, view contract and connectivity check.
pub mod presenter;

/// Request URL construction.
pub mod query;

/// Terminal user interface.
///
/// Single story list built with ratatui. Keybindings: j/k navigate,
/// Enter opens in browser, R refreshes, b cycles the sort order, q quits.
pub mod tui;
