//! # hn-gems
//!
//! Turns Hacker News comments that share links into an RSS feed.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Collector (Extractor, domain filter) → Feed writer
//!                                                   ↑
//!                                    Feed reader (dedup, gems mode)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Append new gems to hn_gems.xml, once
//! hn-gems gems --depth 5 --min-score 50 --output hn_gems.xml
//!
//! # Rebuild hn_top_comments_rss.xml every hour until interrupted
//! hn-gems poll
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct carries the configuration and
/// the API client into every pipeline run.
pub mod app;

/// Command-line interface using clap.
///
/// - `gems` - Filtered, deduplicating single run
/// - `poll` - Hourly full rebuild of the top-comments feed
pub mod cli;

/// Walks top stories and comments, producing [`Gem`](domain::Gem)s.
pub mod collector;

/// Runtime configuration, optionally loaded from TOML.
pub mod config;

/// Cancellable poll loop for the `poll` command.
pub mod daemon;

/// Core domain models.
///
/// - [`Item`](domain::Item): Raw API record
/// - [`Story`](domain::Story) / [`Comment`](domain::Comment): Typed views of an item
/// - [`Gem`](domain::Gem): A comment promoted into the feed
/// - [`FeedEntry`](domain::FeedEntry): One item of the output feed
pub mod domain;

/// URL extraction and the excluded-domain filter.
pub mod extractor;

/// RSS 2.0 feed reading and writing.
pub mod feed;

/// Hacker News API access.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait over the two endpoints
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;
