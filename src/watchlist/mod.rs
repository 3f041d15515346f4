//! Watchlist retrieval from a Carbon Black EDR server.
//!
//! Read-only: the only request ever made is the listing `GET`.

pub mod client;
pub mod record;

pub use client::WatchlistClient;
pub use record::{normalize_query, parse_last_hit, RawWatchlist, WatchlistRecord};

use crate::error::Result;

/// Anything that can hand over the current set of watchlists.
pub trait WatchlistSource {
    fn fetch_watchlists(&self) -> Result<Vec<WatchlistRecord>>;
}
