//! cbexpensive - find the Carbon Black EDR watchlists that cost the most to run.
//!
//! Pulls every watchlist from the server, scores each query with a set of
//! cheap textual heuristics and writes the result as a CSV report.
//!
//! ## Modules
//!
//! - [`config`]: `config.toml` loading and env overrides
//! - [`watchlist`]: read-only fetch of `/api/v1/watchlist`
//! - [`cost`]: the query cost heuristics
//! - [`report`]: CSV output
//! - [`scan`]: the pipeline tying them together

pub mod config;
pub mod cost;
pub mod error;
pub mod report;
pub mod scan;
pub mod watchlist;

pub use config::Config;
pub use cost::CostIndicators;
pub use error::{Error, Result};
pub use scan::{ScanOptions, ScanSummary};
pub use watchlist::{WatchlistClient, WatchlistRecord, WatchlistSource};
