//! Watchlist records as returned by `GET /api/v1/watchlist`.
//!
//! The server stores each query URL-encoded and prefixed with the search
//! page's query string (`cb.urlver=1&q=`). Records are normalized once on
//! fetch so the classifier only ever sees the plain query text.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Vendor prefix stored in front of every saved query
pub const QUERY_PREFIX: &str = "cb.urlver=1&q=";

const LAST_HIT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One watchlist entry exactly as the server sends it.
///
/// Only the fields the report needs are decoded; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWatchlist {
    #[serde(default)]
    pub name: String,
    pub search_query: String,
    pub enabled: bool,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub last_execution_time_ms: Option<u64>,
    #[serde(default)]
    pub last_hit: Option<String>,
}

/// A normalized watchlist, read-only after fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchlistRecord {
    /// Display name, used in logs only
    pub name: String,
    /// Decoded query text with the vendor prefix stripped
    pub query: String,
    pub enabled: bool,
    /// Duration of the most recent scheduled run
    pub execution_time_ms: Option<u64>,
    /// Time of the most recent hit, second precision, server local time
    pub last_hit: Option<NaiveDateTime>,
}

impl From<RawWatchlist> for WatchlistRecord {
    fn from(raw: RawWatchlist) -> Self {
        Self {
            query: normalize_query(&raw.search_query),
            last_hit: parse_last_hit(raw.last_hit.as_deref()),
            name: raw.name,
            enabled: raw.enabled,
            execution_time_ms: raw.last_execution_time_ms,
        }
    }
}

/// Percent-decode, drop the vendor prefix and trim.
///
/// `+` is left alone; the server encodes spaces as `%20`.
pub fn normalize_query(raw: &str) -> String {
    let decoded = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&decoded)
        .replace(QUERY_PREFIX, "")
        .trim()
        .to_string()
}

/// Parse `last_hit` such as `2021-07-30 09:15:02.113455-04:00`.
///
/// Fractional seconds and offset are dropped. Null, empty and `None` mean
/// the watchlist never hit.
pub fn parse_last_hit(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty() && *s != "None")?;
    let seconds = raw.split('.').next().unwrap_or(raw);

    match NaiveDateTime::parse_from_str(seconds, LAST_HIT_FORMAT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!("Ignoring unparseable last_hit {raw:?}: {e}");
            None
        }
    }
}

/// Accept integer, float or numeric-string milliseconds.
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Int(u64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Millis>::deserialize(deserializer)? {
        Some(Millis::Int(ms)) => Some(ms),
        Some(Millis::Float(ms)) if ms.is_finite() && ms >= 0.0 => Some(ms as u64),
        Some(Millis::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
