//! Blocking HTTP client for the watchlist listing endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::record::{RawWatchlist, WatchlistRecord};
use super::WatchlistSource;
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Watchlist listing path, relative to the server base URL
pub const WATCHLIST_PATH: &str = "/api/v1/watchlist";
/// Header carrying the API token
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Read-only client for `GET /api/v1/watchlist`
#[derive(Debug, Clone)]
pub struct WatchlistClient {
    http: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl WatchlistClient {
    /// Build a client from the `[api]` config section.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let endpoint = format!("{}{WATCHLIST_PATH}", api.base_url());
        let timeout = Duration::from_secs(api.timeout_secs);

        if !api.verify_tls {
            tracing::debug!("TLS certificate verification disabled for {endpoint}");
        }

        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!api.verify_tls)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| Error::Http {
                url: endpoint.clone(),
                source,
            })?;

        Ok(Self {
            http,
            endpoint,
            api_key: api.key.clone(),
            timeout,
        })
    }

    /// Full URL of the listing endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and normalize every watchlist, in server order.
    pub fn fetch(&self) -> Result<Vec<WatchlistRecord>> {
        tracing::info!("Fetching watchlists from {}", self.endpoint);

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTH_HEADER, &self.api_key)
            .send()
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(Error::Unauthorized),
            status => {
                return Err(Error::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.endpoint.clone(),
                })
            }
        }

        let raw: Vec<RawWatchlist> = response.json().map_err(|e| self.transport_error(e))?;
        tracing::debug!("Decoded {} watchlists", raw.len());

        Ok(raw.into_iter().map(WatchlistRecord::from).collect())
    }

    fn transport_error(&self, source: reqwest::Error) -> Error {
        if source.is_timeout() {
            Error::Timeout {
                duration: self.timeout,
            }
        } else {
            Error::Http {
                url: self.endpoint.clone(),
                source,
            }
        }
    }
}

impl WatchlistSource for WatchlistClient {
    fn fetch_watchlists(&self) -> Result<Vec<WatchlistRecord>> {
        self.fetch()
    }
}
