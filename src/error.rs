//! Error types for cbexpensive.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a scan. The classifier itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// No config file at any of the searched locations.
    #[error("no config file found (searched: {})", display_paths(.searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    /// Config file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML or does not match the schema.
    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The server rejected the API token.
    #[error("authentication token is invalid or expired")]
    Unauthorized,

    /// Any non-200, non-401 response.
    #[error("unexpected response {status} from {url}; check the Carbon Black url and port")]
    UnexpectedStatus { status: u16, url: String },

    /// Request exceeded the configured timeout.
    #[error("connection could not be established within {duration:?}")]
    Timeout { duration: Duration },

    /// Other transport or decode failures.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// CSV serialization failure.
    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
