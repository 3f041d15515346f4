use serde::{Deserialize, Serialize};

/// Top-level `config.toml` layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Carbon Black EDR server connection
    pub api: ApiConfig,
    /// Report output
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[api]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API token sent as `X-Auth-Token`
    pub key: String,
    /// Server base URL including scheme, e.g. `https://cb.example.com`
    pub url: String,
    /// Appended to the URL as `:port` when set
    #[serde(default)]
    pub port: Option<u16>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Verify the server certificate. Off by default because most EDR
    /// servers run with self-signed certificates.
    #[serde(default)]
    pub verify_tls: bool,
}

impl ApiConfig {
    /// `url[:port]`, trimmed and without a trailing slash.
    pub fn base_url(&self) -> String {
        let url = self.url.trim().trim_end_matches('/');
        match self.port {
            Some(port) => format!("{url}:{port}"),
            None => url.to_string(),
        }
    }
}

/// `[report]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory the CSV is written to; `~` is expanded
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// File name prefix, followed by a `%Y%m%d-%H%M%S` timestamp
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            filename_prefix: default_filename_prefix(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_output_dir() -> String {
    ".".into()
}

fn default_filename_prefix() -> String {
    "result".into()
}
