//! Configuration loading.
//!
//! Reads `config.toml` from the first location that exists:
//! 1. an explicit path (the `--config` flag)
//! 2. `./config.toml`
//! 3. the platform config directory, e.g. `~/.config/cbexpensive/config.toml`
//!
//! `CBEXPENSIVE_API_KEY` and `CBEXPENSIVE_API_URL` override the file so the
//! token does not have to live on disk.
//!
//! ```toml
//! [api]
//! key = "0123456789abcdef"
//! url = "https://cb.example.com"
//! port = 443
//!
//! [report]
//! output_dir = "~/reports"
//! ```

pub mod schema;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Error, Result};

pub use schema::{ApiConfig, Config, ReportConfig};

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Overrides `api.key`
pub const ENV_API_KEY: &str = "CBEXPENSIVE_API_KEY";
/// Overrides `api.url`
pub const ENV_API_URL: &str = "CBEXPENSIVE_API_URL";

impl Config {
    /// Parse and validate a config document without touching the environment.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Locate, read, apply env overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(&candidate_paths(explicit), |name| std::env::var(name).ok())
    }

    /// Read the first existing file in `candidates`, then apply overrides
    /// from `lookup` and validate.
    pub fn load_from<F>(candidates: &[PathBuf], lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = candidates
            .iter()
            .find(|p| p.is_file())
            .ok_or_else(|| Error::ConfigNotFound {
                searched: candidates.to_vec(),
            })?;
        tracing::debug!("Loading config from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;

        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply `CBEXPENSIVE_*` overrides. Takes a lookup so tests do not need
    /// to mutate the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            tracing::debug!("api.key overridden by {ENV_API_KEY}");
            self.api.key = key;
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            tracing::debug!("api.url overridden by {ENV_API_URL}");
            self.api.url = url;
        }
    }

    /// Reject values that would only fail later, mid-request.
    pub fn validate(&self) -> Result<()> {
        if self.api.key.trim().is_empty() {
            return Err(Error::ConfigInvalid("api.key must not be empty".into()));
        }
        let url = self.api.url.trim();
        if url.is_empty() {
            return Err(Error::ConfigInvalid("api.url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::ConfigInvalid(format!(
                "api.url must start with http:// or https://, got {url:?}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::ConfigInvalid(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.report.filename_prefix.contains(['/', '\\']) {
            return Err(Error::ConfigInvalid(
                "report.filename_prefix must not contain path separators".into(),
            ));
        }
        Ok(())
    }

    /// Report directory with `~` and `$VARS` expanded.
    pub fn output_dir(&self) -> PathBuf {
        expand_path(&self.report.output_dir)
    }
}

/// Candidate config locations, in lookup order.
pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![expand_path(&path.to_string_lossy())];
    }

    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!("Could not expand {raw:?}: {e}; using it verbatim");
            PathBuf::from(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[api]
key = "abc123"
url = "https://cb.example.com"
"#;

    fn path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_toml(MINIMAL, &path()).unwrap();
        assert_eq!(config.api.key, "abc123");
        assert_eq!(config.api.port, None);
        assert_eq!(config.api.timeout_secs, 5);
        assert!(!config.api.verify_tls);
        assert_eq!(config.report, ReportConfig::default());
        assert_eq!(config.report.filename_prefix, "result");
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
[api]
key = "k"
url = "https://cb.example.com/"
port = 8443
timeout_secs = 30
verify_tls = true

[report]
output_dir = "/tmp/reports"
filename_prefix = "watchlists-"
"#,
            &path(),
        )
        .unwrap();
        assert_eq!(config.api.base_url(), "https://cb.example.com:8443");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.verify_tls);
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/reports"));
        assert_eq!(config.report.filename_prefix, "watchlists-");
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = Config::from_toml(
            "[api]\nkey = \"k\"\nurl = \" https://cb.example.com/ \"\nport = 443\n",
            &path(),
        )
        .unwrap();
        assert_eq!(config.api.base_url(), "https://cb.example.com:443");
    }

    #[test]
    fn base_url_without_port() {
        let config = Config::from_toml(MINIMAL, &path()).unwrap();
        assert_eq!(config.api.base_url(), "https://cb.example.com");
    }

    #[test]
    fn missing_api_section_is_parse_error() {
        let err = Config::from_toml("[report]\noutput_dir = \".\"\n", &path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::from_toml("[api\nkey=", &path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = Config::from_toml(
            "[api]\nkey = \"  \"\nurl = \"https://cb.example.com\"\n",
            &path(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let err = Config::from_toml("[api]\nkey = \"k\"\nurl = \"cb.example.com\"\n", &path())
            .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_toml(
            "[api]\nkey = \"k\"\nurl = \"https://cb\"\ntimeout_secs = 0\n",
            &path(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = Config::from_toml(MINIMAL, &path()).unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "from-env"),
            (ENV_API_URL, "http://10.0.0.5"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.key, "from-env");
        assert_eq!(config.api.url, "http://10.0.0.5");
    }

    #[test]
    fn empty_env_override_is_ignored() {
        let mut config = Config::from_toml(MINIMAL, &path()).unwrap();
        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config.api.key, "abc123");
    }

    #[test]
    fn load_from_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("cb.toml");
        std::fs::write(&file, MINIMAL).unwrap();

        let config = Config::load(Some(&file)).unwrap();
        assert_eq!(config.api.url, "https://cb.example.com");
    }

    #[test]
    fn load_missing_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("nope.toml");

        let err = Config::load(Some(&file)).unwrap_err();
        match err {
            Error::ConfigNotFound { searched } => assert_eq!(searched, vec![file]),
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_from_picks_first_existing_candidate() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("config.toml");
        let platform = tmp.path().join("platform/config.toml");
        std::fs::create_dir_all(platform.parent().unwrap()).unwrap();
        std::fs::write(
            &platform,
            "[api]\nkey = \"platform\"\nurl = \"https://platform\"\n",
        )
        .unwrap();

        let candidates = [local.clone(), platform];
        let config = Config::load_from(&candidates, |_| None).unwrap();
        assert_eq!(config.api.key, "platform");

        std::fs::write(&local, MINIMAL).unwrap();
        let config = Config::load_from(&candidates, |_| None).unwrap();
        assert_eq!(config.api.key, "abc123");
    }

    #[test]
    fn load_from_applies_env_overrides() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("config.toml");
        std::fs::write(&file, MINIMAL).unwrap();

        let config = Config::load_from(&[file], |name| match name {
            ENV_API_KEY => Some("env-key".into()),
            ENV_API_URL => Some("http://10.1.2.3".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api.key, "env-key");
        assert_eq!(config.api.base_url(), "http://10.1.2.3");
    }

    #[test]
    fn load_from_validates_after_overrides() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("config.toml");
        std::fs::write(&file, MINIMAL).unwrap();

        let err = Config::load_from(&[file], |name| {
            (name == ENV_API_URL).then(|| "ftp://cb".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn load_from_reports_every_candidate() {
        let tmp = TempDir::new().unwrap();
        let candidates = vec![tmp.path().join("a.toml"), tmp.path().join("b.toml")];

        match Config::load_from(&candidates, |_| None).unwrap_err() {
            Error::ConfigNotFound { searched } => assert_eq!(searched, candidates),
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn default_candidates_start_with_working_directory() {
        let paths = candidate_paths(None);
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE_NAME));
    }
}
