// src/config.rs

use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.bmreports.com/BMRS/";
pub const DEFAULT_CACHE_DIR: &str = "data";
/// Envelope lines the API writes above the real header row.
pub const DEFAULT_PREAMBLE_LINES: usize = 4;

pub const ENV_API_KEY: &str = "BMRS_API_KEY";
pub const ENV_BASE_URL: &str = "BMRS_BASE_URL";
pub const ENV_CACHE_DIR: &str = "BMRS_CACHE_DIR";
pub const ENV_PREAMBLE: &str = "BMRS_PREAMBLE";

const REDACTED: &str = "***";

/// API credential. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the one place that has to put it on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&REDACTED).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Process-wide settings, read once at start-up and passed down explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    api_key: ApiKey,
    base_url: Url,
    cache_dir: PathBuf,
    preamble_lines: usize,
}

/// On-disk shape of a YAML config file.
#[derive(Debug, Deserialize)]
struct FileConfig {
    api_key: ApiKey,
    base_url: Option<String>,
    cache_dir: Option<PathBuf>,
    preamble_lines: Option<usize>,
}

impl Config {
    /// Defaults for everything except the credential.
    pub fn new(api_key: ApiKey) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("API key must not be empty".into()));
        }
        Ok(Self {
            api_key,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            preamble_lines: DEFAULT_PREAMBLE_LINES,
        })
    }

    /// Load `.env` if there is one, then read `BMRS_*` variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source shaped like the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .map(ApiKey::new)
            .ok_or_else(|| Error::Config(format!("missing {ENV_API_KEY} in environment (.env)")))?;
        let mut cfg = Self::new(api_key)?;

        if let Some(raw) = lookup(ENV_BASE_URL) {
            cfg.base_url = parse_base_url(&raw)?;
        }
        if let Some(raw) = lookup(ENV_CACHE_DIR) {
            cfg.cache_dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup(ENV_PREAMBLE) {
            cfg.preamble_lines = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{ENV_PREAMBLE}={raw:?}: {e}")))?;
        }

        debug!(base_url = %cfg.base_url, cache_dir = %cfg.cache_dir.display(), "config loaded");
        Ok(cfg)
    }

    /// Read settings from a YAML file with the keys `api_key`, `base_url`,
    /// `cache_dir` and `preamble_lines`.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: FileConfig =
            serde_yaml::from_str(text).map_err(|e| Error::Config(format!("invalid YAML: {e}")))?;

        let mut cfg = Self::new(file.api_key)?;
        if let Some(raw) = file.base_url {
            cfg.base_url = parse_base_url(&raw)?;
        }
        if let Some(dir) = file.cache_dir {
            cfg.cache_dir = dir;
        }
        if let Some(n) = file.preamble_lines {
            cfg.preamble_lines = n;
        }
        Ok(cfg)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_preamble_lines(mut self, n: usize) -> Self {
        self.preamble_lines = n;
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn preamble_lines(&self) -> usize {
        self.preamble_lines
    }
}

/// Parse a base URL, forcing a trailing slash.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| Error::Config(format!("base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("base URL {raw:?} cannot be a base")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = Config::from_lookup(lookup_from(&[(ENV_API_KEY, "secret-key")])).unwrap();
        assert_eq!(cfg.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(cfg.cache_dir(), Path::new("data"));
        assert_eq!(cfg.preamble_lines(), 4);
        assert_eq!(cfg.api_key().expose(), "secret-key");
    }

    #[test]
    fn env_overrides_are_applied() {
        let cfg = Config::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k"),
            (ENV_BASE_URL, "http://localhost:8080/bmrs"),
            (ENV_CACHE_DIR, "/tmp/bmrs-cache"),
            (ENV_PREAMBLE, " 2 "),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url().as_str(), "http://localhost:8080/bmrs/");
        assert_eq!(cfg.cache_dir(), Path::new("/tmp/bmrs-cache"));
        assert_eq!(cfg.preamble_lines(), 2);
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn bad_preamble_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[(ENV_API_KEY, "k"), (ENV_PREAMBLE, "four")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn yaml_config_is_read() {
        let cfg = Config::from_yaml_str(
            "api_key: from-yaml\ncache_dir: cache\npreamble_lines: 5\n",
        )
        .unwrap();
        assert_eq!(cfg.api_key().expose(), "from-yaml");
        assert_eq!(cfg.cache_dir(), Path::new("cache"));
        assert_eq!(cfg.preamble_lines(), 5);
        assert_eq!(cfg.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn yaml_config_file_is_read() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bmrs.yaml");
        std::fs::write(
            &path,
            "api_key: file-key\nbase_url: http://localhost:9000/bmrs\npreamble_lines: 3\n",
        )?;

        let cfg = Config::from_yaml_file(&path)?;

        assert_eq!(cfg.api_key().expose(), "file-key");
        assert_eq!(cfg.base_url().as_str(), "http://localhost:9000/bmrs/");
        assert_eq!(cfg.cache_dir(), Path::new(DEFAULT_CACHE_DIR));
        assert_eq!(cfg.preamble_lines(), 3);
        Ok(())
    }

    #[test]
    fn missing_yaml_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("absent.yaml"), "{err}");
    }

    #[test]
    fn api_key_never_prints() {
        let key = ApiKey::new("hunter2");
        let cfg = Config::new(key.clone()).unwrap();
        assert!(!format!("{key}").contains("hunter2"));
        assert!(!format!("{key:?}").contains("hunter2"));
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }
}
