use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request configuration injected into the HTTP backend.
///
/// There is no shared global client; every backend is built from one of these.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the API, always ending in `/` so endpoint paths join under it.
    pub base_url: Url,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL {0:?} cannot be used as a base address")]
    NotABase(String),
    #[error("invalid header {0:?}")]
    InvalidHeader(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(base_url.to_string()));
        }

        Ok(Self {
            base_url: url,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
