use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{HeyGenError, Result};

const DEFAULT_API_URL: &str = "https://api.heygen.com/";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "HEYGEN_API_KEY";
/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "HEYGEN_BASE_URL";

/// Bounds for waiting on a submitted video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Pause between two status queries.
    pub poll_interval: Duration,
    /// Total time allowed, measured from the first status query.
    pub max_wait: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5_000),
            max_wait: Duration::from_millis(300_000),
        }
    }
}

impl WaitOptions {
    pub fn new(poll_interval: Duration, max_wait: Duration) -> Self {
        Self {
            poll_interval,
            max_wait,
        }
    }
}

/// Everything a [`HeyGenClient`](crate::HeyGenClient) needs to talk to the service.
///
/// The client never reads the process environment on its own; use
/// [`ClientConfig::from_env`] explicitly if that is where the key lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: Url,
    pub(crate) request_timeout: Duration,
    pub(crate) wait: WaitOptions,
}

impl ClientConfig {
    /// Creates a configuration pointing at the public HeyGen API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            wait: WaitOptions::default(),
        }
    }

    /// Builds a configuration from `HEYGEN_API_KEY` and `HEYGEN_BASE_URL`.
    ///
    /// # Errors
    ///
    /// - `HeyGenError::MissingApiKey` if the key variable is unset or blank.
    /// - `HeyGenError::InvalidBaseUrl` if the base URL override does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(HeyGenError::MissingApiKey)?;

        let config = Self::new(api_key);
        match lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(base_url) => config.with_base_url(&base_url),
            None => Ok(config),
        }
    }

    /// Points the client at a different API root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Sets the timeout applied to every individual HTTP request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the wait bounds used by `wait_for_completion`.
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn wait_options(&self) -> WaitOptions {
        self.wait
    }
}

// `Url::join` drops the last path segment unless the base ends with a slash.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{trimmed}/"))?)
    }
}
