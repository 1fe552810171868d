use std::time::Duration;

use crate::error::{Error, Result};

/// Public file endpoint of the service.
pub const DEFAULT_ENDPOINT: &str = "http://www.filepicker.io/api/file";

/// How the API key travels with each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// Handle-level operations are authorised by the handle and the security pair alone.
    #[default]
    None,
    /// Appends `key=<api key>` as the last query parameter.
    QueryParam,
    /// Sends the key in the `X-Api-Key` header.
    Header,
}

/// Client configuration, read-only once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    /// Base file endpoint; blob handles are appended to it.
    pub endpoint: String,
    pub auth: AuthScheme,
    /// Whole-request timeout, body streaming included. Unset leaves the
    /// transport's default, which never times out a request.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            auth: AuthScheme::default(),
            timeout: None,
            user_agent: format!("filepicker-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// - FILEPICKER_API_KEY (required)
    /// - FILEPICKER_ENDPOINT (defaults to the public endpoint)
    /// - FILEPICKER_TIMEOUT_SECS (positive integer)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FILEPICKER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::config("FILEPICKER_API_KEY is not set"))?;
        let mut config = Self::new(api_key);
        if let Ok(endpoint) = std::env::var("FILEPICKER_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        if let Ok(raw) = std::env::var("FILEPICKER_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| Error::config(format!("FILEPICKER_TIMEOUT_SECS must be a positive integer, got {:?}", raw)))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::config(format!("endpoint must be an http(s) URL, got {:?}", self.endpoint)));
        }
        if self.auth != AuthScheme::None && self.api_key.is_empty() {
            return Err(Error::config("an API key is required by the configured auth scheme"));
        }
        Ok(())
    }
}
