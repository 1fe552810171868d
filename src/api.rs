//! HTTP client for the filepicker file API.
//!
//! Every operation is a single request/response transaction:
//! - download.rs: GET a blob into a writer or a local file
//! - write.rs: POST local bytes or a source URL over an existing blob
//!
//! Non-2xx answers are turned into [`ServiceError`]s here, before any response
//! body reaches the caller.

mod download;
mod write;

use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response};

use crate::config::{AuthScheme, ClientConfig};
use crate::error::{Result, ServiceError};
use crate::models::{Blob, QueryParams};
use crate::utils;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Client bound to one endpoint and API key.
///
/// Cloning is cheap and clones share the connection pool, so one client can
/// serve concurrent callers.
#[derive(Clone, Debug)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// Client for the public endpoint with default settings.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request URL for `blob` with the query parameters of `opts`.
    pub fn file_url<O: QueryParams>(&self, blob: &Blob, opts: Option<&O>) -> String {
        let mut params = opts.query_params();
        if self.config.auth == AuthScheme::QueryParam {
            params.push(("key", self.config.api_key.clone()));
        }
        utils::build_url(&self.config.endpoint, blob.handle(), &utils::encode_query(&params))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.config.auth {
            AuthScheme::Header => builder.header(API_KEY_HEADER, self.config.api_key.as_str()),
            AuthScheme::None | AuthScheme::QueryParam => builder,
        }
    }

    /// Sends the request and maps non-2xx responses to service errors.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("response {}", status);
            return Ok(response);
        }
        let body = response.text().await?;
        let err = ServiceError::parse(status, &body);
        warn!("service returned {} ({:?}): {}", status, err.kind, err);
        Err(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DownloadOpts, Security, WriteOpts};

    #[test]
    fn url_for_every_option_combination() {
        let client = Client::new("KEY").unwrap();
        let blob = Blob::new("2HHH3");
        let cases = [
            (None, "http://www.filepicker.io/api/file/2HHH3"),
            (
                Some(DownloadOpts {
                    base64_decode: true,
                    security: None,
                }),
                "http://www.filepicker.io/api/file/2HHH3?base64decode=true",
            ),
            (
                Some(DownloadOpts {
                    base64_decode: true,
                    security: Some(Security::new("P", "S")),
                }),
                "http://www.filepicker.io/api/file/2HHH3?base64decode=true&policy=P&signature=S",
            ),
        ];
        for (i, (opts, want)) in cases.iter().enumerate() {
            assert_eq!(client.file_url(&blob, opts.as_ref()), *want, "case {}", i);
        }
    }

    #[test]
    fn query_param_auth_appends_key_last() {
        let config = ClientConfig::new("KEY").with_auth(AuthScheme::QueryParam);
        let client = Client::with_config(config).unwrap();
        let opts = WriteOpts {
            base64_decode: false,
            security: Some(Security::new("P", "S")),
        };
        assert_eq!(
            client.file_url(&Blob::new("XYZ"), Some(&opts)),
            "http://www.filepicker.io/api/file/XYZ?policy=P&signature=S&key=KEY"
        );
        assert_eq!(
            client.file_url::<WriteOpts>(&Blob::new("XYZ"), None),
            "http://www.filepicker.io/api/file/XYZ?key=KEY"
        );
    }

    #[test]
    fn client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Client>();
    }
}
