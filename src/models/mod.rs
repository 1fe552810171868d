use serde::{Deserialize, Serialize};

/// Reference to a file stored in the service.
///
/// A blob is usually built from a known handle with [`Blob::new`]; write
/// operations return a copy enriched with the metadata the service reports.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    #[serde(skip)]
    handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "isWriteable", skip_serializing_if = "Option::is_none")]
    pub writeable: Option<bool>,
}

impl Blob {
    pub fn new<S: Into<String>>(handle: S) -> Self {
        Self {
            handle: handle.into(),
            ..Self::default()
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Merges a write response into this blob.
    ///
    /// The handle follows the returned `url` when there is one; fields the
    /// response leaves out keep their previous values.
    pub(crate) fn updated_with(&self, response: Blob) -> Blob {
        let handle = response
            .url
            .as_deref()
            .and_then(handle_from_url)
            .unwrap_or_else(|| self.handle.clone());
        Blob {
            handle,
            url: response.url.or_else(|| self.url.clone()),
            filename: response.filename.or_else(|| self.filename.clone()),
            mimetype: response.mimetype.or_else(|| self.mimetype.clone()),
            size: response.size.or(self.size),
            key: response.key.or_else(|| self.key.clone()),
            container: response.container.or_else(|| self.container.clone()),
            path: response.path.or_else(|| self.path.clone()),
            writeable: response.writeable.or(self.writeable),
        }
    }
}

fn handle_from_url(url: &str) -> Option<String> {
    // only the path after `scheme://authority` can name a handle
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path)?,
        None => url,
    };
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or(path);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Precomputed policy and signature granting scoped access.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Security {
    pub policy: String,
    pub signature: String,
}

impl Security {
    pub fn new<P: Into<String>, S: Into<String>>(policy: P, signature: S) -> Self {
        Self {
            policy: policy.into(),
            signature: signature.into(),
        }
    }
}

/// Ordered query parameters an options value contributes to a request URL.
pub trait QueryParams {
    fn query_params(&self) -> Vec<(&'static str, String)>;
}

impl<T: QueryParams> QueryParams for Option<&T> {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        self.map(|opts| opts.query_params()).unwrap_or_default()
    }
}

fn common_params(base64_decode: bool, security: Option<&Security>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if base64_decode {
        params.push(("base64decode", "true".to_string()));
    }
    if let Some(security) = security {
        params.push(("policy", security.policy.clone()));
        params.push(("signature", security.signature.clone()));
    }
    params
}

/// Options for download requests.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DownloadOpts {
    /// Ask the service to base64-decode the stored content.
    pub base64_decode: bool,
    pub security: Option<Security>,
}

impl QueryParams for DownloadOpts {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        common_params(self.base64_decode, self.security.as_ref())
    }
}

/// Options for write and write-from-URL requests.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOpts {
    /// The uploaded payload is base64 and should be decoded before storing.
    pub base64_decode: bool,
    pub security: Option<Security>,
}

impl QueryParams for WriteOpts {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        common_params(self.base64_decode, self.security.as_ref())
    }
}
