//! Write endpoints: overwrite a blob from local bytes or from a source URL.

use std::path::Path;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};

use super::Client;
use crate::error::Result;
use crate::models::{Blob, WriteOpts};

impl Client {
    /// Overwrites `blob` with the contents of the local file at `path`.
    ///
    /// The file is read before any request is made, so a missing file fails
    /// without touching the network.
    pub async fn write<P: AsRef<Path>>(&self, blob: &Blob, path: P, opts: Option<&WriteOpts>) -> Result<Blob> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        debug!("writing {} ({} bytes) to {}", path.display(), content.len(), blob.handle());

        let url = self.file_url(blob, opts);
        let request = self
            .request(Method::POST, &url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content);
        let response = self.execute(request).await?;
        updated_blob(blob, response).await
    }

    /// Overwrites `blob` with content the service fetches from `source_url`.
    ///
    /// The body is the single form field `url=<escaped source>`.
    pub async fn write_url(&self, blob: &Blob, source_url: &str, opts: Option<&WriteOpts>) -> Result<Blob> {
        debug!("writing {} from {}", blob.handle(), source_url);
        let url = self.file_url(blob, opts);
        let request = self.request(Method::POST, &url).form(&[("url", source_url)]);
        let response = self.execute(request).await?;
        updated_blob(blob, response).await
    }
}

async fn updated_blob(blob: &Blob, response: Response) -> Result<Blob> {
    let body = response.bytes().await?;
    let returned: Blob = serde_json::from_slice(&body)?;
    Ok(blob.updated_with(returned))
}
