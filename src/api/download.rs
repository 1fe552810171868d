//! Download endpoints: stream a blob into a writer or a local file.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use log::{debug, info, warn};
use reqwest::{Method, Response};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Client;
use crate::error::Result;
use crate::models::{Blob, DownloadOpts};
use crate::utils::{self, FILE_NAME_HEADER};

impl Client {
    /// Downloads `blob` into `writer` and returns the number of bytes written.
    ///
    /// Nothing is written when the service answers with an error.
    pub async fn download_to<W>(&self, blob: &Blob, opts: Option<&DownloadOpts>, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let url = self.file_url(blob, opts);
        let response = self.execute(self.request(Method::GET, &url)).await?;
        let written = copy_body(response, writer).await?;
        debug!("downloaded {} bytes from {}", written, blob.handle());
        Ok(written)
    }

    /// Downloads `blob` to disk and returns the path written.
    ///
    /// When `path` is an existing directory the file is named after the
    /// X-File-Name response header, or the blob handle when the header is
    /// missing or empty. Any other path is written verbatim. Data lands in a
    /// `.part` sibling first and is renamed once the body is complete.
    pub async fn download_to_file<P: AsRef<Path>>(
        &self,
        blob: &Blob,
        opts: Option<&DownloadOpts>,
        path: P,
    ) -> Result<PathBuf> {
        let url = self.file_url(blob, opts);
        let response = self.execute(self.request(Method::GET, &url)).await?;

        let header = response
            .headers()
            .get(FILE_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let dest = utils::destination_path(path.as_ref(), header.as_deref(), blob.handle());
        let tmp_path = utils::partial_path(&dest);

        let out = tokio::fs::File::create(&tmp_path).await?;
        let written = match persist(response, out, &tmp_path, &dest).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(rm) = tokio::fs::remove_file(&tmp_path).await {
                    warn!("failed to remove partial download {}: {}", tmp_path.display(), rm);
                }
                return Err(e);
            }
        };

        info!("downloaded {} ({} bytes) to {}", blob.handle(), written, dest.display());
        Ok(dest)
    }
}

/// Fills `out` with the body, flushes it to disk and moves it to `dest`.
async fn persist(response: Response, mut out: tokio::fs::File, tmp_path: &Path, dest: &Path) -> Result<u64> {
    let written = copy_body(response, &mut out).await?;
    out.sync_all().await?;
    drop(out);
    tokio::fs::rename(tmp_path, dest).await?;
    Ok(written)
}

/// Streams the response body into `writer`, returning the byte count.
async fn copy_body<W>(response: Response, writer: &mut W) -> Result<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;
    Ok(written)
}
