//! Client for the filepicker file-storage API.
//!
//! Files are addressed by opaque handles wrapped in [`Blob`]. The [`Client`]
//! downloads them into writers or local files and overwrites them from local
//! files or remote URLs.
//!
//! ```no_run
//! use filepicker::{Blob, Client, DownloadOpts};
//!
//! # async fn run() -> filepicker::Result<()> {
//! let client = Client::new("API_KEY")?;
//! let blob = Blob::new("2HHH3");
//! let mut buf: Vec<u8> = Vec::new();
//! let n = client.download_to(&blob, Some(&DownloadOpts::default()), &mut buf).await?;
//! println!("{} bytes", n);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use api::Client;
pub use config::{AuthScheme, ClientConfig, DEFAULT_ENDPOINT};
pub use error::{Error, ErrorKind, Result, ServiceError};
pub use models::{Blob, DownloadOpts, QueryParams, Security, WriteOpts};
