use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use filepicker::{Blob, Client, ClientConfig, DownloadOpts, Security, WriteOpts};
use tokio::io::AsyncWriteExt;

/// fpcli: download and overwrite files stored in filepicker.
///
/// Configuration comes from FILEPICKER_API_KEY, FILEPICKER_ENDPOINT and
/// FILEPICKER_TIMEOUT_SECS; RUST_LOG controls logging.
#[derive(Parser)]
#[clap(name = "fpcli", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save a file into a directory (named by the service) or to an exact path.
    Download {
        handle: String,
        /// Target directory or file path.
        #[clap(default_value = ".")]
        target: PathBuf,
        #[clap(flatten)]
        opts: RequestArgs,
    },
    /// Print a file to stdout.
    Cat {
        handle: String,
        #[clap(flatten)]
        opts: RequestArgs,
    },
    /// Overwrite a file with the contents of a local file.
    Write {
        handle: String,
        file: PathBuf,
        #[clap(flatten)]
        opts: RequestArgs,
    },
    /// Overwrite a file with content fetched from a URL.
    WriteUrl {
        handle: String,
        url: String,
        #[clap(flatten)]
        opts: RequestArgs,
    },
}

/// Flags shared by every sub-command.
#[derive(Args)]
struct RequestArgs {
    /// Ask the service to base64-decode the content.
    #[clap(long)]
    base64_decode: bool,
    /// Security policy for protected files.
    #[clap(long, requires = "signature")]
    policy: Option<String>,
    /// Signature matching --policy.
    #[clap(long, requires = "policy")]
    signature: Option<String>,
}

impl RequestArgs {
    fn security(&self) -> Option<Security> {
        match (&self.policy, &self.signature) {
            (Some(p), Some(s)) => Some(Security::new(p.as_str(), s.as_str())),
            _ => None,
        }
    }

    fn download_opts(&self) -> Option<DownloadOpts> {
        let security = self.security();
        (self.base64_decode || security.is_some()).then(|| DownloadOpts {
            base64_decode: self.base64_decode,
            security,
        })
    }

    fn write_opts(&self) -> Option<WriteOpts> {
        let security = self.security();
        (self.base64_decode || security.is_some()).then(|| WriteOpts {
            base64_decode: self.base64_decode,
            security,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("loading client configuration")?;
    let client = Client::with_config(config)?;

    match cli.command {
        Command::Download { handle, target, opts } => {
            let path = client
                .download_to_file(&Blob::new(handle.as_str()), opts.download_opts().as_ref(), &target)
                .await
                .with_context(|| format!("downloading {}", handle))?;
            println!("{} {}", "Saved".green().bold(), path.display());
        }
        Command::Cat { handle, opts } => {
            let mut stdout = tokio::io::stdout();
            client
                .download_to(&Blob::new(handle.as_str()), opts.download_opts().as_ref(), &mut stdout)
                .await
                .with_context(|| format!("downloading {}", handle))?;
            stdout.flush().await?;
        }
        Command::Write { handle, file, opts } => {
            let blob = client
                .write(&Blob::new(handle.as_str()), &file, opts.write_opts().as_ref())
                .await
                .with_context(|| format!("writing {} to {}", file.display(), handle))?;
            println!("{} {} {}", "Written".green().bold(), blob.handle(), serde_json::to_string_pretty(&blob)?);
        }
        Command::WriteUrl { handle, url, opts } => {
            let blob = client
                .write_url(&Blob::new(handle.as_str()), &url, opts.write_opts().as_ref())
                .await
                .with_context(|| format!("writing {} from {}", handle, url))?;
            println!("{} {} {}", "Written".green().bold(), blob.handle(), serde_json::to_string_pretty(&blob)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn write_url_parses_shared_flags() {
        let cli = Cli::try_parse_from([
            "fpcli", "write-url", "2HHH3", "https://www.filepicker.com/image.png",
            "--base64-decode", "--policy", "P", "--signature", "S",
        ])
        .unwrap();
        let Command::WriteUrl { handle, url, opts } = cli.command else {
            panic!("want write-url");
        };
        assert_eq!(handle, "2HHH3");
        assert_eq!(url, "https://www.filepicker.com/image.png");
        let write = opts.write_opts().unwrap();
        assert!(write.base64_decode);
        assert_eq!(write.security, Some(Security::new("P", "S")));
    }

    #[test]
    fn download_defaults_to_current_directory_without_options() {
        let cli = Cli::try_parse_from(["fpcli", "download", "2HHH3"]).unwrap();
        let Command::Download { target, opts, .. } = cli.command else {
            panic!("want download");
        };
        assert_eq!(target, PathBuf::from("."));
        assert!(opts.download_opts().is_none());
    }

    #[test]
    fn policy_requires_signature() {
        assert!(Cli::try_parse_from(["fpcli", "cat", "2HHH3", "--policy", "P"]).is_err());
        assert!(Cli::try_parse_from(["fpcli", "cat", "2HHH3", "--signature", "S"]).is_err());
    }
}
