// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the raw CSV lives: an HTTP(S) endpoint or a file on disk.
#[derive(Debug, Clone)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

impl Source {
    /// Anything that parses as an http(s) URL is fetched; everything else is
    /// treated as a local path.
    pub fn parse(raw: &str) -> Source {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Url(url),
            _ => Source::File(PathBuf::from(raw)),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("building HTTP client")
}

/// One-shot load of the source CSV text. A failure here is terminal for the
/// whole pipeline; there is no retry.
pub async fn load_csv_text(client: &Client, source: &Source) -> Result<String> {
    match source {
        Source::Url(url) => {
            debug!("fetching {}", url);
            client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("GET {} failed", url))?
                .error_for_status()
                .with_context(|| format!("non-success status from {}", url))?
                .text()
                .await
                .with_context(|| format!("reading body from {}", url))
        }
        Source::File(path) => {
            debug!("reading {}", path.display());
            fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))
        }
    }
}
