//! Release archive download

use std::io::Write;
use std::time::Duration;

use log::{debug, info};

use crate::error::ShimError;

// Connect bound only; release archives may take arbitrarily long to stream
const DOWNLOAD_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport seam for fetching a release archive
pub trait Fetch {
    /// Stream the body at `url` into `dest`, returning the byte count
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> Result<u64, ShimError>;
}

/// Blocking HTTP(S) fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ShimError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(DOWNLOAD_CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .user_agent(concat!("mcpx-go/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ShimError::HttpClient)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> Result<u64, ShimError> {
        info!("Downloading {url}");

        let transport = |e: reqwest::Error| ShimError::Transport {
            url: url.to_string(),
            reason: root_cause(&e),
        };

        let mut response = self.client.get(url).send().map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShimError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let written = std::io::copy(&mut response, dest).map_err(|e| ShimError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Downloaded {written} bytes from {url}");
        Ok(written)
    }
}

/// Innermost message of an error chain, e.g. "Connection refused (os error 111)"
fn root_cause(err: &reqwest::Error) -> String {
    let mut current: &dyn std::error::Error = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
