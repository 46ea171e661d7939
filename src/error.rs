//! Error taxonomy for acquiring and launching the mcpx binary

use std::path::PathBuf;

use crate::config::{SKIP_DOWNLOAD_ENV, TOOL_NAME};

/// Errors raised while resolving, downloading, extracting or executing mcpx
#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("bundled binary download skipped by {}=1", SKIP_DOWNLOAD_ENV)]
    DownloadSkipped,

    /// Server answered with a non-2xx status
    #[error("failed to download {url}: HTTP {status}")]
    Http { url: String, status: u16 },

    /// DNS, connect or body-stream failure
    #[error("failed to download {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("failed to initialise HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("archive did not contain {} binary", TOOL_NAME)]
    MissingExecutable,

    #[error("failed to read {} binary from archive", TOOL_NAME)]
    ArchiveRead(#[source] std::io::Error),

    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute {}: {}", .program.display(), .reason)]
    Exec { program: PathBuf, reason: String },
}

impl ShimError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
