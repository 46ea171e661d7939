//! Binary acquisition
//!
//! Guarantees a runnable mcpx binary exists in the per-version cache,
//! downloading and extracting the matching release when it is missing.

pub mod download;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::{ShimConfig, TOOL_NAME};
use crate::error::ShimError;
use download::{Fetch, HttpFetcher, Platform, ReleaseCoordinate, extract_binary};

/// Ensure the mcpx binary for this package version is present, returning its path
///
/// # Behavior
/// - Cached binary and `!force` → return immediately (no network, no HTTP client)
/// - `MCPX_GO_SKIP_DOWNLOAD=1` → fail with [`ShimError::DownloadSkipped`]
/// - Otherwise download the release archive and extract it into the cache
pub fn ensure_binary(config: &ShimConfig, force: bool) -> Result<PathBuf> {
    if let Some(path) = preflight(config, force)? {
        return Ok(path);
    }
    let fetcher = HttpFetcher::new()?;
    download_and_install(config, &fetcher)
}

/// Same contract as [`ensure_binary`] with a caller-supplied transport
pub fn ensure_binary_with<F>(config: &ShimConfig, fetcher: &F, force: bool) -> Result<PathBuf>
where
    F: Fetch + ?Sized,
{
    if let Some(path) = preflight(config, force)? {
        return Ok(path);
    }
    download_and_install(config, fetcher)
}

/// Cache hit → `Some(path)`; download needed → `None`; download disabled → error
fn preflight(config: &ShimConfig, force: bool) -> Result<Option<PathBuf>, ShimError> {
    let target = config.binary_path();
    if target.exists() && !force {
        debug!("Using cached {}", target.display());
        return Ok(Some(target));
    }
    if config.skip_download {
        return Err(ShimError::DownloadSkipped);
    }
    Ok(None)
}

fn download_and_install<F>(config: &ShimConfig, fetcher: &F) -> Result<PathBuf>
where
    F: Fetch + ?Sized,
{
    let platform = Platform::detect()?;
    let url = ReleaseCoordinate::new(config.version.as_str(), platform).download_url(config);
    let target = config.binary_path();

    let version_dir = config.version_dir();
    fs::create_dir_all(&version_dir).with_context(|| {
        format!("Failed to create cache directory {}", version_dir.display())
    })?;

    // Removed on drop, whichever way this function exits
    let mut archive = tempfile::Builder::new()
        .prefix("mcpx-go-")
        .suffix(".tar.gz")
        .tempfile()
        .context("Failed to create temporary download file")?;

    fetcher.fetch(&url, archive.as_file_mut())?;
    extract_binary(archive.path(), &target, &config.man_dir())?;

    info!("Installed {} {} at {}", TOOL_NAME, config.version, target.display());
    Ok(target)
}
