use std::path::PathBuf;

use crate::error::ShimError;

/// Bare name of the wrapped executable
pub const TOOL_NAME: &str = "mcpx";

/// Cache directory owned by this launcher (`<tool>-<lang>`)
pub const PACKAGE_DIR: &str = "mcpx-go";

/// File name of the manual page shipped in release archives
pub const MANPAGE_NAME: &str = "mcpx.1";

pub const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com/lydakis/mcpx/releases/download";
pub const DEFAULT_RELEASE_TAG_PREFIX: &str = "v";

pub const RELEASE_BASE_URL_ENV: &str = "MCPX_GO_RELEASE_BASE_URL";
pub const RELEASE_TAG_PREFIX_ENV: &str = "MCPX_GO_RELEASE_TAG_PREFIX";
pub const SKIP_DOWNLOAD_ENV: &str = "MCPX_GO_SKIP_DOWNLOAD";
pub const LOG_ENV: &str = "MCPX_GO_LOG";

/// Launcher configuration, populated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    /// Release version to fetch; always the launcher's own package version
    pub version: String,
    pub release_base_url: String,
    pub release_tag_prefix: String,
    pub skip_download: bool,
    pub cache_root: PathBuf,
    /// Root under which `man/man1` is populated
    pub data_root: PathBuf,
}

impl ShimConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ShimError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    ///
    /// Empty `XDG_*` and base URL values are treated as unset. An empty tag
    /// prefix is honoured so mirrors can publish bare-version tags.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShimError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let home = || -> Result<PathBuf, ShimError> {
            non_empty("HOME")
                .map(PathBuf::from)
                .or_else(dirs::home_dir)
                .ok_or(ShimError::NoHomeDirectory)
        };

        let cache_root = match non_empty("XDG_CACHE_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => home()?.join(".cache"),
        };
        let data_root = match non_empty("XDG_DATA_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => home()?.join(".local").join("share"),
        };

        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            release_base_url: non_empty(RELEASE_BASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_RELEASE_BASE_URL.to_string()),
            release_tag_prefix: lookup(RELEASE_TAG_PREFIX_ENV)
                .unwrap_or_else(|| DEFAULT_RELEASE_TAG_PREFIX.to_string()),
            skip_download: lookup(SKIP_DOWNLOAD_ENV).as_deref() == Some("1"),
            cache_root,
            data_root,
        })
    }

    pub fn package_dir(&self) -> PathBuf {
        self.cache_root.join(PACKAGE_DIR)
    }

    pub fn version_dir(&self) -> PathBuf {
        self.package_dir().join(&self.version)
    }

    /// `<cache_root>/mcpx-go/<version>/mcpx`
    pub fn binary_path(&self) -> PathBuf {
        self.version_dir().join(TOOL_NAME)
    }

    /// `<data_root>/man/man1`
    pub fn man_dir(&self) -> PathBuf {
        self.data_root.join("man").join("man1")
    }
}
