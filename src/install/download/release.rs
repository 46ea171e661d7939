//! Release coordinates: version + platform → asset name and download URL

use super::platform::Platform;
use crate::config::{ShimConfig, TOOL_NAME};

/// Version and platform naming one distributable archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCoordinate {
    pub version: String,
    pub platform: Platform,
}

impl ReleaseCoordinate {
    pub fn new(version: impl Into<String>, platform: Platform) -> Self {
        Self {
            version: version.into(),
            platform,
        }
    }

    /// `mcpx_<version>_<os>_<arch>.tar.gz`
    pub fn asset_name(&self) -> String {
        format!(
            "{}_{}_{}_{}.tar.gz",
            TOOL_NAME, self.version, self.platform.os, self.platform.arch
        )
    }

    pub fn tag(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.version)
    }

    /// `<base>/<tag_prefix><version>/<asset>`
    pub fn download_url(&self, config: &ShimConfig) -> String {
        format!(
            "{}/{}/{}",
            config.release_base_url.trim_end_matches('/'),
            self.tag(&config.release_tag_prefix),
            self.asset_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RELEASE_BASE_URL;

    fn config(base: &str, prefix: &str) -> ShimConfig {
        ShimConfig {
            version: "1.2.3".to_string(),
            release_base_url: base.to_string(),
            release_tag_prefix: prefix.to_string(),
            skip_download: false,
            cache_root: "/c".into(),
            data_root: "/d".into(),
        }
    }

    fn linux_amd64() -> ReleaseCoordinate {
        ReleaseCoordinate::new("1.2.3", Platform::resolve("linux", "amd64").unwrap())
    }

    #[test]
    fn default_url() {
        let url = linux_amd64().download_url(&config(DEFAULT_RELEASE_BASE_URL, "v"));
        assert_eq!(
            url,
            "https://github.com/lydakis/mcpx/releases/download/v1.2.3/mcpx_1.2.3_linux_amd64.tar.gz"
        );
    }

    #[test]
    fn trailing_slashes_trimmed() {
        let url = linux_amd64().download_url(&config("http://127.0.0.1:8080/dl//", "v"));
        assert_eq!(url, "http://127.0.0.1:8080/dl/v1.2.3/mcpx_1.2.3_linux_amd64.tar.gz");
    }

    #[test]
    fn custom_tag_prefix() {
        let coord = ReleaseCoordinate::new("0.9.0", Platform::resolve("Darwin", "arm64").unwrap());
        let url = coord.download_url(&config("http://mirror", "release-"));
        assert_eq!(url, "http://mirror/release-0.9.0/mcpx_0.9.0_darwin_arm64.tar.gz");
    }
}
