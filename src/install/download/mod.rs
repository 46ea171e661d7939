//! Release download and archive extraction
//!
//! This module handles resolving the release asset for the running platform,
//! downloading it, and extracting the mcpx binary from it.
//!
//! ## Module Organization
//!
//! - `platform` - Platform detection and normalisation
//! - `release` - Asset naming and download URL formatting
//! - `core` - HTTP transport
//! - `extract` - `.tar.gz` extraction (executable + best-effort man page)

mod core;
mod extract;
mod platform;
mod release;

// Re-export public API
pub use self::core::{Fetch, HttpFetcher};
pub use extract::extract_binary;
pub use platform::{Arch, Os, Platform};
pub use release::ReleaseCoordinate;
