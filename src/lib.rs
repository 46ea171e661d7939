//! mcpx launcher library
//!
//! Resolves the running platform, fetches the matching prebuilt `mcpx`
//! release into a per-version cache, and replaces the current process with
//! it. The `mcpx` binary in this crate is a thin wrapper around
//! [`launcher::run`].

pub mod config;
pub mod error;
pub mod install;
pub mod launcher;

#[cfg(test)]
mod testutil;

pub use config::ShimConfig;
pub use error::ShimError;
pub use install::{ensure_binary, ensure_binary_with};
