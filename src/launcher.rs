//! Process replacement with `PATH` fallback
//!
//! On success control never comes back here: the process image becomes the
//! mcpx binary. Every path that does return is a failure path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::debug;

use crate::config::{ShimConfig, TOOL_NAME};
use crate::error::ShimError;
use crate::install::ensure_binary;

/// Acquire and exec mcpx with `args` (argv without the program name)
pub fn run(args: Vec<OsString>) -> ExitCode {
    let primary = match acquire() {
        Ok(binary) => anyhow::Error::from(replace_process(&binary, &args)),
        Err(e) => e,
    };
    debug!("Primary launch failed: {primary:#}");

    if let Some(fallback) = find_fallback() {
        debug!("Falling back to {}", fallback.display());
        let err = replace_process(&fallback, &args);
        debug!("Fallback launch failed: {err}");
    }

    eprintln!("{TOOL_NAME}: {primary:#}");
    ExitCode::FAILURE
}

fn acquire() -> anyhow::Result<PathBuf> {
    let config = ShimConfig::from_env()?;
    ensure_binary(&config, false)
}

/// Replace the current process with `program`; returns only on failure
#[cfg(unix)]
pub fn replace_process(program: &Path, args: &[OsString]) -> ShimError {
    let err = exec::Command::new(program).args(args).exec();
    ShimError::Exec {
        program: program.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Without execve, run `program` as a child and exit with its status
#[cfg(not(unix))]
pub fn replace_process(program: &Path, args: &[OsString]) -> ShimError {
    match std::process::Command::new(program).args(args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => ShimError::Exec {
            program: program.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

/// First `mcpx` on `PATH` that is not this launcher itself
fn find_fallback() -> Option<PathBuf> {
    let own = std::env::current_exe()
        .ok()
        .and_then(|p| p.canonicalize().ok());
    let candidates = which::which_all(TOOL_NAME).ok()?;
    pick_fallback(candidates, own.as_deref())
}

fn pick_fallback<I>(candidates: I, own: Option<&Path>) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates.into_iter().find(|candidate| {
        let is_self = match (own, candidate.canonicalize()) {
            (Some(own), Ok(resolved)) => resolved == own,
            _ => false,
        };
        if is_self {
            debug!("Skipping {} (this launcher)", candidate.display());
        }
        !is_self
    })
}
