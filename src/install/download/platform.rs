//! Platform detection for release asset selection

use std::fmt;

use log::debug;
use once_cell::sync::OnceCell;

use crate::error::ShimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Darwin,
    Linux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Os {
    /// Token used in release asset names
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
        }
    }
}

impl Arch {
    /// Token used in release asset names
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system and architecture pair a release is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

/// Global cache for platform detection (initialized once, used everywhere)
static PLATFORM_CACHE: OnceCell<Platform> = OnceCell::new();

impl Platform {
    /// Map raw system-reported names through the supported platform table
    pub fn resolve(raw_os: &str, raw_arch: &str) -> Result<Self, ShimError> {
        let os_name = raw_os.to_lowercase();
        let machine = raw_arch.to_lowercase();

        let os = match os_name.as_str() {
            "darwin" => Os::Darwin,
            "linux" => Os::Linux,
            _ => return Err(ShimError::UnsupportedPlatform(os_name)),
        };
        let arch = match machine.as_str() {
            "x86_64" | "amd64" => Arch::Amd64,
            "arm64" | "aarch64" => Arch::Arm64,
            _ => return Err(ShimError::UnsupportedArchitecture(machine)),
        };

        Ok(Self { os, arch })
    }

    /// Detect current platform (cached after first call)
    pub fn detect() -> Result<Self, ShimError> {
        PLATFORM_CACHE
            .get_or_try_init(|| {
                let (raw_os, raw_arch) = raw_system_names();
                debug!("Detected system {raw_os} {raw_arch}");
                Self::resolve(&raw_os, &raw_arch)
            })
            .copied()
    }
}

/// Kernel name and machine hardware name as reported by uname(2)
#[cfg(unix)]
fn raw_system_names() -> (String, String) {
    match nix::sys::utsname::uname() {
        Ok(uts) => (
            uts.sysname().to_string_lossy().into_owned(),
            uts.machine().to_string_lossy().into_owned(),
        ),
        Err(e) => {
            debug!("uname failed ({e}), using compile-time target names");
            compile_time_names()
        }
    }
}

#[cfg(not(unix))]
fn raw_system_names() -> (String, String) {
    compile_time_names()
}

fn compile_time_names() -> (String, String) {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    (os.to_string(), std::env::consts::ARCH.to_string())
}
