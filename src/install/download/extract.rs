//! Release archive extraction
//!
//! Pulls the mcpx executable out of a `.tar.gz` release archive, plus the
//! optional `mcpx.1` man page. Only the executable is mandatory; the man page
//! install never affects the outcome.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::debug;
use tar::Archive;

use crate::config::{MANPAGE_NAME, TOOL_NAME};
use crate::error::ShimError;

const EXECUTABLE_MODE: u32 = 0o755;
const MANPAGE_MODE: u32 = 0o644;
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Extract the executable to `output_path`, then best-effort the man page into `man_dir`
pub fn extract_binary(
    archive_path: &Path,
    output_path: &Path,
    man_dir: &Path,
) -> Result<PathBuf, ShimError> {
    install_executable(archive_path, output_path)?;

    match install_manpage(archive_path, man_dir) {
        Ok(Some(path)) => debug!("Installed man page at {}", path.display()),
        Ok(None) => debug!("Archive has no {MANPAGE_NAME}, skipping man page"),
        Err(e) => debug!("Man page install failed, ignoring: {e:?}"),
    }

    Ok(output_path.to_path_buf())
}

fn install_executable(archive_path: &Path, output_path: &Path) -> Result<(), ShimError> {
    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let found = with_entry(archive_path, TOOL_NAME, |entry| {
        fs::create_dir_all(parent).map_err(|e| {
            ShimError::io(format!("Failed to create directory {}", parent.display()), e)
        })?;

        // Stage next to the target so the final rename stays on one filesystem
        let mut staged = tempfile::Builder::new()
            .prefix(".mcpx-")
            .tempfile_in(parent)
            .map_err(|e| {
                ShimError::io(format!("Failed to create temp file in {}", parent.display()), e)
            })?;

        stream_copy(entry, staged.as_file_mut(), output_path)?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| ShimError::io(format!("Failed to flush {}", output_path.display()), e))?;
        set_mode(staged.path(), EXECUTABLE_MODE)?;

        staged.persist(output_path).map_err(|e| {
            ShimError::io(format!("Failed to install {}", output_path.display()), e.error)
        })?;
        Ok(())
    })?;

    found.ok_or(ShimError::MissingExecutable)
}

fn install_manpage(archive_path: &Path, man_dir: &Path) -> Result<Option<PathBuf>, ShimError> {
    with_entry(archive_path, MANPAGE_NAME, |entry| {
        fs::create_dir_all(man_dir).map_err(|e| {
            ShimError::io(format!("Failed to create directory {}", man_dir.display()), e)
        })?;

        let dest = man_dir.join(MANPAGE_NAME);
        let mut file = File::create(&dest)
            .map_err(|e| ShimError::io(format!("Failed to create {}", dest.display()), e))?;
        stream_copy(entry, &mut file, &dest)?;
        set_mode(&dest, MANPAGE_MODE)?;
        Ok(dest)
    })
}

/// Run `f` on the first regular-file entry whose base name is `name`
///
/// Returns `Ok(None)` if no such entry exists.
fn with_entry<T, F>(archive_path: &Path, name: &str, f: F) -> Result<Option<T>, ShimError>
where
    F: FnOnce(&mut dyn Read) -> Result<T, ShimError>,
{
    let file = File::open(archive_path).map_err(|e| {
        ShimError::io(format!("Failed to open archive {}", archive_path.display()), e)
    })?;
    let mut archive = Archive::new(GzDecoder::new(file));

    for entry in archive.entries().map_err(ShimError::ArchiveRead)? {
        let mut entry = entry.map_err(ShimError::ArchiveRead)?;

        if !entry.header().entry_type().is_file() {
            continue;
        }
        let matches = {
            let path = entry.path().map_err(ShimError::ArchiveRead)?;
            path.file_name() == Some(OsStr::new(name))
        };
        if matches {
            return f(&mut entry).map(Some);
        }
    }

    Ok(None)
}

fn stream_copy(reader: &mut dyn Read, writer: &mut dyn Write, dest: &Path) -> Result<u64, ShimError> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ShimError::ArchiveRead(e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| ShimError::io(format!("Failed to write {}", dest.display()), e))?;
        total += n as u64;
    }

    Ok(total)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ShimError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
        ShimError::io(format!("Failed to set permissions on {}", path.display()), e)
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ShimError> {
    Ok(())
}
