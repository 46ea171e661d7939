#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Isolated home, cache, data, temp and PATH roots for one launcher run
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let sandbox = Self {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        for dir in ["home", "cache", "data", "tmp", "bin"] {
            fs::create_dir_all(sandbox.root.path().join(dir)).unwrap();
        }
        sandbox
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn binary_path(&self) -> PathBuf {
        self.path("cache").join("mcpx-go").join(VERSION).join("mcpx")
    }

    pub fn manpage_path(&self) -> PathBuf {
        self.path("data").join("man").join("man1").join("mcpx.1")
    }

    /// Entries left behind in the sandbox's TMPDIR
    pub fn tmp_entries(&self) -> Vec<PathBuf> {
        fs::read_dir(self.path("tmp"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    /// Launcher command with a fully controlled environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mcpx"));
        cmd.env_clear()
            .env("HOME", self.path("home"))
            .env("XDG_CACHE_HOME", self.path("cache"))
            .env("XDG_DATA_HOME", self.path("data"))
            .env("TMPDIR", self.path("tmp"))
            .env("PATH", self.path("bin"));
        cmd
    }

    /// Place an executable script at `path`
    pub fn write_script(&self, path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        make_executable(path);
    }
}

pub fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Gzip-compressed tar bytes containing regular files `(name, contents)`
pub fn tar_gz(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

pub const ECHO_SCRIPT: &str = r#"echo "mcpx release"
for arg in "$@"; do echo "arg:$arg"; done"#;
