//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};
use tempfile::TempDir;

/// Sysroot directory used by the test tables
pub const SYSROOT_DIR: &str = "debian_wheezy_amd64-sysroot";

/// Tarball name used by the test tables
pub const TARBALL: &str = "debian_wheezy_amd64_sysroot.tgz";

/// Test workspace context
///
/// Creates a temporary directory holding the linux dir, the config dir
/// and any table files a test needs.
pub struct TestWorkspace {
    /// Temporary directory for the workspace
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Parent directory of the sysroots
    pub fn linux_dir(&self) -> PathBuf {
        self.dir.path().join("build").join("linux")
    }

    /// Directory of the default test sysroot
    pub fn sysroot(&self) -> PathBuf {
        self.linux_dir().join(SYSROOT_DIR)
    }

    /// Config directory for settings
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a sysroot table with a single Wheezy amd64 entry
    pub fn write_table(&self, revision: &str, checksum: &str) -> PathBuf {
        self.create_file("sysroots.toml", &table_toml(revision, checksum))
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML for a table with a single Wheezy amd64 entry
pub fn table_toml(revision: &str, checksum: &str) -> String {
    format!(
        r#"[[sysroot]]
platform = "Wheezy"
arch = "amd64"
revision = "{revision}"
tarball = "{TARBALL}"
checksum = "{checksum}"
sysroot_dir = "{SYSROOT_DIR}"
"#
    )
}

/// Build a gzipped tarball from (path, content) pairs
pub fn make_tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .expect("Failed to append tar entry");
    }
    builder
        .into_inner()
        .expect("Failed to finish tar")
        .finish()
        .expect("Failed to finish gzip")
}

/// Lowercase hex SHA1 of `data`
pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Read a file to string, panicking with the path on failure
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}
