//! Error types for sysroot-installer
//!
//! Domain-specific error types using thiserror.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tarball transfer errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Connection or body stream failed
    #[error("Request for '{url}' failed: {error}")]
    Request { url: String, error: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching '{url}'")]
    Status { url: String, status: u16 },

    /// Tarball could not be written
    #[error("Failed to write tarball '{path}': {error}")]
    Write { path: PathBuf, error: String },
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Archive could not be opened
    #[error("Failed to open archive '{path}': {error}")]
    Open { path: PathBuf, error: String },

    /// Archive could not be unpacked
    #[error("Failed to extract '{path}' into '{dest}': {error}")]
    Unpack {
        path: PathBuf,
        dest: PathBuf,
        error: String,
    },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Configuration errors (settings file and sysroot table)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse a config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Record checksum is not a SHA-1 or SHA-256 hex digest
    #[error("Sysroot {platform} {arch} has an invalid checksum '{checksum}'")]
    InvalidChecksum {
        platform: String,
        arch: String,
        checksum: String,
    },

    /// Same (platform, arch) listed twice
    #[error("Sysroot {platform} {arch} is defined more than once")]
    DuplicateSysroot { platform: String, arch: String },
}

impl ConfigError {
    /// Parse failure for `content` read from `path`, flattened to one line
    pub fn parse(path: &Path, content: &str, error: &toml::de::Error) -> Self {
        let message = error
            .message()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        let error = match error.span() {
            Some(span) => {
                let before = content.get(..span.start).unwrap_or(content);
                let line = before.matches('\n').count() + 1;
                let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
                format!("line {line}, column {column}: {message}")
            }
            None => message,
        };

        Self::ParseError {
            path: path.to_path_buf(),
            error,
        }
    }
}

/// Top-level installer error type
#[derive(Error, Debug)]
pub enum SysrootError {
    /// Bad or missing command-line arguments
    #[error("{0}")]
    Usage(String),

    /// Host architecture detector returned an unmapped token
    #[error("Unrecognized host arch: {arch}")]
    UnrecognizedArchitecture { arch: String },

    /// Architecture has no default sysroot
    #[error("Unknown architecture: {arch}")]
    UnknownArchitecture { arch: String },

    /// No table entry for the requested (platform, arch)
    #[error("No sysroot for: {platform} {arch}")]
    UnknownSysroot { platform: String, arch: String },

    /// Downloaded tarball does not match the expected digest
    #[error("Tarball checksum is wrong for '{tarball}'. Expected {expected}, actual: {actual}")]
    ChecksumMismatch {
        tarball: PathBuf,
        expected: String,
        actual: String,
    },

    /// Download error
    #[error("Transfer failed: {0}")]
    Transfer(#[from] DownloadError),

    /// Extraction error
    #[error("Transfer failed: {0}")]
    Archive(#[from] ArchiveError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
