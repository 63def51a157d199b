//! Installer settings
//!
//! Reads optional settings from `config.toml` in the config directory.
//! Command-line flags and environment variables take precedence over these
//! values, which in turn override the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{defaults, urls};
use crate::error::ConfigError;
use crate::infra::dirs::InstallerDirs;

/// Settings file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Where tarballs are downloaded from
    #[serde(default)]
    pub source: SourceConfig,

    /// Where and how sysroots are installed
    #[serde(default)]
    pub install: InstallConfig,
}

/// Download source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Server prefix, e.g. `https://commondatastorage.googleapis.com`
    pub url_prefix: Option<String>,

    /// Path segment between prefix and revision
    pub url_path: Option<String>,

    /// Download attempts per tarball
    pub max_retries: Option<u32>,
}

/// Install location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Parent directory of the sysroot directories
    pub linux_dir: Option<PathBuf>,

    /// Leave a half-built sysroot on disk after a failure
    pub keep_failed: Option<bool>,

    /// Sysroot table file replacing the built-in table
    pub table: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the config directory
    ///
    /// A missing file yields the defaults.
    pub fn load(dirs: &InstallerDirs) -> Result<Self, ConfigError> {
        Self::load_from_path(&dirs.settings_path())
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::parse(path, &content, &e))
    }

    /// Effective URL prefix, without a trailing slash
    #[must_use]
    pub fn url_prefix(&self) -> &str {
        self.source
            .url_prefix
            .as_deref()
            .unwrap_or(urls::URL_PREFIX)
            .trim_end_matches('/')
    }

    /// Effective URL path segment, without surrounding slashes
    #[must_use]
    pub fn url_path(&self) -> &str {
        self.source
            .url_path
            .as_deref()
            .unwrap_or(urls::URL_PATH)
            .trim_matches('/')
    }

    /// Effective download attempts
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.source
            .max_retries
            .unwrap_or(defaults::MAX_DOWNLOAD_RETRIES)
    }

    /// Whether failed installs are left on disk
    #[must_use]
    pub fn keep_failed(&self) -> bool {
        self.install.keep_failed.unwrap_or(false)
    }
}
