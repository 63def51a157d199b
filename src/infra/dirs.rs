//! Platform-specific directory management
//!
//! Locates the settings file. Follows the XDG Base Directory Specification
//! on Linux and standard locations on macOS.
//!
//! `SYSROOT_INSTALLER_CONFIG_DIR` overrides the default config directory.

use std::env;
use std::path::PathBuf;

use crate::config::defaults::{LINUX_DIR, SETTINGS_FILE};

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "SYSROOT_INSTALLER_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "sysroot-installer";

/// Directory provider for the installer
#[derive(Debug, Clone)]
pub struct InstallerDirs {
    config_dir: PathBuf,
}

impl InstallerDirs {
    /// Checks the environment first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Path to `config.toml` in the config directory
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// - Linux: `$XDG_CONFIG_HOME/sysroot-installer` or `~/.config/sysroot-installer`
    /// - macOS: `~/Library/Application Support/sysroot-installer`
    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for InstallerDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Default sysroot parent directory: `build/linux` under the working directory
pub fn default_linux_dir() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(LINUX_DIR)
}
