//! Default configuration values

/// Maximum number of download attempts per tarball
pub const MAX_DOWNLOAD_RETRIES: u32 = 3;

/// Base delay between download attempts (in milliseconds)
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Read size used when hashing a downloaded tarball
pub const CHECKSUM_CHUNK_SIZE: usize = 1024 * 1024;

/// Name of the stamp file inside each sysroot directory
pub const STAMP_FILE: &str = ".stamp";

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "config.toml";

/// Sysroot parent directory, relative to the working directory
pub const LINUX_DIR: &str = "build/linux";
