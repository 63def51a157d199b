//! Sysroot download locations

/// Storage bucket serving the sysroot tarballs
pub const URL_PREFIX: &str = "https://commondatastorage.googleapis.com";

/// Path segment between the prefix and the revision
pub const URL_PATH: &str = "chrome-linux-sysroot/toolchain";
