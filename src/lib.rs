//! Sysroot installer - Debian sysroot images for cross-compiling
//!
//! This library downloads prebuilt Debian root filesystem images, verifies
//! their checksums and unpacks them into the build tree. A `.stamp` file in
//! each sysroot records the URL it was installed from, so repeated runs are
//! a no-op.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Architecture mapping, sysroot table, selection policy and the install pipeline
//! - [`infra`] - Infrastructure layer (network, filesystem, archives, host probing)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
