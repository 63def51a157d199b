//! Infrastructure layer
//!
//! Handles all I/O operations: network, filesystem, archives and host probing.

pub mod archive;
pub mod checksum;
pub mod dirs;
pub mod download;
pub mod filesystem;
pub mod host;
