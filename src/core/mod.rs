//! Core installer logic
//!
//! # Submodules
//!
//! - [`arch`] - Canonical architecture tokens
//! - [`table`] - Sysroot records keyed by (platform, arch)
//! - [`policy`] - Default sysroot selection
//! - [`hook`] - Hook mode planning
//! - [`install`] - Fetch-verify-install pipeline
//! - [`settings`] - Settings file

pub mod arch;
pub mod hook;
pub mod install;
pub mod policy;
pub mod settings;
pub mod table;
