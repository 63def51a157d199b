//! Configuration and constants
//!
//! - [`defaults`] - Default values for the install pipeline
//! - [`urls`] - Download location of the sysroot images
//! - [`sysroots`] - Built-in sysroot records

pub mod defaults;
pub mod sysroots;
pub mod urls;
