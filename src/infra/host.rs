//! Host probing
//!
//! Detection of the host operating system, the host architecture and the
//! build configuration's target architecture. Callers treat these as black
//! boxes behind [`HostProbe`] so tests can substitute fixed answers.

use crate::core::arch::Arch;
use crate::error::SysrootError;

/// Environment variable holding the build configuration defines
pub const ENV_GYP_DEFINES: &str = "GYP_DEFINES";

/// Source of host and build configuration facts
pub trait HostProbe {
    /// Whether the host runs Linux
    fn is_linux(&self) -> bool;

    /// Host architecture token (`x64`, `ia32`, `arm`, `arm64`, `mips`, `ppc`, `s390`, ...)
    fn host_arch_token(&self) -> String;

    /// The configured `target_arch`, if any
    fn target_arch_token(&self) -> Option<String>;

    /// Canonical host architecture
    fn host_arch(&self) -> Result<Arch, SysrootError> {
        Arch::from_host_token(&self.host_arch_token())
    }

    /// Canonical target architecture, or `None` when no explicit target is set
    fn target_arch(&self) -> Option<Arch> {
        self.target_arch_token()
            .as_deref()
            .and_then(Arch::from_target_token)
    }
}

/// Probe backed by the running process
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn is_linux(&self) -> bool {
        std::env::consts::OS == "linux"
    }

    fn host_arch_token(&self) -> String {
        host_token_for(std::env::consts::ARCH)
    }

    fn target_arch_token(&self) -> Option<String> {
        let defines = std::env::var(ENV_GYP_DEFINES).ok()?;
        parse_define(&defines, "target_arch")
    }
}

/// Translate a Rust `target_arch` name into a host detector token
pub fn host_token_for(rust_arch: &str) -> String {
    match rust_arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "arm" => "arm",
        "aarch64" => "arm64",
        "mips" | "mips64" => "mips",
        "powerpc" | "powerpc64" => "ppc",
        "s390x" => "s390",
        other => other,
    }
    .to_string()
}

/// Find `key=value` in a whitespace-separated define list
///
/// Later definitions win; surrounding quotes on the value are removed.
pub fn parse_define(defines: &str, key: &str) -> Option<String> {
    defines
        .split_whitespace()
        .filter_map(|item| item.split_once('='))
        .filter(|(k, _)| *k == key)
        .map(|(_, v)| v.trim_matches(|c| c == '"' || c == '\'').to_string())
        .last()
}
