//! Architecture resolution
//!
//! Maps host and target architecture names onto the canonical tokens used
//! as keys into the sysroot table (`amd64`, `i386`, `arm`, `arm64`, `mips`).
//!
//! Host tokens come from the host detector (`x64`, `ia32`, ...). Target
//! tokens come from the build configuration's `target_arch` value; an
//! unknown or missing target is not an error, it just means no explicit
//! target was configured.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SysrootError;

/// Architectures accepted by `--arch`
pub const VALID_ARCHS: [&str; 5] = ["arm", "arm64", "i386", "amd64", "mips"];

/// Canonical sysroot architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit x86
    Amd64,
    /// 32-bit x86
    I386,
    /// 32-bit ARM (hard float)
    Arm,
    /// 64-bit ARM
    Arm64,
    /// 32-bit little-endian MIPS
    Mips,
    /// PowerPC (no sysroot)
    Ppc,
    /// IBM Z (no sysroot)
    S390,
}

impl Arch {
    /// Resolve a host detector token
    pub fn from_host_token(token: &str) -> Result<Self, SysrootError> {
        match token {
            "x64" => Ok(Arch::Amd64),
            "ia32" => Ok(Arch::I386),
            "arm" => Ok(Arch::Arm),
            "arm64" => Ok(Arch::Arm64),
            "mips" => Ok(Arch::Mips),
            "ppc" => Ok(Arch::Ppc),
            "s390" => Ok(Arch::S390),
            other => Err(SysrootError::UnrecognizedArchitecture {
                arch: other.to_string(),
            }),
        }
    }

    /// Resolve a build configuration `target_arch` value
    pub fn from_target_token(token: &str) -> Option<Self> {
        match token {
            "x64" => Some(Arch::Amd64),
            "ia32" => Some(Arch::I386),
            "arm" => Some(Arch::Arm),
            "arm64" => Some(Arch::Arm64),
            "mipsel" => Some(Arch::Mips),
            _ => None,
        }
    }

    /// Whether any sysroot image exists for this architecture
    pub fn has_sysroot(self) -> bool {
        !matches!(self, Arch::Ppc | Arch::S390)
    }

    /// Canonical token
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::I386 => "i386",
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
            Arch::Mips => "mips",
            Arch::Ppc => "ppc",
            Arch::S390 => "s390",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = SysrootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd64" => Ok(Arch::Amd64),
            "i386" => Ok(Arch::I386),
            "arm" => Ok(Arch::Arm),
            "arm64" => Ok(Arch::Arm64),
            "mips" => Ok(Arch::Mips),
            "ppc" => Ok(Arch::Ppc),
            "s390" => Ok(Arch::S390),
            other => Err(SysrootError::UnknownArchitecture {
                arch: other.to_string(),
            }),
        }
    }
}
