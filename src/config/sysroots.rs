//! Built-in sysroot records
//!
//! Debian Wheezy is the oldest supported distribution; arm64 starts at Jessie.
//! Ubuntu Precise is kept for desktop Chromium OS builds.

use crate::core::arch::Arch;

/// Revision shared by every built-in image
pub const SYSROOT_REVISION: &str = "e964581657e61f47a74b7e2e34e33744ac53d5a6";

/// One row of the built-in table
#[derive(Debug, Clone, Copy)]
pub struct BuiltinSysroot {
    pub platform: &'static str,
    pub arch: Arch,
    pub revision: &'static str,
    pub tarball: &'static str,
    pub sha1sum: &'static str,
    pub sysroot_dir: &'static str,
}

/// Platform installed by hook mode regardless of host architecture
pub const LEGACY_DESKTOP_PLATFORM: &str = "Precise";

/// Architecture of the legacy desktop sysroot
pub const LEGACY_DESKTOP_ARCH: Arch = Arch::Amd64;

pub const BUILTIN_SYSROOTS: &[BuiltinSysroot] = &[
    BuiltinSysroot {
        platform: "Wheezy",
        arch: Arch::Amd64,
        revision: SYSROOT_REVISION,
        tarball: "debian_wheezy_amd64_sysroot.tgz",
        sha1sum: "d67377aedc8ca477a50cc75aeb59542c8cd98894",
        sysroot_dir: "debian_wheezy_amd64-sysroot",
    },
    BuiltinSysroot {
        platform: "Wheezy",
        arch: Arch::Arm,
        revision: SYSROOT_REVISION,
        tarball: "debian_wheezy_arm_sysroot.tgz",
        sha1sum: "ab538d29171823951a330ba7f8ac1502f3670ebe",
        sysroot_dir: "debian_wheezy_arm-sysroot",
    },
    BuiltinSysroot {
        platform: "Wheezy",
        arch: Arch::I386,
        revision: SYSROOT_REVISION,
        tarball: "debian_wheezy_i386_sysroot.tgz",
        sha1sum: "8d7f58fc77be09cad83f246a5d730de45ac48efb",
        sysroot_dir: "debian_wheezy_i386-sysroot",
    },
    BuiltinSysroot {
        platform: "Wheezy",
        arch: Arch::Mips,
        revision: SYSROOT_REVISION,
        tarball: "debian_wheezy_mips_sysroot.tgz",
        sha1sum: "9960b7398487038709bdb8419c144ebee5eff061",
        sysroot_dir: "debian_wheezy_mips-sysroot",
    },
    BuiltinSysroot {
        platform: "Jessie",
        arch: Arch::Arm64,
        revision: SYSROOT_REVISION,
        tarball: "debian_jessie_arm64_sysroot.tgz",
        sha1sum: "035e6abf3bd8e6c5e8ce27cf62b6502cbffefe6b",
        sysroot_dir: "debian_jessie_arm64-sysroot",
    },
    BuiltinSysroot {
        platform: "Precise",
        arch: Arch::Amd64,
        revision: SYSROOT_REVISION,
        tarball: "ubuntu_precise_amd64_sysroot.tgz",
        sha1sum: "9f13ac5b78027082ff7e7c34d55533dcb85a2c01",
        sysroot_dir: "ubuntu_precise_amd64-sysroot",
    },
];
