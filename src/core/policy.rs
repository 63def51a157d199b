//! Default sysroot selection
//!
//! Decides which images hook mode installs for a given host and optional
//! build target.

use crate::config::sysroots::{LEGACY_DESKTOP_ARCH, LEGACY_DESKTOP_PLATFORM};
use crate::core::arch::Arch;
use crate::core::table::SysrootKey;
use crate::error::SysrootError;

/// The sysroot installed for an architecture when none is named explicitly
pub fn default_sysroot_for(arch: Arch) -> Result<SysrootKey, SysrootError> {
    let platform = match arch {
        Arch::Amd64 | Arch::Arm | Arch::I386 | Arch::Mips => "Wheezy",
        // Jessie is the first release with arm64 support
        Arch::Arm64 => "Jessie",
        Arch::Ppc | Arch::S390 => {
            return Err(SysrootError::UnknownArchitecture {
                arch: arch.to_string(),
            })
        }
    };
    Ok(SysrootKey::new(platform, arch))
}

/// The fixed legacy desktop sysroot
pub fn legacy_desktop_sysroot() -> SysrootKey {
    SysrootKey::new(LEGACY_DESKTOP_PLATFORM, LEGACY_DESKTOP_ARCH)
}

/// Sysroots installed in hook mode, in install order
///
/// 1. the host sysroot
/// 2. the 32-bit x86 sysroot when the host is amd64
/// 3. the legacy desktop sysroot
/// 4. the configured target's sysroot, unless it is the host or i386
pub fn default_sysroots(host: Arch, target: Option<Arch>) -> Result<Vec<SysrootKey>, SysrootError> {
    let mut keys = Vec::with_capacity(4);
    let mut push = |key: SysrootKey| {
        if !keys.contains(&key) {
            keys.push(key);
        }
    };

    push(default_sysroot_for(host)?);

    if host == Arch::Amd64 {
        push(default_sysroot_for(Arch::I386)?);
    }

    push(legacy_desktop_sysroot());

    if let Some(target) = target {
        if target != host && target != Arch::I386 {
            push(default_sysroot_for(target)?);
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(platform: &str, arch: Arch) -> SysrootKey {
        SysrootKey::new(platform, arch)
    }

    #[test]
    fn test_default_sysroot_for() {
        assert_eq!(default_sysroot_for(Arch::Amd64).unwrap(), key("Wheezy", Arch::Amd64));
        assert_eq!(default_sysroot_for(Arch::Arm).unwrap(), key("Wheezy", Arch::Arm));
        assert_eq!(default_sysroot_for(Arch::Arm64).unwrap(), key("Jessie", Arch::Arm64));
        assert_eq!(default_sysroot_for(Arch::I386).unwrap(), key("Wheezy", Arch::I386));
        assert_eq!(default_sysroot_for(Arch::Mips).unwrap(), key("Wheezy", Arch::Mips));
    }

    #[test]
    fn test_default_sysroot_for_ppc_fails() {
        let err = default_sysroot_for(Arch::Ppc).unwrap_err();
        assert_eq!(err.to_string(), "Unknown architecture: ppc");
        assert!(default_sysroot_for(Arch::S390).is_err());
    }

    #[test]
    fn test_amd64_host_arm_target() {
        let keys = default_sysroots(Arch::Amd64, Some(Arch::Arm)).unwrap();
        assert_eq!(
            keys,
            vec![
                key("Wheezy", Arch::Amd64),
                key("Wheezy", Arch::I386),
                key("Precise", Arch::Amd64),
                key("Wheezy", Arch::Arm),
            ]
        );
    }

    #[test]
    fn test_amd64_host_no_target() {
        let keys = default_sysroots(Arch::Amd64, None).unwrap();
        assert_eq!(
            keys,
            vec![
                key("Wheezy", Arch::Amd64),
                key("Wheezy", Arch::I386),
                key("Precise", Arch::Amd64),
            ]
        );
    }

    #[test]
    fn test_target_equal_to_host_is_skipped() {
        let keys = default_sysroots(Arch::Amd64, Some(Arch::Amd64)).unwrap();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_i386_target_is_skipped() {
        let keys = default_sysroots(Arch::Arm64, Some(Arch::I386)).unwrap();
        assert_eq!(
            keys,
            vec![key("Jessie", Arch::Arm64), key("Precise", Arch::Amd64)]
        );
    }

    #[test]
    fn test_arm_host_mips_target() {
        let keys = default_sysroots(Arch::Arm, Some(Arch::Mips)).unwrap();
        assert_eq!(
            keys,
            vec![
                key("Wheezy", Arch::Arm),
                key("Precise", Arch::Amd64),
                key("Wheezy", Arch::Mips),
            ]
        );
    }

    #[test]
    fn test_i386_host_has_no_duplicate() {
        let keys = default_sysroots(Arch::I386, Some(Arch::I386)).unwrap();
        assert_eq!(
            keys,
            vec![key("Wheezy", Arch::I386), key("Precise", Arch::Amd64)]
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        let first = default_sysroots(Arch::Amd64, Some(Arch::Arm64)).unwrap();
        let second = default_sysroots(Arch::Amd64, Some(Arch::Arm64)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ppc_host_fails() {
        assert!(default_sysroots(Arch::Ppc, None).is_err());
    }
}
