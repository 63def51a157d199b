//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::arch::Arch;

    /// Generate a SHA1 digest (40 hex characters)
    pub fn sha1_hash() -> impl Strategy<Value = String> {
        "[0-9a-f]{40}"
    }

    /// Generate a SHA256 digest (64 hex characters)
    pub fn sha256_hash() -> impl Strategy<Value = String> {
        "[0-9a-f]{64}"
    }

    /// Generate a digest of either supported length
    pub fn any_hash() -> impl Strategy<Value = String> {
        prop_oneof![sha1_hash(), sha256_hash()]
    }

    /// Generate a platform codename such as `Wheezy`
    pub fn platform() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{3,9}"
    }

    /// Generate an architecture that has sysroot images
    pub fn sysroot_arch() -> impl Strategy<Value = Arch> {
        prop_oneof![
            Just(Arch::Amd64),
            Just(Arch::I386),
            Just(Arch::Arm),
            Just(Arch::Arm64),
            Just(Arch::Mips),
        ]
    }

    /// Generate a tarball file name
    pub fn tarball_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{2,30}\\.tgz"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::infra::checksum::DigestKind;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_generated_hashes_have_known_kind(hash in any_hash()) {
            prop_assert!(DigestKind::for_hex(&hash).is_some());
        }

        #[test]
        fn test_generated_platform_is_capitalized(name in platform()) {
            prop_assert!(name.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
        }

        #[test]
        fn test_sysroot_arch_has_sysroot(arch in sysroot_arch()) {
            prop_assert!(arch.has_sysroot());
        }

        #[test]
        fn test_tarball_name_extension(name in tarball_name()) {
            prop_assert!(name.ends_with(".tgz"));
        }
    }
}
