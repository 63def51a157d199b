//! Sysroot table
//!
//! Immutable mapping from (platform, architecture) to the record describing
//! one installable image. The built-in table is initialised once and shared
//! for the whole process; a TOML file can supply a replacement table.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::sysroots::BUILTIN_SYSROOTS;
use crate::core::arch::Arch;
use crate::error::{ConfigError, SysrootError};
use crate::infra::checksum::DigestKind;

/// Composite table key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SysrootKey {
    /// Distribution release name, e.g. `Wheezy`
    pub platform: String,
    /// Canonical architecture
    pub arch: Arch,
}

impl SysrootKey {
    pub fn new(platform: impl Into<String>, arch: Arch) -> Self {
        Self {
            platform: platform.into(),
            arch,
        }
    }
}

impl fmt::Display for SysrootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform, self.arch)
    }
}

/// Descriptor of one installable sysroot image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysrootRecord {
    /// Revision directory on the server
    pub revision: String,
    /// Tarball file name
    pub tarball: String,
    /// Expected hex digest of the tarball (SHA-1 or SHA-256)
    pub checksum: String,
    /// Directory name under the linux build support directory
    pub sysroot_dir: String,
}

impl SysrootRecord {
    /// Compose the download URL: `{prefix}/{path}/{revision}/{tarball}`
    pub fn url(&self, prefix: &str, path: &str) -> String {
        format!("{prefix}/{path}/{}/{}", self.revision, self.tarball)
    }
}

/// One `[[sysroot]]` entry of a table file
#[derive(Debug, Deserialize)]
struct TableEntry {
    platform: String,
    arch: Arch,
    #[serde(flatten)]
    record: SysrootRecord,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    sysroot: Vec<TableEntry>,
}

/// Immutable (platform, arch) → record map
#[derive(Debug, Clone, Default)]
pub struct SysrootTable {
    entries: BTreeMap<SysrootKey, SysrootRecord>,
}

static BUILTIN: OnceLock<SysrootTable> = OnceLock::new();

impl SysrootTable {
    /// The compiled-in table
    pub fn builtin() -> &'static SysrootTable {
        BUILTIN.get_or_init(|| {
            let entries = BUILTIN_SYSROOTS
                .iter()
                .map(|s| {
                    (
                        SysrootKey::new(s.platform, s.arch),
                        SysrootRecord {
                            revision: s.revision.to_string(),
                            tarball: s.tarball.to_string(),
                            checksum: s.sha1sum.to_string(),
                            sysroot_dir: s.sysroot_dir.to_string(),
                        },
                    )
                })
                .collect();
            SysrootTable { entries }
        })
    }

    /// Build a table from explicit entries, rejecting duplicates and bad digests
    pub fn from_entries(
        entries: impl IntoIterator<Item = (SysrootKey, SysrootRecord)>,
    ) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for (key, record) in entries {
            if DigestKind::for_hex(&record.checksum).is_none() {
                return Err(ConfigError::InvalidChecksum {
                    platform: key.platform,
                    arch: key.arch.to_string(),
                    checksum: record.checksum,
                });
            }
            if map.contains_key(&key) {
                return Err(ConfigError::DuplicateSysroot {
                    platform: key.platform,
                    arch: key.arch.to_string(),
                });
            }
            map.insert(key, record);
        }
        Ok(Self { entries: map })
    }

    /// Parse a table from TOML text
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: TableFile =
            toml::from_str(content).map_err(|e| ConfigError::parse(origin, content, &e))?;

        Self::from_entries(
            file.sysroot
                .into_iter()
                .map(|e| (SysrootKey::new(e.platform, e.arch), e.record)),
        )
    }

    /// Load a table file from disk
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content, path)
    }

    /// Look up the record for a key
    pub fn get(&self, key: &SysrootKey) -> Result<&SysrootRecord, SysrootError> {
        self.entries
            .get(key)
            .ok_or_else(|| SysrootError::UnknownSysroot {
                platform: key.platform.clone(),
                arch: key.arch.to_string(),
            })
    }

    /// Whether the table has a record for `key`
    pub fn contains(&self, key: &SysrootKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&SysrootKey, &SysrootRecord)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
