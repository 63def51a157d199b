//! Sysroot install pipeline
//!
//! Each request runs resolve → freshness check → reset → fetch → verify →
//! extract → stamp. The stamp file is written last and holds the download
//! URL, so a directory without a matching stamp is never trusted and is
//! rebuilt from scratch on the next run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::STAMP_FILE;
use crate::core::table::{SysrootKey, SysrootRecord, SysrootTable};
use crate::error::SysrootError;
use crate::infra::archive::extract_tarball;
use crate::infra::checksum::{verify_file, Verification};
use crate::infra::download::{ProgressCallback, TarballFetcher};
use crate::infra::filesystem;

/// Produces a download progress callback for a sysroot about to be fetched
pub type ProgressFactory = Box<dyn Fn(&SysrootKey, &str) -> Option<ProgressCallback> + Send + Sync>;

/// Installer configuration
#[derive(Debug, Clone)]
pub struct InstallerOptions {
    /// Parent directory of the sysroot directories
    pub linux_dir: PathBuf,
    /// Download URL prefix
    pub url_prefix: String,
    /// Path segment between prefix and revision
    pub url_path: String,
    /// Leave the directory on disk when an install fails after the reset
    pub keep_failed: bool,
}

/// What an install request did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallStatus {
    /// Downloaded, verified, extracted and stamped
    Installed,
    /// Stamp already matched; nothing was touched
    UpToDate,
}

/// Result of one install request
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    #[serde(flatten)]
    pub key: SysrootKey,
    pub sysroot: PathBuf,
    pub url: String,
    pub status: InstallStatus,
}

/// Fetch-verify-install pipeline over a sysroot table
pub struct Installer<'a> {
    table: &'a SysrootTable,
    options: InstallerOptions,
    fetcher: TarballFetcher,
    progress: Option<ProgressFactory>,
}

impl<'a> Installer<'a> {
    pub fn new(table: &'a SysrootTable, options: InstallerOptions, fetcher: TarballFetcher) -> Self {
        Self {
            table,
            options,
            fetcher,
            progress: None,
        }
    }

    /// Report download progress through callbacks built by `factory`
    #[must_use]
    pub fn with_progress(mut self, factory: ProgressFactory) -> Self {
        self.progress = Some(factory);
        self
    }

    /// Directory a record installs into
    pub fn sysroot_path(&self, record: &SysrootRecord) -> PathBuf {
        self.options.linux_dir.join(&record.sysroot_dir)
    }

    /// Download URL for a record
    pub fn url_for(&self, record: &SysrootRecord) -> String {
        record.url(&self.options.url_prefix, &self.options.url_path)
    }

    /// Install one sysroot unless its stamp already matches
    pub async fn install(&self, key: &SysrootKey) -> Result<InstallReport, SysrootError> {
        let record = self.table.get(key)?;
        let sysroot = self.sysroot_path(record);
        let url = self.url_for(record);
        let stamp = sysroot.join(STAMP_FILE);

        let report = |status| InstallReport {
            key: key.clone(),
            sysroot: sysroot.clone(),
            url: url.clone(),
            status,
        };

        if stamp_matches(&stamp, &url)? {
            tracing::info!(
                "Debian {key} root image already up to date: {}",
                sysroot.display()
            );
            return Ok(report(InstallStatus::UpToDate));
        }

        tracing::info!("Installing Debian {key} root image: {}", sysroot.display());
        filesystem::remove_dir_all(&sysroot)?;

        if let Err(e) = self.rebuild(key, record, &sysroot, &url).await {
            self.discard(&sysroot);
            return Err(e);
        }

        Ok(report(InstallStatus::Installed))
    }

    /// Install several sysroots in order, stopping at the first failure
    ///
    /// `on_report` sees each result as soon as that sysroot is done.
    pub async fn install_all(
        &self,
        keys: &[SysrootKey],
        mut on_report: impl FnMut(&InstallReport),
    ) -> Result<Vec<InstallReport>, SysrootError> {
        let mut reports = Vec::with_capacity(keys.len());
        for key in keys {
            let report = self.install(key).await?;
            on_report(&report);
            reports.push(report);
        }
        Ok(reports)
    }

    /// Recreate the directory, then fetch, verify, extract and stamp
    ///
    /// Any error leaves the directory without a stamp.
    async fn rebuild(
        &self,
        key: &SysrootKey,
        record: &SysrootRecord,
        sysroot: &Path,
        url: &str,
    ) -> Result<(), SysrootError> {
        filesystem::create_dir_all(sysroot)?;

        let tarball = sysroot.join(&record.tarball);
        let progress = self.progress.as_ref().and_then(|factory| factory(key, url));

        tracing::info!("Downloading {url}");
        let bytes = self.fetcher.fetch(url, &tarball, progress).await?;
        tracing::debug!("Fetched {bytes} bytes into {}", tarball.display());

        let expected = record.checksum.clone();
        let path = tarball.clone();
        match blocking(move || verify_file(&path, &expected)).await? {
            Verification::Match => tracing::debug!("Checksum verified for {}", tarball.display()),
            Verification::Mismatch { actual } => {
                return Err(SysrootError::ChecksumMismatch {
                    tarball,
                    expected: record.checksum.clone(),
                    actual,
                });
            }
        }

        let (archive, dest) = (tarball.clone(), sysroot.to_path_buf());
        blocking(move || extract_tarball(&archive, &dest)).await?;
        filesystem::remove_file(&tarball)?;

        let stamp = sysroot.join(STAMP_FILE);
        filesystem::write_file(&stamp, url)?;
        tracing::debug!("Wrote stamp {}", stamp.display());

        Ok(())
    }

    /// Apply the failure policy to a half-built sysroot
    fn discard(&self, sysroot: &Path) {
        if self.options.keep_failed {
            tracing::warn!("Leaving incomplete sysroot at {}", sysroot.display());
        } else if let Err(e) = filesystem::remove_dir_all(sysroot) {
            tracing::warn!("Could not remove incomplete sysroot: {e}");
        }
    }
}

/// Whether an existing stamp holds exactly `url`
fn stamp_matches(stamp: &Path, url: &str) -> Result<bool, SysrootError> {
    Ok(filesystem::read_optional(stamp)?.is_some_and(|content| content == url.as_bytes()))
}

/// Run blocking file work off the async executor and wait for it
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => value,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}
