//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;

use crate::config::defaults::RETRY_BASE_DELAY_MS;
use crate::core::arch::{Arch, VALID_ARCHS};
use crate::core::hook::{plan_hook, HookPlan};
use crate::core::install::{InstallReport, Installer, InstallerOptions};
use crate::core::policy::default_sysroot_for;
use crate::core::settings::Settings;
use crate::core::table::{SysrootKey, SysrootTable};
use crate::error::SysrootError;
use crate::infra::dirs::{default_linux_dir, InstallerDirs};
use crate::infra::download::TarballFetcher;
use crate::infra::host::SystemProbe;
use output::OutputConfig;

/// Install Debian sysroots for cross-compiling
///
/// Downloads prebuilt sysroot images, verifies their checksums and unpacks
/// them next to the build support scripts.
#[derive(Parser, Debug)]
#[command(name = "install-sysroot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Sysroot architecture to install
    #[arg(long, value_parser = PossibleValuesParser::new(VALID_ARCHS), conflicts_with = "running_as_hook")]
    pub arch: Option<String>,

    /// Used when running from build hooks. Installs default sysroot images
    #[arg(long)]
    pub running_as_hook: bool,

    /// Parent directory of the sysroot directories [default: ./build/linux]
    #[arg(long, env = "SYSROOT_LINUX_DIR")]
    pub linux_dir: Option<PathBuf>,

    /// Server prefix the tarballs are downloaded from
    #[arg(long, env = "SYSROOT_URL_PREFIX")]
    pub url_prefix: Option<String>,

    /// TOML sysroot table replacing the built-in one
    #[arg(long, env = "SYSROOT_TABLE")]
    pub table: Option<PathBuf>,

    /// Keep a half-built sysroot on disk after a failure
    #[arg(long)]
    pub keep_failed: bool,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output install results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which sysroots were requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `--arch`
    Arch(Arch),
    /// `--running-as-hook`
    Hook,
}

impl Cli {
    /// Resolve the requested mode
    pub fn mode(&self) -> Result<Mode, SysrootError> {
        if self.running_as_hook {
            return Ok(Mode::Hook);
        }
        match &self.arch {
            Some(arch) => Ok(Mode::Arch(arch.parse()?)),
            None => Err(SysrootError::Usage(
                "You must specify either --arch or --running-as-hook".to_string(),
            )),
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.json)
    }

    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let mode = self.mode()?;
        let output = self.output_config();

        let keys: Vec<SysrootKey> = match mode {
            Mode::Arch(arch) => vec![default_sysroot_for(arch)?],
            Mode::Hook => match plan_hook(&SystemProbe)? {
                HookPlan::Install(keys) => keys,
                HookPlan::Skip(reason) => {
                    tracing::info!("Nothing to install: {reason:?}");
                    if output.json {
                        println!("[]");
                    }
                    return Ok(());
                }
            },
        };

        let settings = Settings::load(&InstallerDirs::new())?;

        let table_path = self.table.clone().or_else(|| settings.install.table.clone());
        let custom_table = table_path
            .map(|path| {
                SysrootTable::load_from_path(&path)
                    .with_context(|| format!("Failed to load sysroot table {}", path.display()))
            })
            .transpose()?;
        let table: &SysrootTable = match &custom_table {
            Some(table) => table,
            None => SysrootTable::builtin(),
        };

        let options = InstallerOptions {
            linux_dir: self
                .linux_dir
                .or_else(|| settings.install.linux_dir.clone())
                .unwrap_or_else(default_linux_dir),
            url_prefix: self.url_prefix.as_deref().map_or_else(
                || settings.url_prefix().to_string(),
                |prefix| prefix.trim_end_matches('/').to_string(),
            ),
            url_path: settings.url_path().to_string(),
            keep_failed: self.keep_failed || settings.keep_failed(),
        };
        tracing::debug!("Installer options: {options:?}");

        let fetcher = TarballFetcher::new(
            settings.max_retries(),
            Duration::from_millis(RETRY_BASE_DELAY_MS),
        );
        let mut installer = Installer::new(table, options, fetcher);
        if output.show_progress() {
            installer = installer.with_progress(output.progress_factory());
        }

        let reports: Vec<InstallReport> = installer
            .install_all(&keys, |report| output.print_report(report))
            .await?;

        if output.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }

        Ok(())
    }
}
