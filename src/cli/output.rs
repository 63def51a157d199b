//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying download progress,
//! install summaries and errors.

use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};

use crate::core::install::{InstallReport, InstallStatus, ProgressFactory};

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Create a progress bar for downloads
///
/// The bar is cleared once every handle to it is dropped.
pub fn create_download_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total).with_finish(ProgressFinish::AndClear);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Output settings derived from global flags
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub quiet: bool,
    pub json: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Progress bars only make sense for human output on a terminal
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Print the human summary line for one sysroot
    pub fn print_report(&self, report: &InstallReport) {
        if self.quiet || self.json {
            return;
        }
        println!("{} {}", status::SUCCESS, summary_line(report));
    }

    /// Progress factory that draws one bar per download
    pub fn progress_factory(&self) -> ProgressFactory {
        Box::new(|key, _url| {
            let pb = create_download_bar(0);
            pb.set_message(format!("{} {}", key.platform, key.arch));
            Some(Box::new(move |downloaded, total| {
                if total > 0 && pb.length() != Some(total) {
                    pb.set_length(total);
                }
                pb.set_position(downloaded);
            }))
        })
    }
}

/// One-line description of an install result
pub fn summary_line(report: &InstallReport) -> String {
    match report.status {
        InstallStatus::Installed => format!(
            "Installed Debian {} root image: {}",
            report.key,
            report.sysroot.display()
        ),
        InstallStatus::UpToDate => format!(
            "Debian {} root image already up to date: {}",
            report.key,
            report.sysroot.display()
        ),
    }
}

/// Print a fatal error as a single line on stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arch::Arch;
    use crate::core::table::SysrootKey;
    use std::path::PathBuf;

    fn report(status: InstallStatus) -> InstallReport {
        InstallReport {
            key: SysrootKey::new("Wheezy", Arch::Amd64),
            sysroot: PathBuf::from("/src/build/linux/debian_wheezy_amd64-sysroot"),
            url: "P/Q/R/t.tgz".to_string(),
            status,
        }
    }

    #[test]
    fn test_summary_line_installed() {
        assert_eq!(
            summary_line(&report(InstallStatus::Installed)),
            "Installed Debian Wheezy amd64 root image: /src/build/linux/debian_wheezy_amd64-sysroot"
        );
    }

    #[test]
    fn test_summary_line_up_to_date() {
        assert_eq!(
            summary_line(&report(InstallStatus::UpToDate)),
            "Debian Wheezy amd64 root image already up to date: /src/build/linux/debian_wheezy_amd64-sysroot"
        );
    }

    #[test]
    fn test_show_progress() {
        assert!(OutputConfig::new(false, false).show_progress());
        assert!(!OutputConfig::new(true, false).show_progress());
        assert!(!OutputConfig::new(false, true).show_progress());
    }
}
