//! Hook mode planning
//!
//! When run from build hooks, the installer picks its own set of sysroots
//! from the host and target architecture. Non-Linux hosts and hosts whose
//! architecture has no sysroot are a silent no-op.

use crate::core::arch::Arch;
use crate::core::policy::default_sysroots;
use crate::core::table::SysrootKey;
use crate::error::SysrootError;
use crate::infra::host::HostProbe;

/// Why hook mode installs nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Host is not Linux
    NotLinux,
    /// No sysroot exists for the host architecture
    NoSysroot(Arch),
}

/// What hook mode should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookPlan {
    Skip(SkipReason),
    Install(Vec<SysrootKey>),
}

/// Decide which sysroots hook mode installs
pub fn plan_hook(probe: &dyn HostProbe) -> Result<HookPlan, SysrootError> {
    if !probe.is_linux() {
        return Ok(HookPlan::Skip(SkipReason::NotLinux));
    }

    let host = probe.host_arch()?;
    if !host.has_sysroot() {
        return Ok(HookPlan::Skip(SkipReason::NoSysroot(host)));
    }

    let target = probe.target_arch();
    tracing::debug!("Host arch {host}, target arch {target:?}");

    Ok(HookPlan::Install(default_sysroots(host, target)?))
}
