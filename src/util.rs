//! Internal utilities.

/// Returns `true` if the process runs with root privileges.
///
/// Used to annotate permission failures; writing `/etc/hosts` needs root.
#[cfg(unix)]
#[must_use]
pub fn is_privileged() -> bool {
    // SAFETY: `geteuid` has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Returns `false`; elevation is not detected on this platform.
#[cfg(not(unix))]
#[must_use]
pub const fn is_privileged() -> bool {
    false
}
