//! Error types.

use thiserror::Error;

/// Result alias for hosts file operations.
pub type Result<T> = std::result::Result<T, HostsError>;

/// Errors returned by hosts file operations.
#[derive(Debug, Error)]
pub enum HostsError {
    /// Filesystem I/O failed (typically `PermissionDenied` on `/etc/hosts`).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The hosts file to operate on does not exist.
    #[error("hosts file not found: {path}")]
    NotFound {
        /// The expected path.
        path: String,
    },

    /// A record carries an address that is not a valid IPv4 literal.
    #[error("invalid IP address {ip:?} for host {host:?}")]
    InvalidIpAddress {
        /// The rejected address.
        ip: String,
        /// Host name of the offending record.
        host: String,
    },

    /// A record carries a malformed host name.
    #[error("invalid host name {host:?} for address {ip:?}")]
    InvalidHostName {
        /// The rejected host name.
        host: String,
        /// Address of the offending record.
        ip: String,
    },
}

impl HostsError {
    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }

    /// Returns `true` for record validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidIpAddress { .. } | Self::InvalidHostName { .. }
        )
    }
}
