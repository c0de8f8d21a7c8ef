//! Error types.

use thiserror::Error;

/// Result alias for hosts-file operations.
pub type Result<T> = std::result::Result<T, HostsError>;

/// Errors returned by hosts-file operations.
#[derive(Debug, Error)]
pub enum HostsError {
    /// Filesystem I/O failed (typically `PermissionDenied` on the system hosts file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The host is not mapped and the resolver fallback found nothing.
    #[error("unknown host: {host}")]
    NotFound {
        /// The host name that was looked up.
        host: String,
    },

    /// A mapped address is neither a valid IPv4 nor IPv6 address.
    #[error("invalid IP address: {address}")]
    Parse {
        /// The offending address text.
        address: String,
    },

    /// No default hosts-file location is known for this platform.
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform {
        /// Value of `std::env::consts::OS`, or a description of what is missing.
        os: String,
    },
}

impl HostsError {
    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }

    /// Returns `true` for [`HostsError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_is_detected() {
        let err = HostsError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(err.is_permission_denied());
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_message_names_host() {
        let err = HostsError::NotFound {
            host: "missing.local".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "unknown host: missing.local");
    }
}
