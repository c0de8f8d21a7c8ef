//! Generated-file header and default file locations.

use crate::error::{HostsError, Result};
use crate::util::local_timestamp;
use std::path::PathBuf;

/// Attribution line written at the top of every generated file.
pub const DEFAULT_ATTRIBUTION: &str = concat!("Autogenerated by ", env!("CARGO_PKG_NAME"));

/// Reference URL written below the attribution.
pub const DEFAULT_REFERENCE_URL: &str = env!("CARGO_PKG_REPOSITORY");

/// Comment header prepended to a serialized hosts file.
///
/// # Example
///
/// ```
/// use hostsfile::Header;
///
/// let header = Header::new("Managed by ops", "https://example.com/hosts")
///     .with_timestamp("2024-01-01 00:00:00");
///
/// assert_eq!(
///     header.render(),
///     "# Managed by ops\n# https://example.com/hosts\n# Updated: 2024-01-01 00:00:00\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Header {
    /// Tool attribution, written without the leading `# `.
    pub attribution: String,

    /// Reference URL, written without the leading `# `.
    pub reference_url: String,

    /// Fixed `Updated:` value. `None` stamps the local time at render.
    pub timestamp: Option<String>,
}

impl Header {
    /// Creates a header stamped with the local time at render.
    #[must_use]
    pub fn new(attribution: impl Into<String>, reference_url: impl Into<String>) -> Self {
        Self {
            attribution: attribution.into(),
            reference_url: reference_url.into(),
            timestamp: None,
        }
    }

    /// Pins the `Updated:` value, making the output reproducible.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Renders the header as newline-terminated comment lines.
    #[must_use]
    pub fn render(&self) -> String {
        let updated = self.timestamp.clone().unwrap_or_else(local_timestamp);
        format!(
            "# {}\n# {}\n# Updated: {updated}\n",
            self.attribution, self.reference_url
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTION, DEFAULT_REFERENCE_URL)
    }
}

/// Returns the location of the operating system hosts file.
///
/// # Errors
///
/// Returns [`HostsError::UnsupportedPlatform`] on platforms without a known
/// hosts file, or on Windows when `SystemRoot` is not set.
pub fn system_hosts_path() -> Result<PathBuf> {
    if cfg!(windows) {
        let root = std::env::var_os("SystemRoot").ok_or_else(|| HostsError::UnsupportedPlatform {
            os: "windows without SystemRoot".to_string(),
        })?;
        Ok(PathBuf::from(root).join(r"system32\drivers\etc\hosts"))
    } else if cfg!(unix) {
        Ok(PathBuf::from("/etc/hosts"))
    } else {
        Err(HostsError::UnsupportedPlatform {
            os: std::env::consts::OS.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_names_the_tool() {
        let rendered = Header::default().with_timestamp("now").render();
        assert!(rendered.starts_with("# Autogenerated by hostsfile\n"));
        assert!(rendered.ends_with("# Updated: now\n"));
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn unpinned_header_stamps_current_time() {
        let rendered = Header::new("a", "b").render();
        let updated = rendered.lines().nth(2).unwrap();
        assert!(updated.starts_with("# Updated: "));
        assert!(updated.len() > "# Updated: ".len());
    }

    #[cfg(unix)]
    #[test]
    fn unix_hosts_path() {
        assert_eq!(system_hosts_path().unwrap(), PathBuf::from("/etc/hosts"));
    }
}
