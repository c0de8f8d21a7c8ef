//! Sort keys for IP address strings.
//!
//! Addresses are only ever normalized to decide the order of blocks in the
//! generated hosts file. Every IPv4 address sorts before every IPv6 address;
//! within a family addresses compare numerically, most significant bits first.

use crate::error::{HostsError, Result};
use std::cmp::Ordering;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Orderable numeric form of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpKey {
    /// Big-endian integer value of a dotted quad.
    V4(u32),
    /// Big-endian integer value of an IPv6 address.
    V6(u128),
}

/// Normalizes `address` into an [`IpKey`].
///
/// Only the strict textual forms are accepted: four decimal octets for IPv4,
/// and the standard compressed or expanded notation for IPv6. A trailing zone
/// index (`fe80::1%eth0`) is ignored.
///
/// # Errors
///
/// Returns [`HostsError::Parse`] if `address` is not a valid IP address.
///
/// # Example
///
/// ```
/// use hostsfile::ip::{normalize, IpKey};
///
/// assert_eq!(normalize("1.2.3.4").unwrap(), IpKey::V4(0x0102_0304));
/// assert_eq!(normalize("::1").unwrap(), IpKey::V6(1));
/// assert!(normalize("1.2.3").is_err());
/// ```
pub fn normalize(address: &str) -> Result<IpKey> {
    if let Ok(v4) = address.parse::<Ipv4Addr>() {
        return Ok(IpKey::V4(u32::from(v4)));
    }

    let unscoped = address.split_once('%').map_or(address, |(addr, _zone)| addr);
    if let Ok(v6) = unscoped.parse::<Ipv6Addr>() {
        return Ok(IpKey::V6(u128::from(v6)));
    }

    Err(HostsError::Parse {
        address: address.to_string(),
    })
}

/// Compares two address strings by their normalized keys.
///
/// # Errors
///
/// Returns [`HostsError::Parse`] if either address fails to normalize.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(normalize(a)?.cmp(&normalize(b)?))
}
