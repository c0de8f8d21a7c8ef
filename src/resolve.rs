//! Name-resolution fallback used when a host is not in the file.

use std::net::{IpAddr, ToSocketAddrs};

/// Resolves a host name to a single address.
pub trait Resolve {
    /// Returns an address for `host`, or `None` if it cannot be resolved.
    fn resolve(&self, host: &str) -> Option<IpAddr>;
}

/// Blocking lookup through the operating system resolver.
///
/// Prefers the first IPv4 answer, falling back to the first answer of any
/// family.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        let addrs: Vec<IpAddr> = match (host, 0).to_socket_addrs() {
            Ok(iter) => iter.map(|a| a.ip()).collect(),
            Err(e) => {
                tracing::debug!(host = %host, error = %e, "System lookup failed");
                return None;
            }
        };
        addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
    }
}

/// Resolver that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolve for NoResolver {
    fn resolve(&self, _host: &str) -> Option<IpAddr> {
        None
    }
}

impl<F> Resolve for F
where
    F: Fn(&str) -> Option<IpAddr>,
{
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        self(host)
    }
}
