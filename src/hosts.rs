//! In-memory hosts mapping with parse, mutate and serialize.
//!
//! The file is read into a `host name -> address` map. Output order never
//! depends on insertion order: blocks are emitted per address, sorted by
//! [`ip::normalize`](crate::ip::normalize), with host names sorted inside
//! each block.

use crate::config::Header;
use crate::error::{HostsError, Result};
use crate::ip;
use crate::resolve::{Resolve, SystemResolver};
use crate::writer::write_atomic;
use std::collections::BTreeMap;
use std::path::Path;

/// Returned by [`Hosts::get_one`] for names that cannot be resolved.
pub const UNKNOWN: &str = "[Unknown]";

/// A parsed hosts file.
///
/// # Example
///
/// ```
/// use hostsfile::{Header, Hosts, NoResolver};
///
/// let mut hosts = Hosts::parse("127.0.0.1 localhost\n").with_resolver(NoResolver);
/// hosts.set_one("db.local", "10.0.0.5");
/// hosts.alias_all(["cache.local"], "db.local", true)?;
///
/// let text = hosts.render(&Header::default().with_timestamp("now"))?;
/// assert!(text.contains("10.0.0.5\tcache.local\n10.0.0.5\tdb.local\n"));
/// # Ok::<(), hostsfile::HostsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Hosts<R = SystemResolver> {
    entries: BTreeMap<String, String>,
    resolver: R,
}

impl Hosts {
    /// Creates an empty mapping backed by the system resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses hosts-file text.
    ///
    /// Blank lines and lines whose first non-blank character is `#` are
    /// skipped. A `#` anywhere else is part of a token. The first token of a
    /// line is the address and every following token is a host name; a name
    /// seen again later overwrites its earlier address. A line with only an
    /// address maps nothing.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut hosts = Self::new();
        for (number, line) in text.lines().enumerate() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let mut tokens = line.split_whitespace().peekable();
            let Some(address) = tokens.next() else {
                continue;
            };
            if tokens.peek().is_none() {
                tracing::debug!(line = number + 1, address = %address, "Address without host names");
            }
            for name in tokens {
                hosts.entries.insert(name.to_string(), address.to_string());
            }
        }
        hosts
    }

    /// Reads and parses the hosts file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file cannot be read. A missing file
    /// is an error; it is not created.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let hosts = Self::parse(&text);
        tracing::debug!(path = %path.display(), entries = hosts.len(), "Loaded hosts file");
        Ok(hosts)
    }
}

impl<R: Resolve> Hosts<R> {
    /// Swaps the fallback resolver used for names missing from the file.
    #[must_use]
    pub fn with_resolver<S: Resolve>(self, resolver: S) -> Hosts<S> {
        Hosts {
            entries: self.entries,
            resolver,
        }
    }

    /// Number of mapped host names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no host names are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(host name, address)` pairs in host-name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the address for `host_name`, from the file or the resolver.
    ///
    /// Performs a blocking lookup when the name is not mapped.
    #[must_use]
    pub fn lookup(&self, host_name: &str) -> Option<String> {
        if let Some(address) = self.entries.get(host_name) {
            return Some(address.clone());
        }
        let resolved = self.resolver.resolve(host_name).map(|ip| ip.to_string());
        tracing::debug!(
            host = %host_name,
            resolved = resolved.as_deref().unwrap_or("none"),
            "Host not in file, used resolver"
        );
        resolved
    }

    /// Returns the address for `host_name`.
    ///
    /// Falls back to the resolver like [`lookup`](Self::lookup). An
    /// unresolvable name yields [`UNKNOWN`] unless `raise_on_not_found`.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::NotFound`] if the name cannot be resolved and
    /// `raise_on_not_found` is set.
    pub fn get_one(&self, host_name: &str, raise_on_not_found: bool) -> Result<String> {
        match self.lookup(host_name) {
            Some(address) => Ok(address),
            None if raise_on_not_found => Err(not_found(host_name)),
            None => Ok(UNKNOWN.to_string()),
        }
    }

    /// Maps `host_name` to `ip_address`, replacing any previous mapping.
    ///
    /// The address is not validated here; an invalid one makes
    /// [`render`](Self::render) fail.
    pub fn set_one(&mut self, host_name: impl Into<String>, ip_address: impl Into<String>) {
        self.entries.insert(host_name.into(), ip_address.into());
    }

    /// Maps every name in `host_names` to `ip_address`.
    pub fn set_all<I>(&mut self, host_names: I, ip_address: &str)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for name in host_names {
            self.set_one(name, ip_address);
        }
    }

    /// Removes the mapping for `host_name`.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::NotFound`] if the name is not mapped and
    /// `raise_on_not_found` is set; otherwise a missing name is a no-op.
    pub fn remove_one(&mut self, host_name: &str, raise_on_not_found: bool) -> Result<()> {
        if self.entries.remove(host_name).is_none() && raise_on_not_found {
            return Err(not_found(host_name));
        }
        Ok(())
    }

    /// Removes every name in `host_names`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`remove_one`](Self::remove_one).
    pub fn remove_all<I>(&mut self, host_names: I, raise_on_not_found: bool) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in host_names {
            self.remove_one(name.as_ref(), raise_on_not_found)?;
        }
        Ok(())
    }

    /// Maps every name in `host_names` to the current address of `target`.
    ///
    /// `target` is looked up like [`get_one`](Self::get_one), resolver
    /// fallback included. If it cannot be resolved and `raise_on_not_found`
    /// is unset, the mapping is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::NotFound`] if `target` cannot be resolved and
    /// `raise_on_not_found` is set.
    pub fn alias_all<I>(&mut self, host_names: I, target: &str, raise_on_not_found: bool) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        match self.lookup(target) {
            Some(address) => {
                self.set_all(host_names, &address);
                Ok(())
            }
            None if raise_on_not_found => Err(not_found(target)),
            None => {
                tracing::warn!(target = %target, "Alias target unresolvable, nothing changed");
                Ok(())
            }
        }
    }

    /// Serializes the mapping with the default header.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn serialize(&self) -> Result<String> {
        self.render(&Header::default())
    }

    /// Serializes the mapping below `header`.
    ///
    /// ```text
    /// # <attribution>
    /// # <reference url>
    /// # Updated: <timestamp>
    ///
    /// # -- 127.0.0.1 -- #
    /// 127.0.0.1	localhost
    /// # -- 127.0.0.1 -- #
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Parse`] if any mapped address is not a valid IP
    /// address. Nothing is rendered in that case.
    pub fn render(&self, header: &Header) -> Result<String> {
        let mut by_address: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (name, address) in &self.entries {
            by_address.entry(address.as_str()).or_default().push(name.as_str());
        }

        let mut blocks = by_address
            .into_iter()
            .map(|(address, names)| ip::normalize(address).map(|key| (key, address, names)))
            .collect::<Result<Vec<_>>>()?;
        blocks.sort_by_key(|(key, _, _)| *key);

        let mut out = header.render();
        for (_, address, names) in blocks {
            let marker = format!("# -- {address} -- #\n");
            out.push('\n');
            out.push_str(&marker);
            // `names` came out of a BTreeMap, so it is already sorted.
            for name in names.into_iter().filter(|n| !n.is_empty()) {
                out.push_str(&format!("{address}\t{name}\n"));
            }
            out.push_str(&marker);
        }
        Ok(out)
    }

    /// Serializes with the default header and atomically replaces `path`.
    ///
    /// On the first write the existing file is kept as `<path>.orig`.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Parse`] if serialization fails, or
    /// [`HostsError::Io`] on any filesystem error.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_with(path, &Header::default())
    }

    /// Like [`write`](Self::write) with a custom header.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    pub fn write_with(&self, path: impl AsRef<Path>, header: &Header) -> Result<()> {
        let path = path.as_ref();
        let contents = self.render(header)?;
        write_atomic(path, &contents)?;
        tracing::info!(path = %path.display(), entries = self.len(), "Wrote hosts file");
        Ok(())
    }
}

fn not_found(host: &str) -> HostsError {
    HostsError::NotFound {
        host: host.to_string(),
    }
}
