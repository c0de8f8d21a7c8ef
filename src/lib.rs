//! # hostsfile
//!
//! Manage host-name-to-address mappings in the system hosts file.
//!
//! The file is parsed into a `name -> address` map, edited in memory, and
//! written back in a canonical layout: one block per address, blocks in
//! address order (IPv4 before IPv6), names sorted inside each block.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use hostsfile::{Hosts, system_hosts_path};
//!
//! let path = system_hosts_path()?;
//! let mut hosts = Hosts::load(&path)?;
//!
//! hosts.set_all(["app.local", "api.app.local"], "127.0.0.1");
//! hosts.alias_all(["cdn.local"], "app.local", true)?;
//! hosts.remove_one("old.local", false)?;
//!
//! // Requires write access to the hosts file.
//! hosts.write(&path)?;
//! ```
//!
//! ## File layout
//!
//! ```text
//! # Autogenerated by hostsfile
//! # https://github.com/wenin819/hosts
//! # Updated: 2024-05-01 12:00:00
//!
//! # -- 127.0.0.1 -- #
//! 127.0.0.1	api.app.local
//! 127.0.0.1	app.local
//! # -- 127.0.0.1 -- #
//! ```
//!
//! ## Atomic writes
//!
//! [`Hosts::write`] writes `<path>.tmp` and renames it over the target.
//! The first write also keeps the untouched original as `<path>.orig`.
//!
//! ## Name resolution
//!
//! Lookups of names that are not in the file fall back to a [`Resolve`]
//! implementation, the blocking [`SystemResolver`] by default. Use
//! [`Hosts::with_resolver`] to substitute [`NoResolver`] or a closure.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod hosts;
pub mod ip;
pub mod resolve;
pub mod util;
pub mod writer;

pub use config::{Header, system_hosts_path};
pub use error::{HostsError, Result};
pub use hosts::{Hosts, UNKNOWN};
pub use resolve::{NoResolver, Resolve, SystemResolver};
