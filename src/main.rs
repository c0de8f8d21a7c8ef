//! `hosts`: query and edit the hosts file from the command line.
//!
//! ```bash
//! hosts --get app.local              # print the mapped (or resolved) address
//! hosts --get                        # print every mapping
//! sudo hosts --set 127.0.0.1 app.local api.app.local
//! sudo hosts --alias app.local cdn.local
//! sudo hosts --remove --silent old.local
//! hosts --set 10.0.0.1 x.local --dry # print the result instead of writing
//! ```

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use hostsfile::{Hosts, NoResolver, Resolve, system_hosts_path};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Manipulate your hosts file.
#[derive(Parser, Debug)]
#[command(name = "hosts")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["get", "set", "alias", "remove"])))]
struct Args {
    /// Host names to operate on
    names: Vec<String>,

    /// Print the address of each name (every mapping if no names are given)
    #[arg(long)]
    get: bool,

    /// Map the names to this address
    #[arg(long, value_name = "IP")]
    set: Option<String>,

    /// Map the names to the current address of this host
    #[arg(long, value_name = "TARGET")]
    alias: Option<String>,

    /// Remove the names
    #[arg(long)]
    remove: bool,

    /// Treat unknown names as a no-op instead of an error
    #[arg(long)]
    silent: bool,

    /// Print the resulting file instead of writing it
    #[arg(long)]
    dry: bool,

    /// Hosts file to edit (defaults to the system hosts file)
    #[arg(short, long, env = "HOSTS_FILE")]
    file: Option<PathBuf>,

    /// Never fall back to a DNS lookup for names missing from the file
    #[arg(long)]
    no_dns: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Mutation selected on the command line.
enum Edit<'a> {
    Set(&'a str),
    Alias(&'a str),
    Remove,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level());

    let path = match &args.file {
        Some(path) => path.clone(),
        None => system_hosts_path()?,
    };
    let hosts = Hosts::load(&path)
        .with_context(|| format!("failed to read hosts file {}", path.display()))?;

    if args.no_dns {
        run(&args, &path, hosts.with_resolver(NoResolver))
    } else {
        run(&args, &path, hosts)
    }
}

fn run<R: Resolve>(args: &Args, path: &Path, mut hosts: Hosts<R>) -> Result<()> {
    let edit = if args.get {
        return print_all(&hosts, &args.names);
    } else if let Some(target) = &args.alias {
        Edit::Alias(target)
    } else if let Some(ip) = &args.set {
        Edit::Set(ip)
    } else {
        Edit::Remove
    };

    let raise = !args.silent;
    match edit {
        Edit::Set(ip) => hosts.set_all(args.names.iter().cloned(), ip),
        Edit::Alias(target) => hosts.alias_all(args.names.iter().cloned(), target, raise)?,
        Edit::Remove => hosts.remove_all(&args.names, raise)?,
    }

    if args.dry {
        print!("{}", hosts.serialize()?);
        return Ok(());
    }

    hosts.write(path).map_err(|e| {
        let hint = if e.is_permission_denied() {
            " (are you running as root?)"
        } else {
            ""
        };
        anyhow::Error::new(e).context(format!("failed to write {}{hint}", path.display()))
    })
}

fn print_all<R: Resolve>(hosts: &Hosts<R>, names: &[String]) -> Result<()> {
    if names.is_empty() {
        for (name, address) in hosts.entries() {
            println!("{name} {address}");
        }
        return Ok(());
    }
    for name in names {
        println!("{name} {}", hosts.get_one(name, false)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("hosts").chain(argv.iter().copied()))
    }

    #[test]
    fn exactly_one_mode_is_required() {
        assert!(parse(&["a.local"]).is_err());
        assert!(parse(&["--get", "--remove", "a.local"]).is_err());
        assert!(parse(&["--set", "1.1.1.1", "--alias", "b", "a"]).is_err());
    }

    #[test]
    fn set_mode_collects_names() {
        let args = parse(&["--set", "127.0.0.1", "a.local", "b.local", "--dry"]).unwrap();
        assert_eq!(args.set.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.names, vec!["a.local", "b.local"]);
        assert!(args.dry);
        assert!(!args.silent);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(parse(&["--get"]).unwrap().log_level(), "warn");
        assert_eq!(parse(&["--get", "-vv"]).unwrap().log_level(), "debug");
        assert_eq!(parse(&["--get", "-vvvv"]).unwrap().log_level(), "trace");
        assert_eq!(parse(&["--get", "-q", "-v"]).unwrap().log_level(), "error");
    }

    #[test]
    fn run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();

        let args = parse(&["--set", "10.0.0.1", "app.local", "--no-dns"]).unwrap();
        let hosts = Hosts::load(&path).unwrap().with_resolver(NoResolver);
        run(&args, &path, hosts).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("10.0.0.1\tapp.local\n"));
        assert!(hostsfile::writer::backup_path(&path).exists());
    }

    #[test]
    fn run_dry_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();

        let args = parse(&["--remove", "localhost", "--dry"]).unwrap();
        let hosts = Hosts::load(&path).unwrap().with_resolver(NoResolver);
        run(&args, &path, hosts).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "127.0.0.1 localhost\n");
    }

    #[test]
    fn run_remove_missing_fails_unless_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();

        let strict = parse(&["--remove", "ghost"]).unwrap();
        let hosts = Hosts::load(&path).unwrap().with_resolver(NoResolver);
        assert!(run(&strict, &path, hosts).is_err());
        assert!(!hostsfile::writer::backup_path(&path).exists());

        let silent = parse(&["--remove", "ghost", "--silent"]).unwrap();
        let hosts = Hosts::load(&path).unwrap().with_resolver(NoResolver);
        run(&silent, &path, hosts).unwrap();
    }
}
