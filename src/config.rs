use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";

#[derive(Parser, Debug, Clone)]
#[command(name = "vmmgr", version)]
#[command(about = "Translates 16-bit logical addresses through a TLB and a demand-paged page table")]
pub struct Config {
    /// Text file with one decimal logical address per line
    pub addresses: PathBuf,

    /// Backing store holding the contents of every page
    #[arg(short, long, env = "VMMGR_BACKING_STORE", default_value = DEFAULT_BACKING_STORE)]
    pub backing_store: PathBuf,

    /// Only print the summary, not one line per address
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn new<A: Into<PathBuf>, B: Into<PathBuf>>(addresses: A, backing_store: B) -> Self {
        Self {
            addresses: addresses.into(),
            backing_store: backing_store.into(),
            quiet: false,
            verbose: 0,
        }
    }

    /// Default `env_logger` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["vmmgr", "addresses.txt"]).unwrap();
        assert_eq!(config.addresses, PathBuf::from("addresses.txt"));
        assert!(!config.quiet);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn options() {
        let config = Config::try_parse_from([
            "vmmgr",
            "-q",
            "-vv",
            "--backing-store",
            "store.bin",
            "addresses.txt",
        ])
        .unwrap();
        assert!(config.quiet);
        assert_eq!(config.backing_store, PathBuf::from("store.bin"));
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn missing_addresses() {
        assert!(Config::try_parse_from(["vmmgr"]).is_err());
    }
}
