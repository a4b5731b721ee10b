//! CLI argument definitions using clap
//!
//! Commands:
//! - querymap select [--config <path>] [--log-level <filter>]
//! - querymap insert [--config <path>] [--log-level <filter>]
//! - querymap named [--log-level <filter>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// querymap - compile predicate maps into parameterized statements
#[derive(Parser, Debug)]
#[command(name = "querymap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON compiler configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter written to stderr, e.g. "debug" or "querymap=trace"
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Compile a select from {"table", "where", "fields"}
    Select,

    /// Compile an insert from {"table", "supertable", "tags", "rows"}
    Insert,

    /// Expand a named template from {"template", "params"}
    Named,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["querymap", "select"]).unwrap();
        assert_eq!(cli.command, Command::Select);
        assert_eq!(cli.log_level, "warn");
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "querymap",
            "insert",
            "--config",
            "qm.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Insert);
        assert_eq!(cli.config, Some(PathBuf::from("qm.json")));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["querymap", "delete"]).is_err());
    }
}
