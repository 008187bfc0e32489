//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use presskit_core::SkipPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "presskit", version)]
#[command(about = "Collect developer contact channels for upcoming storefront releases")]
pub struct Cli {
    /// Configuration file (defaults to the XDG config location)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl the configured listing pages and enrich new or incomplete records
    Run(RunArgs),
    /// Print stored records, newest releases first
    List(ListArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Record store file
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Listing offsets to visit, comma separated (e.g. 0,50,100)
    #[arg(long, value_name = "LIST")]
    pub offsets: Option<String>,

    /// Which known listings to leave alone: has-emails, has-any-contact or never
    #[arg(long, value_name = "POLICY")]
    pub skip_policy: Option<SkipPolicy>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Record store file
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Only records with at least one contact channel
    #[arg(long, conflicts_with = "latent")]
    pub actionable: bool,

    /// Only records with no contact channel yet
    #[arg(long)]
    pub latent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "presskit",
            "--config",
            "/tmp/presskit.toml",
            "run",
            "--offsets",
            "0,50",
            "--skip-policy",
            "has-any-contact",
        ])
        .expect("valid arguments");

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/presskit.toml")));
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.offsets.as_deref(), Some("0,50"));
        assert_eq!(args.skip_policy, Some(SkipPolicy::HasAnyContact));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["presskit", "list", "--config", "c.toml", "--actionable"])
            .expect("valid arguments");
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Command::List(ListArgs { actionable: true, .. })));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["presskit", "run", "--skip-policy", "sometimes"]).is_err());
        assert!(Cli::try_parse_from(["presskit", "list", "--actionable", "--latent"]).is_err());
    }
}
