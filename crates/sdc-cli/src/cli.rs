use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sdc",
    about = "Snapshot Diff Clone: replicate APFS volumes by their newest shared snapshot",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with clone defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that a source can be cloned onto destinations
    Cloneable(CloneableArgs),
    /// Show how a destination would be brought up to date
    Plan(PlanArgs),
    /// Clone a source onto one or more destinations
    Clone(CloneArgs),
    /// List a volume's snapshots, newest first
    Snapshots(SnapshotsArgs),
}

#[derive(Args)]
pub struct CloneableArgs {
    pub source: String,
    #[arg(required = true)]
    pub destinations: Vec<String>,
}

#[derive(Args)]
pub struct PlanArgs {
    pub source: String,
    pub destination: String,
}

#[derive(Args)]
pub struct CloneArgs {
    pub source: String,
    #[arg(required = true)]
    pub destinations: Vec<String>,
    /// Delete every destination snapshot except the replicated one
    #[arg(long)]
    pub prune: bool,
    /// Leave the destination carrying the source's name
    #[arg(long)]
    pub no_restore_name: bool,
    /// Skip re-listing the destination after replication
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Args)]
pub struct SnapshotsArgs {
    pub volume: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cloneable() {
        let cli = Cli::try_parse_from(["sdc", "cloneable", "/Volumes/src", "disk3s1", "disk4s1"]).unwrap();
        if let Command::Cloneable(args) = cli.command {
            assert_eq!(args.source, "/Volumes/src");
            assert_eq!(args.destinations, vec!["disk3s1", "disk4s1"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn cloneable_requires_destination() {
        assert!(Cli::try_parse_from(["sdc", "cloneable", "/Volumes/src"]).is_err());
    }

    #[test]
    fn parse_plan() {
        let cli = Cli::try_parse_from(["sdc", "plan", "src", "dst"]).unwrap();
        if let Command::Plan(args) = cli.command {
            assert_eq!(args.source, "src");
            assert_eq!(args.destination, "dst");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn plan_takes_one_destination() {
        assert!(Cli::try_parse_from(["sdc", "plan", "src", "a", "b"]).is_err());
    }

    #[test]
    fn parse_clone_with_prune() {
        let cli = Cli::try_parse_from(["sdc", "clone", "src", "dst", "--prune"]).unwrap();
        if let Command::Clone(args) = cli.command {
            assert!(args.prune);
            assert!(!args.no_restore_name);
            assert!(!args.no_verify);
            assert_eq!(args.destinations, vec!["dst"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_clone_flags() {
        let cli = Cli::try_parse_from(["sdc", "clone", "src", "a", "b", "--no-restore-name", "--no-verify"]).unwrap();
        if let Command::Clone(args) = cli.command {
            assert!(!args.prune);
            assert!(args.no_restore_name);
            assert!(args.no_verify);
            assert_eq!(args.destinations.len(), 2);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_snapshots() {
        let cli = Cli::try_parse_from(["sdc", "snapshots", "disk3s1"]).unwrap();
        assert!(matches!(cli.command, Command::Snapshots(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["sdc", "snapshots", "x", "--verbose", "--format", "json", "--config", "/etc/sdc.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/sdc.toml")));
    }

    #[test]
    fn default_format_is_text() {
        let cli = Cli::try_parse_from(["sdc", "snapshots", "x"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
    }
}
