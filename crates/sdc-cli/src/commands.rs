use anyhow::Context as _;
use colored::Colorize;
use sdc_cloner::{CloneError, CloneOptions, CloneOutcome, Cloner, ClonerConfig};
use sdc_directory::VolumeDirectory;
use sdc_sync::{ReplicationExecutor, Strategy};
use sdc_system::{Asr, DiskUtil};
use serde_json::json;

use crate::cli::*;

/// Collaborators and settings shared by every subcommand.
pub struct Context<'a> {
    pub directory: &'a dyn VolumeDirectory,
    pub executor: &'a dyn ReplicationExecutor,
    pub config: ClonerConfig,
    pub format: OutputFormat,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ClonerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClonerConfig::default(),
    };
    let directory = DiskUtil::new();
    let executor = Asr::new();
    let ctx = Context {
        directory: &directory,
        executor: &executor,
        config,
        format: cli.format,
    };
    execute(cli.command, &ctx)
}

pub fn execute(command: Command, ctx: &Context<'_>) -> anyhow::Result<()> {
    match command {
        Command::Cloneable(args) => cmd_cloneable(args, ctx),
        Command::Plan(args) => cmd_plan(args, ctx),
        Command::Clone(args) => cmd_clone(args, ctx),
        Command::Snapshots(args) => cmd_snapshots(args, ctx),
    }
}

/// Attach the error kind to a clone error.
fn failure(err: CloneError, what: String) -> anyhow::Error {
    let kind = err.kind();
    anyhow::Error::new(err).context(format!("{what} [{kind}]"))
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn options(args: &CloneArgs, config: &ClonerConfig) -> CloneOptions {
    let mut options = config.options();
    if args.prune {
        options = options.with_prune(true);
    }
    if args.no_restore_name {
        options = options.with_restore_destination_name(false);
    }
    if args.no_verify {
        options = options.with_verify_destination(false);
    }
    options
}

fn cmd_cloneable(args: CloneableArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let eligible = Cloner::default()
        .cloneable(ctx.directory, &args.source, &args.destinations)
        .map_err(|e| failure(e, format!("{} is not cloneable", args.source)))?;
    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "cloneable": true,
            "source": eligible.source,
            "destinations": eligible.destinations,
        })),
        OutputFormat::Text => {
            println!("{} {} is cloneable onto:", "✓".green().bold(), eligible.source.to_string().bold());
            for d in &eligible.destinations {
                println!("  {}", d.to_string().yellow());
            }
            Ok(())
        }
    }
}

fn cmd_plan(args: PlanArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let plan = Cloner::default()
        .plan(ctx.directory, &args.source, &args.destination)
        .map_err(|e| failure(e, format!("cannot plan {} -> {}", args.source, args.destination)))?;
    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::to_value(&plan)?),
        OutputFormat::Text => {
            let mode = match &plan.strategy {
                Strategy::Current { .. } => "current".green(),
                Strategy::Incremental { .. } => "incremental".cyan(),
                Strategy::Full { .. } => "full".red().bold(),
            };
            println!("{} {}", mode, plan);
            if plan.is_destructive() {
                println!("  {} existing history of {} will be erased", "!".red().bold(), plan.destination);
            }
            Ok(())
        }
    }
}

fn cmd_clone(args: CloneArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let options = options(&args, &ctx.config);
    let cloner = Cloner::default();

    // Validate every destination before touching any of them.
    let eligible = cloner
        .cloneable(ctx.directory, &args.source, &args.destinations)
        .map_err(|e| failure(e, format!("{} is not cloneable", args.source)))?;

    // Address volumes by id from here on: replication renames destinations,
    // which can make names ambiguous.
    let source = eligible.source.id.to_string();
    let mut outcomes = Vec::with_capacity(eligible.destinations.len());
    for destination in &eligible.destinations {
        let outcome = cloner
            .clone_volume(ctx.directory, ctx.executor, &source, &destination.id.to_string(), &options)
            .map_err(|e| failure(e, format!("clone {} -> {} failed", eligible.source, destination)))?;
        if ctx.format == OutputFormat::Text {
            print_outcome(&outcome);
        }
        outcomes.push(outcome);
    }

    if ctx.format == OutputFormat::Json {
        print_json(&serde_json::to_value(&outcomes)?)?;
    }
    Ok(())
}

fn print_outcome(outcome: &CloneOutcome) {
    let plan = &outcome.plan;
    match &plan.strategy {
        Strategy::Current { snapshot } => println!(
            "{} {} already current at {}",
            "✓".green().bold(),
            plan.destination.to_string().bold(),
            snapshot.name.cyan()
        ),
        Strategy::Incremental { from, to } => println!(
            "{} {} carried forward {} → {}",
            "✓".green().bold(),
            plan.destination.to_string().bold(),
            from.name.dimmed(),
            to.name.cyan()
        ),
        Strategy::Full { to } => println!(
            "{} {} replaced with {}",
            "✓".green().bold(),
            plan.destination.to_string().bold(),
            to.name.cyan()
        ),
    }
    if let Some(report) = &outcome.pruned {
        println!("  pruned {} snapshot(s), kept {}", report.deleted.len(), report.kept.name.cyan());
    }
}

fn cmd_snapshots(args: SnapshotsArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let volume = ctx
        .directory
        .resolve(&args.volume)
        .with_context(|| format!("cannot resolve volume {}", args.volume))?;
    let history = ctx
        .directory
        .history(&volume)
        .with_context(|| format!("cannot list snapshots of {volume}"))?;
    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "volume": volume,
            "snapshots": history,
        })),
        OutputFormat::Text => {
            println!("{} ({} snapshots)", volume.to_string().bold(), history.len());
            for s in &history {
                println!(
                    "  {}  {}  {}",
                    s.created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    s.id.short_id().yellow(),
                    s.name
                );
            }
            Ok(())
        }
    }
}
