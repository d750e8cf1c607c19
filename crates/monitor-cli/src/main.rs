//! monitor-delete-scope - remove a monitor scope and everything under it
//!
//! Usage:
//!   monitor-delete-scope <scope>              # Purge the scope
//!   monitor-delete-scope --dry-run <scope>    # Show what would be removed
//!   monitor-delete-scope -f json <scope>      # Machine-readable report

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monitor_core::commands::{PlanCommand, PurgeCommand, PurgeReport, ScopePlan};
use monitor_core::config::{ConfigStore, MonitorConfig};
use monitor_core::scope::ScopeName;
use monitor_core::store::SentinelStore;

/// Exit status for a malformed command line.
const USAGE_EXIT_CODE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "monitor-delete-scope")]
#[command(about = "Delete a monitor scope with all of its keys and hosts", long_about = None)]
#[command(version)]
struct Cli {
    /// Scope to delete
    #[arg(allow_hyphen_values = true)]
    scope: String,

    /// Config file (defaults to <config dir>/monitor/monitor.toml)
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One line per key as it is processed, then a summary
    #[default]
    Table,
    /// JSON report on stdout; progress goes to stderr
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monitor_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_invocation(std::env::args_os()) {
        Invocation::Run(cli) => run(cli),
        Invocation::Info(err) => err.exit(),
        Invocation::Usage => {
            let program = std::env::args_os()
                .next()
                .map(|arg| arg.to_string_lossy().into_owned());
            println!("{}", usage(program.as_deref()));
            std::process::exit(USAGE_EXIT_CODE);
        }
    }
}

/// What the command line asks for.
#[derive(Debug)]
enum Invocation {
    Run(Cli),
    /// `--help` or `--version`
    Info(clap::Error),
    Usage,
}

fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(err)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rejected command line");
            Invocation::Usage
        }
    }
}

fn usage(program: Option<&str>) -> String {
    format!("usage: {} scope", program.unwrap_or("monitor-delete-scope"))
}

fn run(cli: Cli) -> Result<()> {
    // Validate before touching the store.
    let scope = ScopeName::parse(cli.scope.as_str())?;
    let config = load_config(cli.config.as_deref())?;

    let store = SentinelStore::connect(&config.sentinel)
        .with_context(|| format!("Failed to connect to '{}'", config.sentinel.master))?;
    tracing::debug!(master = store.master(), "Store ready");

    if cli.dry_run {
        let plan = PlanCommand::new(store).execute(&scope)?;
        print_plan(&plan, cli.format)?;
        return Ok(());
    }

    let mut command = PurgeCommand::new(store);
    let report = match cli.format {
        OutputFormat::Table => command.execute(&scope, &mut std::io::stdout().lock())?,
        OutputFormat::Json => command.execute(&scope, &mut std::io::stderr().lock())?,
    };
    print_report(&report, cli.format)?;

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<MonitorConfig> {
    let store = match path {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::with_defaults()?,
    };
    store.load()
}

fn print_report(report: &PurgeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("✓ Deleted scope '{}'", report.scope);
            println!(
                "  {} keys, {} hosts, {} records removed",
                report.keys, report.hosts, report.deleted
            );
            if !report.deregistered {
                println!("  ⚠ scope was not registered in m:scopes");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

fn print_plan(plan: &ScopePlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut out = std::io::stdout().lock();
            write_plan_table(plan, &mut out)?;
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "scope": plan.scope,
                "registered": plan.registered,
                "keys": plan.keys,
                "records": plan.record_names(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn write_plan_table<W: Write>(plan: &ScopePlan, out: &mut W) -> std::io::Result<()> {
    if plan.keys.is_empty() {
        writeln!(out, "No keys registered under scope '{}'", plan.scope)?;
    } else {
        writeln!(out, "{:<40} {:>6}", "KEY", "HOSTS")?;
        writeln!(out, "{}", "-".repeat(47))?;
        for key in &plan.keys {
            writeln!(out, "{:<40} {:>6}", truncate(&key.key, 40), key.hosts.len())?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "Would delete {} records across {} keys and {} hosts{}",
        plan.record_names().len(),
        plan.keys.len(),
        plan.host_count(),
        if plan.registered {
            ""
        } else {
            " (scope not registered)"
        }
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
