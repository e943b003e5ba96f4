//! tsfix CLI - rewrite known lint offenders in place
//!
//! Running `tsfix` with no arguments applies every compiled-in rule set to
//! its target file, relative to the current directory, and prints
//! `Files modified.` when done.

mod config;
mod output;
mod process;

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use config::{unknown_targets, FailurePolicy, Mode, RunConfig};
use output::{OutputFormat, Reporter};
use tsfix_rules::RuleSetRegistry;

#[derive(Parser)]
#[command(name = "tsfix")]
#[command(version)]
#[command(about = "Apply fixed text rewrite rules to clear known lint warnings")]
struct Cli {
    /// Report what would change without writing files
    #[arg(long)]
    check: bool,

    /// Fail a file if re-running its rules on the output would change it again
    #[arg(long)]
    verify: bool,

    /// Keep processing the remaining files after one fails
    #[arg(long)]
    keep_going: bool,

    /// Directory the target paths are relative to
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Only process this target (can be specified multiple times)
    #[arg(long, value_name = "TARGET")]
    only: Vec<PathBuf>,

    /// Output format: text, json, diff
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: String,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Show per-file results and debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List targets and their rules, then exit
    #[arg(long)]
    list_rules: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = RuleSetRegistry::new();

    if cli.list_rules {
        print_rules(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::from_str(&cli.format).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid output format '{}'. Valid options: text, json, diff",
                cli.format
            )
        })?
    };

    let unknown = unknown_targets(&registry, &cli.only);
    if !unknown.is_empty() {
        for target in unknown {
            eprintln!(
                "{}: Unknown target '{}'. Use --list-rules to see configured targets.",
                "Error".red(),
                target.display()
            );
        }
        return Ok(ExitCode::from(1));
    }

    let config = RunConfig {
        root: cli.root,
        mode: if cli.check { Mode::Check } else { Mode::Fix },
        policy: if cli.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        },
        verify: cli.verify,
    };

    let rule_sets = registry.select(&cli.only);
    tracing::debug!(
        root = %config.root.display(),
        mode = ?config.mode,
        targets = rule_sets.len(),
        "starting run"
    );

    let mut reporter = Reporter::new(output_format, cli.verbose);
    let outcomes = process::run(&rule_sets, &config, &mut reporter)?;
    for outcome in &outcomes {
        tracing::debug!(path = %outcome.path.display(), state = ?outcome.state, "finished");
    }

    let exit_code = reporter.summary().exit_code(config.mode);
    reporter.finish(config.mode)?;

    Ok(ExitCode::from(exit_code))
}

fn print_rules(registry: &RuleSetRegistry) {
    println!("{}", "Configured targets:".bold());
    for target in registry.list() {
        println!();
        println!("  {}", target.target.display().to_string().bold());
        for rule in target.rules {
            println!("    {} - {}", rule.name.green(), rule.description);
            if let Some(scope) = rule.scope {
                println!("      {}", format!("assumes: {}", scope).dimmed());
            }
            for guard in rule.guards {
                println!("      {}", guard.to_string().dimmed());
            }
        }
    }
}
