//! Structural JSON diff CLI
//!
//! Compares an actual JSON document with an expected one and lists every
//! difference, optionally skipping volatile fields.
//!
//! Usage:
//!   rest-assert-diff <ACTUAL> <EXPECTED> [OPTIONS]
//!
//! Exit codes: 0 when the documents are equal, 1 when they differ, 2 when an
//! input or the configuration cannot be loaded.

use clap::Parser;
use rest_assert_diff::config::DiffConfig;
use rest_assert_diff::{diff_files, DiffIssue, DiffKind, DiffReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Structural JSON diff
#[derive(Parser, Debug)]
#[command(name = "rest-assert-diff")]
#[command(
    author,
    version,
    about = "Compare two JSON documents and list their structural differences"
)]
struct Args {
    /// Actual JSON document
    actual: PathBuf,

    /// Expected JSON document
    expected: PathBuf,

    /// Dotted path to skip (repeatable), e.g. --ignore id --ignore meta.createdAt
    #[arg(short, long = "ignore", value_name = "PATH")]
    ignore: Vec<String>,

    /// YAML configuration file
    #[arg(short, long, env = "REST_ASSERT_DIFF_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(short, long)]
    output: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{RED}{BOLD}error:{RESET} {e:#}");
            return ExitCode::from(2);
        }
    };

    let options = config.to_options(&[]);
    debug!(ignore = ?options.ignore, "Comparing documents");

    let report = match diff_files(&args.actual, &args.expected, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{RED}{BOLD}error:{RESET} {e}");
            return ExitCode::from(2);
        }
    };

    let output = config.output.as_deref().unwrap_or("text");
    if output == "json" {
        if let Err(e) = print_report_json(&report) {
            eprintln!("{RED}{BOLD}error:{RESET} {e}");
            return ExitCode::from(2);
        }
    } else {
        print_report(&report);
    }

    if report.is_equal() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Log to stderr so JSON output stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file (if any), merge command-line flags into it and
/// validate the result.
fn load_config(args: &Args) -> Result<DiffConfig, anyhow::Error> {
    let mut config = match &args.config {
        Some(path) => DiffConfig::from_file(path)
            .map_err(|e| e.context(format!("Failed to load config {}", path.display())))?,
        None => DiffConfig::default(),
    };
    if args.output.is_some() {
        config.output = args.output.clone();
    }
    config.ignore = config.to_options(&args.ignore).ignore;
    config.validate()?;
    Ok(config)
}

fn print_report_json(report: &DiffReport) -> Result<(), serde_json::Error> {
    let output = serde_json::to_string_pretty(report)?;
    println!("{output}");
    Ok(())
}

fn print_report(report: &DiffReport) {
    println!("{BOLD}{CYAN}JSON Diff{RESET}");
    println!("{DIM}{RULE}{RESET}");
    println!("{DIM}Actual:{RESET}   {CYAN}{}{RESET}", report.actual);
    println!("{DIM}Expected:{RESET} {CYAN}{}{RESET}", report.expected);
    if !report.ignored.is_empty() {
        println!("{DIM}Ignoring:{RESET} {}", report.ignored.join(", "));
    }
    println!();

    for issue in &report.issues {
        print_issue(issue);
    }
    if !report.issues.is_empty() {
        println!();
    }

    // Summary
    println!("{DIM}{RULE}{RESET}");
    println!("{BOLD}{CYAN}Summary{RESET}");
    println!("{DIM}{RULE}{RESET}");
    for kind in [
        DiffKind::Missing,
        DiffKind::Unexpected,
        DiffKind::Mismatch,
        DiffKind::Type,
        DiffKind::Size,
        DiffKind::Null,
    ] {
        let count = report.count_kind(kind);
        if count > 0 {
            println!(
                "  {}{:<11}{RESET} {BOLD}{count}{RESET}",
                kind_color(kind),
                format!("{}:", kind.label())
            );
        }
    }
    println!();

    if report.is_equal() {
        println!("{GREEN}{BOLD}Documents are equal{RESET}");
    } else {
        println!(
            "{RED}{BOLD}Documents differ ({} difference(s)){RESET}",
            report.count()
        );
    }
}

fn print_issue(issue: &DiffIssue) {
    let color = kind_color(issue.kind);
    let location = issue
        .path
        .as_ref()
        .map(|p| format!("{DIM}[{RESET}{CYAN}{p}{RESET}{DIM}]{RESET} "))
        .unwrap_or_default();
    println!(
        "  {color}|{RESET} {location}{BOLD}{color}{}{RESET}: {}",
        issue.kind.label(),
        issue.message
    );
}

fn kind_color(kind: DiffKind) -> &'static str {
    match kind {
        DiffKind::Missing | DiffKind::Unexpected => YELLOW,
        DiffKind::Mismatch | DiffKind::Type | DiffKind::Size | DiffKind::Null => RED,
    }
}
