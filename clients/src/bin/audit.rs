//! `skillcert-audit`: Audits certification exports before they reach the
//! training matrix.
//!
//! Runs every check in `skillcert-audit`:
//! - record shape (rows the adapter had to drop)
//! - employee number format and claimed levels
//! - suppressed 100% claims, backend flag drift, stray approval roles
//!
//! **Usage:**
//! ```text
//! skillcert-audit --input <file-or-dir> [--employee-pattern <regex>] [--format text|json]
//! ```
//!
//! Exits non-zero if any check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use skillcert_audit::{run_all, AuditSettings};
use skillcert_clients::{input, CommonArgs, OutputFormat};

/// Run the SkillCert data audit.
#[derive(Parser)]
#[command(
    name = "skillcert-audit",
    about = "Validate certification exports and report gated or inconsistent records"
)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Employee number regex (overrides [audit] employee_number_pattern).
    #[arg(long)]
    employee_pattern: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = args.common.load_config()?;
    args.common.init_logging(&config)?;

    if let Some(pattern) = &args.employee_pattern {
        config.audit.employee_number_pattern = pattern.clone();
    }
    let settings: AuditSettings = config.audit_settings()?;

    let export = input::load_exports(&args.common.input)
        .with_context(|| format!("Failed to load {}", args.common.input.display()))?;
    let report = run_all(&export, &settings);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("SkillCert Audit Report");
            println!("======================");
            println!();
            for result in &report.results {
                println!(
                    "[{}] {}: {}",
                    result.severity.label(),
                    result.check,
                    result.message
                );
                for detail in &result.details {
                    println!("       {detail}");
                }
            }
            println!();
            println!(
                "Summary: {} passed, {} warnings, {} failed",
                report.pass_count(),
                report.warning_count(),
                report.failure_count()
            );
        }
    }

    if !report.all_passed() {
        eprintln!(
            "Audit FAILED: {} check(s) did not pass.",
            report.failure_count()
        );
        process::exit(1);
    }

    if args.format == OutputFormat::Text {
        println!("Audit PASSED.");
    }
    Ok(())
}
