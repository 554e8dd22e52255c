//! `skillcert-evaluate`: Applies the approval gating rule to every record of
//! an export and prints what the plant floor would see.
//!
//! **Usage:**
//! ```text
//! skillcert-evaluate --input <file-or-dir> [--roles a,b,c] [--employee <number>] [--format text|json]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use skillcert_approvals::{ApprovalEntry, ApprovalView, CertificationRecord};
use skillcert_clients::{input, roles_flag_policy, CommonArgs, OutputFormat};
use tracing::debug;

/// Evaluate certification records against the approval gating rule.
#[derive(Parser)]
#[command(
    name = "skillcert-evaluate",
    about = "Show claimed and displayed certification levels with their approval state"
)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Comma-separated fallback required roles (overrides [approvals]).
    #[arg(long)]
    roles: Option<String>,

    /// Only show records for this employee number.
    #[arg(long)]
    employee: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Evaluation<'a> {
    employee_number: &'a str,
    employee_name: &'a str,
    operation: &'a str,
    line: &'a str,
    #[serde(flatten)]
    view: ApprovalView,
    latest_approval: Option<&'a ApprovalEntry>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.common.load_config()?;
    args.common.init_logging(&config)?;

    let policy = match &args.roles {
        Some(roles) => roles_flag_policy(roles)?,
        None => config.policy()?,
    };
    debug!(roles = ?policy.default_required_roles(), "fallback required roles");

    let export = input::load_exports(&args.common.input)
        .with_context(|| format!("Failed to load {}", args.common.input.display()))?;

    let selected: Vec<&CertificationRecord> = export
        .records
        .iter()
        .filter(|r| args.employee.as_deref().map_or(true, |n| r.employee_number == n))
        .collect();

    let evaluations: Vec<Evaluation<'_>> = selected
        .iter()
        .map(|record| Evaluation {
            employee_number: &record.employee_number,
            employee_name: &record.employee_name,
            operation: &record.operation_label,
            line: &record.line_label,
            view: policy.evaluate(record),
            latest_approval: record.latest_approval(),
        })
        .collect();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&evaluations)?);
        }
        OutputFormat::Text => print_text(&evaluations),
    }

    if !export.rejected.is_empty() {
        eprintln!("{} row(s) could not be read:", export.rejected.len());
        for rejection in &export.rejected {
            eprintln!("  {rejection}");
        }
    }
    Ok(())
}

fn print_text(evaluations: &[Evaluation<'_>]) {
    println!("SkillCert Approval Evaluation");
    println!("=============================");
    println!();

    let mut approved = 0usize;
    let mut suppressed = 0usize;
    for e in evaluations {
        let state = if e.view.fully_approved {
            approved += 1;
            "APPROVED"
        } else if e.view.claimed_percentage != e.view.display_percentage {
            suppressed += 1;
            "GATED"
        } else {
            "PENDING"
        };
        println!(
            "[{state}] {} {} / {} ({}): claimed {}%, shown {}%",
            e.employee_number,
            e.employee_name,
            e.operation,
            e.line,
            e.view.claimed_percentage,
            e.view.display_percentage
        );
        if !e.view.missing_roles.is_empty() {
            println!("       missing: {}", e.view.missing_roles.join(", "));
        }
        if let Some(latest) = e.latest_approval {
            let by = latest.approved_by.as_deref().unwrap_or("?");
            match latest.approved_at.as_deref() {
                Some(at) => println!("       last approval: {} by {by} at {at}", latest.role),
                None => println!("       last approval: {} by {by}", latest.role),
            }
        }
    }

    println!();
    println!(
        "Summary: {} records, {} fully approved, {} full claims shown as 0",
        evaluations.len(),
        approved,
        suppressed
    );
}
