//! SkillCert data audit.
//!
//! Validates a certification export the way the training matrix will consume
//! it, and reports what the plant floor would otherwise never see: rows the
//! adapter dropped, malformed employee numbers and levels, 100% claims that
//! the gating rule suppresses, and disagreements between the backend's own
//! approval flag and the recorded signatures.
//!
//! # Checks
//!
//! | Check | Severity | Rule |
//! |-------|----------|------|
//! | `records/shape` | warning | rows rejected by the adapter |
//! | `records/employee-number` | failure | number does not match the configured pattern |
//! | `records/percentage` | failure | claimed level not in 25/50/75/100 |
//! | `approvals/gating` | warning | 100% claims displayed as 0 |
//! | `approvals/backend-flag` | warning | backend flag disagrees with signatures |
//! | `approvals/unknown-roles` | warning | signatures from roles nobody requires |
//!
//! # Entry Point
//!
//! ```
//! use skillcert_approvals::adapter::parse_export;
//! use skillcert_audit::{run_all, AuditSettings};
//!
//! let payload = serde_json::json!([
//!     { "employee_number": "6685", "operation": "OP001", "line": "L001", "porcentaje": 75 }
//! ]);
//! let export = parse_export(&payload);
//! let settings = AuditSettings::default();
//! let report = run_all(&export, &settings);
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod checks;
pub mod report;

use regex::Regex;
use skillcert_approvals::adapter::ParsedExport;
use skillcert_approvals::ApprovalPolicy;
use thiserror::Error;
use tracing::info;

pub use report::{AuditReport, AuditResult, Severity};

/// Employee numbers are four digits unless configured otherwise.
pub const DEFAULT_EMPLOYEE_NUMBER_PATTERN: &str = r"^\d{4}$";

/// Errors raised while preparing an audit.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The configured employee-number pattern is not a valid regex.
    #[error("invalid employee number pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// Compilation error.
        source: regex::Error,
    },
}

/// Parameters shared by all checks.
#[derive(Debug, Clone)]
pub struct AuditSettings {
    /// Gating policy (fallback required roles).
    pub policy: ApprovalPolicy,
    /// Pattern every employee number must match.
    pub employee_number_pattern: Regex,
}

impl AuditSettings {
    /// Builds settings from a policy and an employee-number pattern.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(policy: ApprovalPolicy, pattern: &str) -> Result<Self, AuditError> {
        let employee_number_pattern =
            Regex::new(pattern).map_err(|source| AuditError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })?;
        Ok(Self {
            policy,
            employee_number_pattern,
        })
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            policy: ApprovalPolicy::default(),
            employee_number_pattern: default_pattern(),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_pattern() -> Regex {
    // The literal is a constant known to compile.
    Regex::new(DEFAULT_EMPLOYEE_NUMBER_PATTERN).expect("default employee number pattern")
}

/// Runs every check over `export` and returns the aggregated report.
///
/// Checks run in this order:
/// 1. Record shape (adapter rejections)
/// 2. Employee numbers
/// 3. Claimed levels
/// 4. Display gating of 100% claims
/// 5. Backend flag consistency
/// 6. Unknown approval roles
#[must_use]
pub fn run_all(export: &ParsedExport, settings: &AuditSettings) -> AuditReport {
    let mut report = AuditReport::new();

    // 1-3. Record checks
    report.extend(checks::records::shape(export));
    report.extend(checks::records::employee_numbers(
        &export.records,
        &settings.employee_number_pattern,
    ));
    report.extend(checks::records::percentages(&export.records));

    // 4-6. Approval checks
    report.extend(checks::approvals::gating(&export.records, &settings.policy));
    report.extend(checks::approvals::backend_flag(&export.records, &settings.policy));
    report.extend(checks::approvals::unknown_roles(&export.records, &settings.policy));

    info!(
        rows = export.row_count(),
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "audit finished"
    );
    report
}
