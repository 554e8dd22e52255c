//! Approval checks: suppressed 100% claims, backend flag drift, stray roles.

use skillcert_approvals::aggregate::satisfied_roles;
use skillcert_approvals::{ApprovalPolicy, CertificationRecord, FULL_CERTIFICATION};

use super::describe;
use crate::report::{AuditReport, AuditResult};

const GATING: &str = "approvals/gating";
const BACKEND_FLAG: &str = "approvals/backend-flag";
const UNKNOWN_ROLES: &str = "approvals/unknown-roles";

/// Lists 100% claims that will display as 0 and the roles each still needs.
#[must_use]
pub fn gating(records: &[CertificationRecord], policy: &ApprovalPolicy) -> AuditReport {
    let mut report = AuditReport::new();
    let mut claimed = 0usize;
    let mut suppressed = Vec::new();
    for record in records
        .iter()
        .filter(|r| r.claimed_percentage == FULL_CERTIFICATION)
    {
        claimed += 1;
        if policy.display_percentage(record.claimed_percentage, record) == 0 {
            let line = if record.backend_fully_approved == Some(false) {
                format!("{} rejected by backend flag", describe(record))
            } else if policy.required_roles(record).is_empty() {
                format!("{} has no required roles configured", describe(record))
            } else {
                let missing: Vec<String> = policy.missing_roles(record).into_iter().collect();
                format!("{} missing {}", describe(record), missing.join(", "))
            };
            suppressed.push(line);
        }
    }

    if suppressed.is_empty() {
        report.push(AuditResult::pass(
            GATING,
            format!("All {claimed} full certifications are approved"),
        ));
    } else {
        report.push(AuditResult::warn_with_details(
            GATING,
            format!(
                "{} of {claimed} full certifications are displayed as 0",
                suppressed.len()
            ),
            suppressed,
        ));
    }
    report
}

/// Flags records whose explicit backend flag disagrees with their signatures.
#[must_use]
pub fn backend_flag(records: &[CertificationRecord], policy: &ApprovalPolicy) -> AuditReport {
    let mut report = AuditReport::new();
    let drift: Vec<String> = records
        .iter()
        .filter_map(|record| {
            let flag = record.backend_fully_approved?;
            let computed = policy.roles_satisfied(record);
            (flag != computed).then(|| {
                format!(
                    "{} backend says {flag}, signatures say {computed}",
                    describe(record)
                )
            })
        })
        .collect();

    if drift.is_empty() {
        report.push(AuditResult::pass(
            BACKEND_FLAG,
            "Backend approval flags agree with recorded signatures",
        ));
    } else {
        report.push(AuditResult::warn_with_details(
            BACKEND_FLAG,
            format!("{} records carry a flag that contradicts their signatures", drift.len()),
            drift,
        ));
    }
    report
}

/// Flags approvals signed under a role the record does not require.
#[must_use]
pub fn unknown_roles(records: &[CertificationRecord], policy: &ApprovalPolicy) -> AuditReport {
    let mut report = AuditReport::new();
    let mut stray = Vec::new();
    for record in records {
        let required = policy.required_roles(record);
        let extra: Vec<String> = satisfied_roles(record)
            .into_iter()
            .filter(|role| !required.contains(role))
            .collect();
        if !extra.is_empty() {
            stray.push(format!("{} signed by {}", describe(record), extra.join(", ")));
        }
    }

    if stray.is_empty() {
        report.push(AuditResult::pass(
            UNKNOWN_ROLES,
            "Every approval belongs to a required role",
        ));
    } else {
        report.push(AuditResult::warn_with_details(
            UNKNOWN_ROLES,
            format!("{} records have approvals from unrequired roles", stray.len()),
            stray,
        ));
    }
    report
}
