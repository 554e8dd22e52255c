//! Record shape checks: adapter rejections, employee numbers, claimed levels.

use regex::Regex;
use skillcert_approvals::adapter::ParsedExport;
use skillcert_approvals::CertificationRecord;

use super::describe;
use crate::report::{AuditReport, AuditResult};

const SHAPE: &str = "records/shape";
const EMPLOYEE_NUMBER: &str = "records/employee-number";
const PERCENTAGE: &str = "records/percentage";

/// Reports rows the adapter could not turn into records.
#[must_use]
pub fn shape(export: &ParsedExport) -> AuditReport {
    let mut report = AuditReport::new();
    if export.rejected.is_empty() {
        report.push(AuditResult::pass(
            SHAPE,
            format!("All {} rows identify an employee, operation and line", export.row_count()),
        ));
    } else {
        report.push(AuditResult::warn_with_details(
            SHAPE,
            format!(
                "{} of {} rows were dropped",
                export.rejected.len(),
                export.row_count()
            ),
            export.rejected.iter().map(ToString::to_string).collect(),
        ));
    }
    report
}

/// Checks every employee number against `pattern`.
#[must_use]
pub fn employee_numbers(records: &[CertificationRecord], pattern: &Regex) -> AuditReport {
    let mut report = AuditReport::new();
    let offending: Vec<String> = records
        .iter()
        .filter(|r| !pattern.is_match(&r.employee_number))
        .map(|r| format!("{} does not match {}", describe(r), pattern.as_str()))
        .collect();
    if offending.is_empty() {
        report.push(AuditResult::pass(
            EMPLOYEE_NUMBER,
            "All employee numbers are well-formed",
        ));
    } else {
        report.push(AuditResult::fail_with_details(
            EMPLOYEE_NUMBER,
            format!("{} records have malformed employee numbers", offending.len()),
            offending,
        ));
    }
    report
}

/// Checks that every claimed level is 25, 50, 75 or 100.
#[must_use]
pub fn percentages(records: &[CertificationRecord]) -> AuditReport {
    let mut report = AuditReport::new();
    let offending: Vec<String> = records
        .iter()
        .filter(|r| !r.has_known_level())
        .map(|r| format!("{} claims {}%", describe(r), r.claimed_percentage))
        .collect();
    if offending.is_empty() {
        report.push(AuditResult::pass(
            PERCENTAGE,
            "All claimed levels are 25, 50, 75 or 100",
        ));
    } else {
        report.push(AuditResult::fail_with_details(
            PERCENTAGE,
            format!("{} records claim an unknown level", offending.len()),
            offending,
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use skillcert_approvals::adapter::parse_export;

    use super::*;
    use crate::report::Severity;

    #[test]
    fn rejected_rows_warn() {
        let export = parse_export(&json!([
            { "employee_number": "6685", "operation": "OP1", "line": "L1" },
            { "employee_number": "6685", "line": "L1" }
        ]));
        let report = shape(&export);
        let result = &report.results[0];
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.message, "1 of 2 rows were dropped");
        assert_eq!(result.details, vec!["row 1: missing operation"]);
    }

    #[test]
    fn employee_numbers_must_match() {
        let pattern = crate::AuditSettings::default().employee_number_pattern;
        let records = vec![
            CertificationRecord::new("6685", "OP1", 50),
            CertificationRecord::new("66850", "OP1", 50),
            CertificationRecord::new("A685", "OP2", 50),
        ];
        let report = employee_numbers(&records, &pattern);
        assert!(report.results[0].is_failure());
        assert_eq!(report.results[0].details.len(), 2);
        assert!(report.results[0].details[0].starts_with("66850 / OP1"));
    }

    #[test]
    fn unknown_levels_fail() {
        let records = vec![
            CertificationRecord::new("6685", "OP1", 25),
            CertificationRecord::new("6685", "OP2", 90),
            CertificationRecord::new("6685", "OP3", 0),
        ];
        let report = percentages(&records);
        assert!(report.results[0].is_failure());
        assert_eq!(
            report.results[0].details,
            vec!["6685 / OP2 claims 90%", "6685 / OP3 claims 0%"]
        );
    }

    #[test]
    fn clean_records_pass() {
        let records = vec![CertificationRecord::new("6685", "OP1", 100)];
        assert_eq!(percentages(&records).results[0].severity, Severity::Pass);
    }
}
