//! The employee × operation grid.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use skillcert_approvals::{ApprovalPolicy, CertificationRecord};
use tracing::debug;

/// Restricts a matrix to one production line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "label")]
pub enum LineFilter {
    /// Every line.
    #[default]
    All,
    /// Only records whose line label equals this one.
    Line(String),
}

impl LineFilter {
    /// Builds a filter from an optional line label; `None`, blank and
    /// `"todas"`/`"all"` select every line.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => LineFilter::All,
            Some(l) if l.eq_ignore_ascii_case("todas") || l.eq_ignore_ascii_case("all") => {
                LineFilter::All
            }
            Some(l) => LineFilter::Line(l.to_owned()),
        }
    }

    /// Returns true if `record` passes the filter.
    #[must_use]
    pub fn matches(&self, record: &CertificationRecord) -> bool {
        match self {
            LineFilter::All => true,
            LineFilter::Line(line) => record.line_label == *line,
        }
    }
}

/// Identity columns of a matrix row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    /// Employee number.
    pub number: String,
    /// Display name.
    pub name: String,
    /// Hire date as sent by the backend.
    pub hire_date: String,
    /// Certification date as sent by the backend.
    pub certification_date: String,
}

/// One employee's row: a display percentage for every operation column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    /// Identity columns.
    pub employee: EmployeeInfo,
    /// Display percentage per operation label; every column is present.
    pub certifications: BTreeMap<String, u32>,
}

/// The training matrix for one line filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingMatrix {
    /// Filter the matrix was built with.
    pub filter: LineFilter,
    /// Every line label present in the input, sorted (for filter pickers).
    pub lines: Vec<String>,
    /// Operation columns, sorted.
    pub operations: Vec<String>,
    /// Rows ordered by employee number.
    pub rows: Vec<MatrixRow>,
}

impl TrainingMatrix {
    /// Builds the matrix from `records`.
    ///
    /// Each cell holds the record's display percentage under `policy`. When
    /// several records hit the same (employee, operation) cell the later one
    /// wins. Cells with no record are 0.
    #[must_use]
    pub fn build(
        records: &[CertificationRecord],
        filter: &LineFilter,
        policy: &ApprovalPolicy,
    ) -> Self {
        let lines = available_lines(records);
        let operations = operations_for(records, filter);

        let mut by_employee: BTreeMap<&str, MatrixRow> = BTreeMap::new();
        for record in records.iter().filter(|r| filter.matches(r)) {
            let row = by_employee
                .entry(record.employee_number.as_str())
                .or_insert_with(|| MatrixRow {
                    employee: EmployeeInfo {
                        number: record.employee_number.clone(),
                        name: record.employee_name.clone(),
                        hire_date: record.hire_date.clone(),
                        certification_date: record.certification_date.clone(),
                    },
                    certifications: BTreeMap::new(),
                });
            let shown = policy.display_percentage(record.claimed_percentage, record);
            row.certifications
                .insert(record.operation_label.clone(), shown);
        }

        let rows: Vec<MatrixRow> = by_employee
            .into_values()
            .map(|mut row| {
                for operation in &operations {
                    row.certifications.entry(operation.clone()).or_insert(0);
                }
                row
            })
            .collect();

        debug!(
            records = records.len(),
            employees = rows.len(),
            operations = operations.len(),
            "built training matrix"
        );

        Self {
            filter: filter.clone(),
            lines,
            operations,
            rows,
        }
    }

    /// Returns the display percentage for an (employee, operation) cell, or
    /// `None` if the employee is not in the matrix.
    #[must_use]
    pub fn cell(&self, employee_number: &str, operation: &str) -> Option<u32> {
        self.rows
            .iter()
            .find(|row| row.employee.number == employee_number)
            .and_then(|row| row.certifications.get(operation).copied())
    }

    /// Returns true if the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sorted unique line labels across all records.
#[must_use]
pub fn available_lines(records: &[CertificationRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.line_label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted unique operation labels among records passing `filter`.
#[must_use]
pub fn operations_for(records: &[CertificationRecord], filter: &LineFilter) -> Vec<String> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| r.operation_label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Splits `"OP001 - Costura"` into (`"OP001"`, `"Costura"`). A label without
/// the separator is returned as both code and name.
#[must_use]
pub fn split_operation_label(label: &str) -> (&str, &str) {
    match label.split_once(" - ") {
        Some((code, name)) if !name.is_empty() => (code, name),
        Some((code, _)) => (code, code),
        None => (label, label),
    }
}
