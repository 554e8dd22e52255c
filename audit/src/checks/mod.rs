//! Audit checks over record shape and approval state.

pub mod approvals;
pub mod records;

use skillcert_approvals::CertificationRecord;

/// Identifies a record in detail lines: `6685 / OP001 - Costura (L001)`.
pub(crate) fn describe(record: &CertificationRecord) -> String {
    let mut out = format!("{} / {}", record.employee_number, record.operation_label);
    if !record.line_label.is_empty() {
        out.push_str(&format!(" ({})", record.line_label));
    }
    if let Some(id) = &record.id {
        out.push_str(&format!(" [id {id}]"));
    }
    out
}
