//! Tolerant mapping from backend JSON to [`CertificationRecord`].
//!
//! The training backend is not consistent about key names (`aprobaciones` vs
//! `approvals` vs `firmas`, `porcentaje` vs `percentage`, nested `user`
//! objects, labels sent either as strings or as `{code, name}` objects). All
//! of that aliasing is resolved here so the aggregator only ever sees the
//! typed record.
//!
//! Rows that cannot identify an employee, an operation and a line are
//! rejected. Rejections are data, returned next to the accepted records, so
//! callers can report them.

pub mod keys;
pub mod value;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{ApprovalEntry, CertificationRecord};
use value::{
    compose_label, first, first_text, join_label, lookup, parse_flag, parse_percentage,
};

/// Errors raised while reading a whole export.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The payload is not JSON at all.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The payload root is a scalar and cannot hold rows.
    #[error("payload root is a {0}, expected an object or an array")]
    NotAContainer(&'static str),
}

/// Why a row was not turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    /// The row is not a JSON object.
    #[error("row is not an object")]
    NotAnObject,
    /// No employee number under any alias.
    #[error("missing employee number")]
    MissingEmployeeNumber,
    /// No operation label could be composed.
    #[error("missing operation")]
    MissingOperation,
    /// No line label could be composed.
    #[error("missing line")]
    MissingLine,
}

/// A rejected row and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    /// Input the row was read from (file name), when known.
    pub source: Option<String>,
    /// Zero-based index of the row in its array.
    pub index: usize,
    /// Rejection cause.
    pub reason: RejectionReason,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{source} row {}: {}", self.index, self.reason),
            None => write!(f, "row {}: {}", self.index, self.reason),
        }
    }
}

/// Records and rejections read from one or more exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedExport {
    /// Rows accepted as certification records, in input order.
    pub records: Vec<CertificationRecord>,
    /// Rows that were dropped.
    pub rejected: Vec<RowRejection>,
}

impl ParsedExport {
    /// Tags every rejection with `source`.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        for rejection in &mut self.rejected {
            rejection.source = Some(source.to_owned());
        }
        self
    }

    /// Appends another export.
    pub fn extend(&mut self, other: ParsedExport) {
        self.records.extend(other.records);
        self.rejected.extend(other.rejected);
    }

    /// Returns the number of rows seen (accepted + rejected).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

/// Maps one backend row to a record.
///
/// # Errors
///
/// Returns the [`RejectionReason`] when the row is not an object or lacks an
/// employee number, an operation, or a line.
pub fn parse_record(row: &Value) -> Result<CertificationRecord, RejectionReason> {
    if !row.is_object() {
        return Err(RejectionReason::NotAnObject);
    }

    let employee_number =
        first_text(row, keys::EMPLOYEE_NUMBER).ok_or(RejectionReason::MissingEmployeeNumber)?;

    let operation_label = compose_label(
        first(row, keys::OPERATION),
        keys::OPERATION_CODE,
        keys::NAME,
        Some("OP"),
    );
    if operation_label.is_empty() {
        return Err(RejectionReason::MissingOperation);
    }

    let line_label = compose_label(first(row, keys::LINE), keys::LINE_CODE, keys::NAME, Some("L"));
    if line_label.is_empty() {
        return Err(RejectionReason::MissingLine);
    }

    Ok(CertificationRecord {
        id: first_text(row, keys::RECORD_ID),
        employee_number,
        employee_name: first_text(row, keys::EMPLOYEE_NAME).unwrap_or_default(),
        hire_date: first_text(row, keys::HIRE_DATE).unwrap_or_default(),
        certification_date: first_text(row, keys::CERTIFICATION_DATE).unwrap_or_default(),
        operation_id: first_text(row, keys::OPERATION_ID),
        operation_label,
        line_label,
        program_label: program_label(row),
        area_label: flat_or_object_label(row, keys::AREA, keys::AREA_CODE, "area"),
        trainer: flat_or_object_label(row, keys::TRAINER, keys::TRAINER_CODE, "trainer"),
        claimed_percentage: parse_percentage(first(row, keys::PERCENTAGE)),
        approvals: parse_approvals(row),
        required_roles: parse_required_roles(row),
        backend_fully_approved: backend_flag(row),
    })
}

/// Maps every row of an already-parsed payload.
#[must_use]
pub fn parse_export(payload: &Value) -> ParsedExport {
    let mut export = ParsedExport::default();
    for (index, row) in value::extract_array(payload, keys::RECORD_ENVELOPES)
        .iter()
        .enumerate()
    {
        match parse_record(row) {
            Ok(record) => export.records.push(record),
            Err(reason) => {
                debug!(index, %reason, "rejected certification row");
                export.rejected.push(RowRejection {
                    source: None,
                    index,
                    reason,
                });
            }
        }
    }
    export
}

/// Parses JSON text and maps every row.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidJson`] for malformed JSON and
/// [`AdapterError::NotAContainer`] when the root is a scalar.
pub fn parse_export_str(text: &str) -> Result<ParsedExport, AdapterError> {
    let payload: Value = serde_json::from_str(text)?;
    let kind = match &payload {
        Value::Object(_) | Value::Array(_) => None,
        Value::Null => Some("null"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(_) => Some("number"),
        Value::String(_) => Some("string"),
    };
    if let Some(kind) = kind {
        return Err(AdapterError::NotAContainer(kind));
    }
    Ok(parse_export(&payload))
}

/// First alias whose value parses as a flag; unparseable values are skipped.
fn backend_flag(row: &Value) -> Option<bool> {
    keys::FULLY_APPROVED
        .iter()
        .find_map(|key| parse_flag(lookup(row, key)))
}

fn parse_approvals(row: &Value) -> Vec<ApprovalEntry> {
    let Some(list) = first(row, keys::APPROVALS).and_then(Value::as_array) else {
        return Vec::new();
    };
    list.iter().filter_map(parse_approval).collect()
}

fn parse_approval(entry: &Value) -> Option<ApprovalEntry> {
    match entry {
        Value::String(role) => Some(ApprovalEntry::new(role.trim())),
        Value::Object(_) => Some(ApprovalEntry {
            role: role_label(first(entry, keys::APPROVAL_ROLE)),
            approved_by: first_text(entry, keys::APPROVED_BY),
            approved_at: first_text(entry, keys::APPROVED_AT),
        }),
        _ => None,
    }
}

fn parse_required_roles(row: &Value) -> Vec<String> {
    let Some(list) = first(row, keys::REQUIRED_ROLES).and_then(Value::as_array) else {
        return Vec::new();
    };
    list.iter()
        .map(|entry| role_label(Some(entry)))
        .filter(|role| !role.is_empty())
        .collect()
}

/// A role may arrive as a plain string or as a `{name}` object.
fn role_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(object @ Value::Object(_)) => {
            first_text(object, &["name", "nombre", "role", "rol"]).unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn program_label(row: &Value) -> String {
    let label = compose_label(
        first(row, keys::PROGRAM),
        keys::PROGRAM_CODE,
        keys::NAME,
        None,
    );
    if !label.is_empty() {
        return label;
    }
    first_text(
        row,
        &["programa_id", "program_id", "operation.programa_id", "operation.program_id"],
    )
    .map(|id| format!("PG{id}"))
    .unwrap_or_default()
}

/// Labels that arrive either as an object under `object_keys` or as flat
/// `<prefix>_code` / `<prefix>_name` fields (`trainer_name`, `area_code`).
fn flat_or_object_label(row: &Value, object_keys: &[&str], code_keys: &[&str], prefix: &str) -> String {
    let label = compose_label(first(row, object_keys), code_keys, keys::NAME, None);
    if !label.is_empty() {
        return label;
    }
    let code_key = format!("{prefix}_code");
    let number_key = format!("{prefix}_employee_number");
    let name_key = format!("{prefix}_name");
    let code = first_text(row, &[code_key.as_str(), number_key.as_str()]);
    let name = first_text(row, &[name_key.as_str()]);
    join_label(code.as_deref(), name.as_deref())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn full_row_maps_every_field() {
        let row = json!({
            "id": 41,
            "employee_number": "6685",
            "user": { "name": "Juan Gerardo Alcantar", "fecha_ingreso": "2019-04-01" },
            "fecha_certificacion": "2024-01-15",
            "operation_id": 7,
            "operation": { "number_operation": "OP001", "name": "Costura Básica" },
            "line": { "number_line": "L001", "name": "Línea 1" },
            "program": { "code": "PG001", "name": "Programa Básico" },
            "area": { "code": "A001", "name": "Producción" },
            "trainer": { "employee_number": "1234", "name": "Supervisor García" },
            "porcentaje": 100,
            "aprobaciones": [
                { "rol": "Mantenimiento", "aprobado_por": "2001", "fecha": "2024-01-16" },
                { "scope": { "name": "Producción" } },
                "calidad"
            ],
            "required_roles": ["mantenimiento", { "nombre": "produccion" }, "calidad"]
        });
        let record = parse_record(&row).expect("row maps to a record");
        assert_eq!(record.id.as_deref(), Some("41"));
        assert_eq!(record.employee_number, "6685");
        assert_eq!(record.employee_name, "Juan Gerardo Alcantar");
        assert_eq!(record.hire_date, "2019-04-01");
        assert_eq!(record.certification_date, "2024-01-15");
        assert_eq!(record.operation_id.as_deref(), Some("7"));
        assert_eq!(record.operation_label, "OP001 - Costura Básica");
        assert_eq!(record.line_label, "L001 - Línea 1");
        assert_eq!(record.program_label, "PG001 - Programa Básico");
        assert_eq!(record.area_label, "A001 - Producción");
        assert_eq!(record.trainer, "1234 - Supervisor García");
        assert_eq!(record.claimed_percentage, 100);
        assert_eq!(record.approvals.len(), 3);
        assert_eq!(record.approvals[0].role, "Mantenimiento");
        assert_eq!(record.approvals[0].approved_by.as_deref(), Some("2001"));
        assert_eq!(record.approvals[0].approved_at.as_deref(), Some("2024-01-16"));
        assert_eq!(record.approvals[1].role, "Producción");
        assert_eq!(record.approvals[2].role, "calidad");
        assert_eq!(record.required_roles, vec!["mantenimiento", "produccion", "calidad"]);
        assert_eq!(record.backend_fully_approved, None);
    }

    #[test]
    fn alias_keys_are_accepted() {
        let row = json!({
            "numeroEmpleado": 7218,
            "operacion": "OP002 - Corte",
            "linea": "L002",
            "percentage": "75",
            "firmas": [{ "tipo": "calidad" }],
            "approval_scopes": [{ "name": "calidad" }],
            "is_fully_approved": "false",
            "trainer_name": "Inspector Martínez",
            "trainer_employee_number": "5678",
            "program_id": 3
        });
        let record = parse_record(&row).expect("row maps to a record");
        assert_eq!(record.employee_number, "7218");
        assert_eq!(record.operation_label, "OP002 - Corte");
        assert_eq!(record.line_label, "L002");
        assert_eq!(record.claimed_percentage, 75);
        assert_eq!(record.approvals[0].role, "calidad");
        assert_eq!(record.required_roles, vec!["calidad"]);
        assert_eq!(record.backend_fully_approved, Some(false));
        assert_eq!(record.trainer, "5678 - Inspector Martínez");
        assert_eq!(record.program_label, "PG3");
    }

    #[test]
    fn unparseable_flag_does_not_hide_a_later_alias() {
        let row = json!({
            "employee_number": "6685",
            "operation": "OP1",
            "line": "L1",
            "fully_approved": "maybe",
            "is_fully_approved": 1
        });
        let record = parse_record(&row).expect("row maps to a record");
        assert_eq!(record.backend_fully_approved, Some(true));

        let row = json!({
            "employee_number": "6685",
            "operation": "OP1",
            "line": "L1",
            "fully_approved": null,
            "is_fully_approved": "tal vez"
        });
        let record = parse_record(&row).expect("row maps to a record");
        assert_eq!(record.backend_fully_approved, None);
    }

    #[test]
    fn nested_user_employee_number() {
        let row = json!({
            "user": { "employee_number": "0042" },
            "operation": { "name": "Empaque" },
            "line": { "name": "Final" }
        });
        let record = parse_record(&row).expect("row maps to a record");
        assert_eq!(record.employee_number, "0042");
        assert_eq!(record.operation_label, "OP - Empaque");
        assert_eq!(record.line_label, "L - Final");
        assert_eq!(record.claimed_percentage, 0);
        assert!(record.approvals.is_empty());
    }

    #[test]
    fn incomplete_rows_are_rejected() {
        assert_eq!(parse_record(&json!("6685")), Err(RejectionReason::NotAnObject));
        assert_eq!(
            parse_record(&json!({ "operation": "OP1", "line": "L1" })),
            Err(RejectionReason::MissingEmployeeNumber)
        );
        assert_eq!(
            parse_record(&json!({ "employee_number": "6685", "line": "L1" })),
            Err(RejectionReason::MissingOperation)
        );
        assert_eq!(
            parse_record(&json!({ "employee_number": "6685", "operation": "OP1", "line": "" })),
            Err(RejectionReason::MissingLine)
        );
    }

    #[test]
    fn non_array_approvals_are_empty() {
        let row = json!({
            "employee_number": "6685",
            "operation": "OP1",
            "line": "L1",
            "approvals": { "role": "calidad" },
            "required_roles": "calidad"
        });
        let record = parse_record(&row).expect("row maps to a record");
        assert!(record.approvals.is_empty());
        assert!(record.required_roles.is_empty());
    }

    #[test]
    fn export_collects_rejections_with_index() {
        let payload = json!({ "data": [
            { "employee_number": "6685", "operation": "OP1", "line": "L1", "porcentaje": 50 },
            { "operation": "OP1", "line": "L1" },
            42
        ]});
        let export = parse_export(&payload).with_source("dump.json");
        assert_eq!(export.records.len(), 1);
        assert_eq!(export.row_count(), 3);
        assert_eq!(export.rejected[0].index, 1);
        assert_eq!(export.rejected[1].reason, RejectionReason::NotAnObject);
        assert_eq!(
            export.rejected[0].to_string(),
            "dump.json row 1: missing employee number"
        );
    }

    #[test]
    fn scalar_roots_are_errors() {
        assert!(matches!(
            parse_export_str("42"),
            Err(AdapterError::NotAContainer("number"))
        ));
        assert!(matches!(
            parse_export_str("{ nope"),
            Err(AdapterError::InvalidJson(_))
        ));
        let empty = parse_export_str("{\"message\": \"ok\"}");
        assert!(matches!(empty, Ok(ref e) if e.row_count() == 0));
    }
}
