//! Alias keys accepted in backend payloads.
//!
//! Keys are tried in order; the first present value wins. Dotted entries
//! address nested objects (`user.name`).

/// Approval list.
pub const APPROVALS: &[&str] = &["aprobaciones", "approvals", "firmas", "signatures"];
/// Role inside an approval entry.
pub const APPROVAL_ROLE: &[&str] = &[
    "role",
    "rol",
    "scope",
    "tipo",
    "approver_role",
    "approval_scope",
];
/// Approver inside an approval entry.
pub const APPROVED_BY: &[&str] = &[
    "approved_by",
    "aprobado_por",
    "approver_number",
    "approver",
    "user.name",
];
/// Approval timestamp inside an approval entry.
pub const APPROVED_AT: &[&str] = &["approved_at", "aprobado_en", "fecha", "created_at"];
/// Required role list.
pub const REQUIRED_ROLES: &[&str] = &["required_roles", "approval_scopes", "roles_requeridos"];
/// Claimed percentage.
pub const PERCENTAGE: &[&str] = &["porcentaje", "percentage", "porcentajeCertificacion", "percent"];
/// Explicit backend approval flag.
pub const FULLY_APPROVED: &[&str] = &["fully_approved", "is_fully_approved"];
/// Employee number.
pub const EMPLOYEE_NUMBER: &[&str] = &[
    "employee_number",
    "numeroEmpleado",
    "number_employee",
    "user.employee_number",
];
/// Employee display name.
pub const EMPLOYEE_NAME: &[&str] = &[
    "user.name",
    "user.nombre",
    "nombre",
    "employee_name",
    "user_name",
];
/// Employee hire date.
pub const HIRE_DATE: &[&str] = &["user.fecha_ingreso", "user.hire_date", "fecha_ingreso"];
/// Certification date.
pub const CERTIFICATION_DATE: &[&str] = &[
    "fecha_certificacion",
    "certification_date",
    "fechaCertificacion",
];
/// Record identifier.
pub const RECORD_ID: &[&str] = &["id", "cert_id", "certifier_id", "certificacion_id"];

/// Operation object or label.
pub const OPERATION: &[&str] = &["operation", "operacion"];
/// Operation identifier.
pub const OPERATION_ID: &[&str] = &["operation_id", "operation.id", "operacion.id"];
/// Line object or label.
pub const LINE: &[&str] = &["line", "linea", "operation.line", "operacion.linea"];
/// Program object or label.
pub const PROGRAM: &[&str] = &[
    "program",
    "programa",
    "operation.program",
    "operacion.programa",
];
/// Area object or label.
pub const AREA: &[&str] = &["area"];
/// Trainer object or label.
pub const TRAINER: &[&str] = &["entrenador", "trainer", "user_trainer"];

/// Code keys for an operation object.
pub const OPERATION_CODE: &[&str] = &["number_operation", "code", "numero", "clave", "number"];
/// Code keys for a line object.
pub const LINE_CODE: &[&str] = &["number_line", "code", "numero", "clave", "number"];
/// Code keys for a program object.
pub const PROGRAM_CODE: &[&str] = &["number_program", "code", "codigo", "number"];
/// Code keys for an area object.
pub const AREA_CODE: &[&str] = &["number_area", "code", "codigo"];
/// Code keys for a trainer object.
pub const TRAINER_CODE: &[&str] = &["employee_number", "numeroEmpleado", "numero"];
/// Name keys shared by all labelled objects.
pub const NAME: &[&str] = &["name", "nombre"];

/// Envelope keys that may wrap a list of certification rows.
pub const RECORD_ENVELOPES: &[&str] = &[
    "certificaciones",
    "certifiers",
    "data",
    "items",
    "rows",
    "result",
    "results",
];
/// Generic containers checked when no envelope key matched.
pub const CONTAINERS: &[&str] = &["data", "result", "payload", "items", "rows", "results"];
