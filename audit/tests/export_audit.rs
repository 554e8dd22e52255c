//! Full audit runs over backend-shaped payloads.

use serde_json::json;
use skillcert_approvals::adapter::parse_export;
use skillcert_approvals::ApprovalPolicy;
use skillcert_audit::{run_all, AuditSettings, Severity};

fn payload() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": 11,
                "employee_number": "6685",
                "user": { "name": "Juan Alcantar" },
                "operation": { "number_operation": "OP001", "name": "Costura" },
                "line": { "number_line": "L001", "name": "Linea 1" },
                "porcentaje": 100,
                "aprobaciones": [
                    { "role": "Mantenimiento", "approved_by": "1001" },
                    { "role": "PRODUCCIÓN", "approved_by": "1002" },
                    { "role": "calidad", "approved_by": "1003" }
                ]
            },
            {
                "id": 12,
                "employee_number": "7218",
                "operation": "OP002 - Corte",
                "line": "L001 - Linea 1",
                "porcentaje": 100,
                "aprobaciones": ["produccion"]
            },
            {
                "id": 13,
                "employee_number": "72180",
                "operation": "OP003",
                "line": "L002",
                "porcentaje": 60
            },
            {
                "id": 14,
                "employee_number": "6685",
                "line": "L001"
            }
        ]
    })
}

#[test]
fn mixed_export_reports_each_problem_once() {
    let export = parse_export(&payload());
    assert_eq!(export.records.len(), 3);
    assert_eq!(export.rejected.len(), 1);

    let report = run_all(&export, &AuditSettings::default());
    assert_eq!(report.results.len(), 6);
    assert!(!report.all_passed());

    let shape = report.find("records/shape").map(|r| r.severity);
    assert_eq!(shape, Some(Severity::Warning));

    let numbers = report.find("records/employee-number");
    assert_eq!(numbers.map(|r| r.severity), Some(Severity::Failure));
    assert_eq!(numbers.map(|r| r.details.len()), Some(1));

    let levels = report.find("records/percentage");
    assert_eq!(levels.map(|r| r.severity), Some(Severity::Failure));

    let gating = report.find("approvals/gating");
    assert_eq!(gating.map(|r| r.severity), Some(Severity::Warning));
    assert_eq!(
        gating.map(|r| r.details.clone()),
        Some(vec![
            "7218 / OP002 - Corte (L001 - Linea 1) [id 12] missing calidad, mantenimiento"
                .to_owned()
        ])
    );

    assert_eq!(
        report.find("approvals/backend-flag").map(|r| r.severity),
        Some(Severity::Pass)
    );
    assert_eq!(
        report.find("approvals/unknown-roles").map(|r| r.severity),
        Some(Severity::Pass)
    );
}

#[test]
fn configured_pattern_and_roles_change_outcome() {
    let export = parse_export(&payload());
    let settings = AuditSettings::new(ApprovalPolicy::new(["Producción"]), r"^\d{4,5}$");
    let Ok(settings) = settings else {
        panic!("pattern should compile");
    };
    let report = run_all(&export, &settings);

    assert_eq!(
        report.find("records/employee-number").map(|r| r.severity),
        Some(Severity::Pass)
    );
    assert_eq!(
        report.find("approvals/gating").map(|r| r.severity),
        Some(Severity::Pass)
    );
    // Signatures beyond the single required role are now stray.
    assert_eq!(
        report.find("approvals/unknown-roles").map(|r| r.details.len()),
        Some(1)
    );
}

#[test]
fn report_serializes_for_json_output() {
    let export = parse_export(&json!([]));
    let report = run_all(&export, &AuditSettings::default());
    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["results"][0]["check"], "records/shape");
    assert_eq!(value["results"][0]["severity"], "pass");
}
