//! Maps a small backend payload and prints each record's gated view.
//!
//! Run with: `cargo run --example evaluate_payload -p skillcert-approvals`

use skillcert_approvals::{adapter, ApprovalPolicy, Badge};

fn main() {
    let payload = serde_json::json!({
        "certifiers": [
            {
                "employee_number": "6685",
                "operation": { "number_operation": "OP001", "name": "Costura Basica" },
                "line": { "number_line": "L001", "name": "Linea 1" },
                "porcentaje": 100,
                "aprobaciones": [{ "rol": "Mantenimiento" }, { "rol": "Calidad" }]
            },
            {
                "employee_number": "6685",
                "operation": { "number_operation": "OP002", "name": "Costura Intermedia" },
                "line": { "number_line": "L001", "name": "Linea 1" },
                "porcentaje": 75
            }
        ]
    });

    let export = adapter::parse_export(&payload);
    let policy = ApprovalPolicy::standard();
    for record in &export.records {
        let view = policy.evaluate(record);
        println!(
            "{:6} {:28} claimed {:>3}  shown {:>3}  [{}]  missing: {}",
            record.employee_number,
            record.operation_label,
            view.claimed_percentage,
            view.display_percentage,
            Badge::for_percentage(view.display_percentage).css_class(),
            view.missing_roles.join(", "),
        );
    }
}
