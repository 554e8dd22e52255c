//! SkillCert approval aggregation.
//!
//! The `skillcert-approvals` crate turns raw certification records exported by
//! the training backend into a display view-model. It owns the single
//! implementation of the display-gating rule: a 100% claim is shown as 100
//! only when every required role (maintenance, production, quality) has
//! signed it off; otherwise it is shown as 0. Claims of 25/50/75 pass through
//! untouched.
//!
//! # Entry Point
//!
//! ```
//! use skillcert_approvals::{display_percentage, is_fully_approved, CertificationRecord};
//!
//! let record = CertificationRecord::new("6685", "OP001 - Costura", 100)
//!     .with_approval("Mantenimiento")
//!     .with_approval("Calidad");
//! assert!(!is_fully_approved(&record));
//! assert_eq!(display_percentage(100, &record), 0);
//!
//! let record = record.with_approval("Producción");
//! assert!(is_fully_approved(&record));
//! assert_eq!(display_percentage(100, &record), 100);
//! ```
//!
//! # Payload adapter
//!
//! ```
//! let payload = serde_json::json!({
//!     "data": [{
//!         "employee_number": "7218",
//!         "operation": { "number_operation": "OP002", "name": "Corte" },
//!         "line": { "code": "L001", "name": "Linea 1" },
//!         "porcentaje": "75",
//!         "firmas": [{ "rol": "Calidad" }]
//!     }]
//! });
//! let export = skillcert_approvals::adapter::parse_export(&payload);
//! assert_eq!(export.records.len(), 1);
//! assert_eq!(export.records[0].operation_label, "OP002 - Corte");
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod adapter;
pub mod aggregate;
pub mod badge;
pub mod model;
pub mod role;

pub use aggregate::{
    display_percentage, is_fully_approved, ApprovalPolicy, ApprovalSource, ApprovalView,
};
pub use badge::Badge;
pub use model::{ApprovalEntry, CertificationRecord, DEFAULT_REQUIRED_ROLES, FULL_CERTIFICATION};
pub use role::normalize_role;
