//! SkillCert training matrix.
//!
//! Builds the employee × operation grid shown on the plant floor from
//! certification records, with every cell already passed through the
//! display-gating rule of [`skillcert_approvals`]. Also computes the summary
//! statistics shown next to an employee's certification history.
//!
//! # Entry Points
//!
//! ```
//! use skillcert_approvals::{ApprovalPolicy, CertificationRecord};
//! use skillcert_matrix::{LineFilter, TrainingMatrix};
//!
//! let records = vec![
//!     CertificationRecord::new("6685", "OP001 - Costura", 75).with_line("L001"),
//!     CertificationRecord::new("7218", "OP002 - Corte", 100).with_line("L001"),
//! ];
//! let matrix = TrainingMatrix::build(&records, &LineFilter::All, ApprovalPolicy::standard());
//! assert_eq!(matrix.operations, vec!["OP001 - Costura", "OP002 - Corte"]);
//! // Unapproved 100% claims are shown as 0.
//! assert_eq!(matrix.cell("7218", "OP002 - Corte"), Some(0));
//! assert_eq!(matrix.cell("7218", "OP001 - Costura"), Some(0));
//! ```
//!
//! # Output
//!
//! ```text
//! renderer::render_text   ← fixed-width table for terminals
//! renderer::render_html   ← standalone page using the cert-* badge classes
//! serde_json              ← TrainingMatrix / CertificationStats are Serialize
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod matrix;
pub mod renderer;
pub mod stats;
pub mod writer;

pub use matrix::{split_operation_label, EmployeeInfo, LineFilter, MatrixRow, TrainingMatrix};
pub use stats::CertificationStats;
