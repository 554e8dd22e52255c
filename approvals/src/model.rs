//! Certification record types.
//!
//! These types are the strongly-typed side of the payload adapter: the
//! backend produces loosely-shaped JSON, [`crate::adapter`] maps it into a
//! [`CertificationRecord`], and everything downstream reads the record
//! without ever mutating it.

use serde::{Deserialize, Serialize};

/// The claimed level that is gated behind multi-role approval.
pub const FULL_CERTIFICATION: u32 = 100;

/// Certification levels a trainer may assert.
pub const CERTIFICATION_LEVELS: [u32; 4] = [25, 50, 75, FULL_CERTIFICATION];

/// Roles that must sign a full certification when the backend does not say
/// otherwise: maintenance, production and quality, as normalised tokens.
pub const DEFAULT_REQUIRED_ROLES: [&str; 3] = ["mantenimiento", "produccion", "calidad"];

/// A single sign-off recorded against a certification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalEntry {
    /// Role label as sent by the backend (not normalised).
    pub role: String,
    /// Display name or employee number of the approver.
    pub approved_by: Option<String>,
    /// Approval timestamp as sent by the backend (ISO-8601 in practice).
    pub approved_at: Option<String>,
}

impl ApprovalEntry {
    /// Creates an entry carrying only a role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            approved_by: None,
            approved_at: None,
        }
    }

    /// Sets the approver.
    #[must_use]
    pub fn approved_by(mut self, approver: impl Into<String>) -> Self {
        self.approved_by = Some(approver.into());
        self
    }

    /// Sets the approval timestamp.
    #[must_use]
    pub fn approved_at(mut self, at: impl Into<String>) -> Self {
        self.approved_at = Some(at.into());
        self
    }
}

/// One trainer-asserted certification of one employee on one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationRecord {
    /// Backend identifier, when present.
    pub id: Option<String>,
    /// Employee number (fixed-width numeric string, e.g. `"6685"`).
    pub employee_number: String,
    /// Employee display name.
    pub employee_name: String,
    /// Hire date as sent by the backend.
    pub hire_date: String,
    /// Certification date as sent by the backend.
    pub certification_date: String,
    /// Backend operation identifier, when present.
    pub operation_id: Option<String>,
    /// Composed operation label (`"OP001 - Costura"`).
    pub operation_label: String,
    /// Composed production line label.
    pub line_label: String,
    /// Composed program label.
    pub program_label: String,
    /// Composed area label.
    pub area_label: String,
    /// Composed trainer label (`"1234 - Supervisor"`).
    pub trainer: String,
    /// Level asserted by the trainer. Expected to be one of
    /// [`CERTIFICATION_LEVELS`]; the adapter maps unparseable values to 0.
    pub claimed_percentage: u32,
    /// Sign-offs in the order the backend listed them.
    pub approvals: Vec<ApprovalEntry>,
    /// Roles that must all sign; empty means "use the policy default".
    pub required_roles: Vec<String>,
    /// Explicit `fully_approved` flag, when the backend opts in.
    pub backend_fully_approved: Option<bool>,
}

impl CertificationRecord {
    /// Creates a record with the identifying fields and claimed level set.
    pub fn new(
        employee_number: impl Into<String>,
        operation_label: impl Into<String>,
        claimed_percentage: u32,
    ) -> Self {
        Self {
            employee_number: employee_number.into(),
            operation_label: operation_label.into(),
            claimed_percentage,
            ..Self::default()
        }
    }

    /// Appends an approval carrying only a role.
    #[must_use]
    pub fn with_approval(mut self, role: impl Into<String>) -> Self {
        self.approvals.push(ApprovalEntry::new(role));
        self
    }

    /// Appends a full approval entry.
    #[must_use]
    pub fn with_entry(mut self, entry: ApprovalEntry) -> Self {
        self.approvals.push(entry);
        self
    }

    /// Replaces the required role list.
    #[must_use]
    pub fn with_required_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the production line label.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line_label = line.into();
        self
    }

    /// Sets the explicit backend approval flag.
    #[must_use]
    pub fn with_backend_flag(mut self, flag: bool) -> Self {
        self.backend_fully_approved = Some(flag);
        self
    }

    /// Returns true if the claimed percentage is one of the four trainer levels.
    #[must_use]
    pub fn has_known_level(&self) -> bool {
        CERTIFICATION_LEVELS.contains(&self.claimed_percentage)
    }

    /// Returns the most recent approval for display.
    ///
    /// Only ISO-8601 timestamps (`YYYY-MM-DD...`) are compared; any other
    /// format counts as untimed. Timed entries win over untimed ones, the
    /// greatest timestamp wins among timed entries, and ties and untimed lists
    /// resolve to the last entry.
    #[must_use]
    pub fn latest_approval(&self) -> Option<&ApprovalEntry> {
        self.approvals
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| {
                iso_timestamp(a)
                    .cmp(&iso_timestamp(b))
                    .then(ia.cmp(ib))
            })
            .map(|(_, entry)| entry)
    }
}

fn iso_timestamp(entry: &ApprovalEntry) -> Option<&str> {
    entry.approved_at.as_deref().filter(|at| is_iso_date_prefix(at))
}

/// True if `text` starts with `YYYY-MM-DD`.
fn is_iso_date_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}
