//! Approval aggregation and display gating.
//!
//! # Rule
//!
//! 1. If the backend sent an explicit `fully_approved` flag, that flag is the
//!    answer.
//! 2. Otherwise the normalised roles of all approval entries form the
//!    satisfied set, and the normalised `required_roles` of the record form
//!    the required set (falling back to the policy default when the record
//!    lists none).
//! 3. The record is fully approved iff the required set is non-empty and is a
//!    subset of the satisfied set. Duplicate approvals for one role never
//!    stand in for a different missing role.
//! 4. A claim of 100 that is not fully approved is displayed as 0. Every other
//!    claim is displayed as-is.
//!
//! Every function here is pure and total: malformed input degrades to "not
//! approved", never to a panic.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::model::{CertificationRecord, DEFAULT_REQUIRED_ROLES, FULL_CERTIFICATION};
use crate::role::normalize_roles;

/// Where a fully-approved decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalSource {
    /// The backend's explicit flag was trusted verbatim.
    BackendFlag,
    /// Computed from approval entries against required roles.
    Roles,
}

/// Derived view of one record, consumed by rendering code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalView {
    /// Whether the record counts as fully approved.
    pub fully_approved: bool,
    /// The percentage rendering code should show.
    pub display_percentage: u32,
    /// The percentage the trainer claimed.
    pub claimed_percentage: u32,
    /// How `fully_approved` was decided.
    pub source: ApprovalSource,
    /// Required roles with at least one matching approval.
    pub satisfied_roles: Vec<String>,
    /// Required roles with no matching approval.
    pub missing_roles: Vec<String>,
}

/// Approval gating parameterised by the fallback required-role set.
///
/// The default policy uses [`DEFAULT_REQUIRED_ROLES`]. A policy is read-only
/// and can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalPolicy {
    default_required_roles: BTreeSet<String>,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_ROLES)
    }
}

impl ApprovalPolicy {
    /// Creates a policy whose fallback role set is `roles` (normalised).
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            default_required_roles: normalize_roles(roles),
        }
    }

    /// Returns the shared policy built from [`DEFAULT_REQUIRED_ROLES`].
    #[must_use]
    pub fn standard() -> &'static ApprovalPolicy {
        static POLICY: OnceLock<ApprovalPolicy> = OnceLock::new();
        POLICY.get_or_init(ApprovalPolicy::default)
    }

    /// Returns the normalised fallback role set.
    #[must_use]
    pub fn default_required_roles(&self) -> &BTreeSet<String> {
        &self.default_required_roles
    }

    /// Returns the normalised required roles for `record`, applying the
    /// fallback when the record lists none.
    #[must_use]
    pub fn required_roles(&self, record: &CertificationRecord) -> BTreeSet<String> {
        let required = normalize_roles(&record.required_roles);
        if required.is_empty() {
            self.default_required_roles.clone()
        } else {
            required
        }
    }

    /// Returns the required roles that no approval entry satisfies.
    #[must_use]
    pub fn missing_roles(&self, record: &CertificationRecord) -> BTreeSet<String> {
        let satisfied = satisfied_roles(record);
        self.required_roles(record)
            .into_iter()
            .filter(|role| !satisfied.contains(role))
            .collect()
    }

    /// Returns true if the approval entries cover every required role,
    /// ignoring any explicit backend flag.
    #[must_use]
    pub fn roles_satisfied(&self, record: &CertificationRecord) -> bool {
        let required = self.required_roles(record);
        if required.is_empty() {
            return false;
        }
        required.is_subset(&satisfied_roles(record))
    }

    /// Returns true if `record` is fully approved.
    #[must_use]
    pub fn is_fully_approved(&self, record: &CertificationRecord) -> bool {
        match record.backend_fully_approved {
            Some(flag) => flag,
            None => self.roles_satisfied(record),
        }
    }

    /// Returns the percentage to display for a `claimed` level on `record`.
    #[must_use]
    pub fn display_percentage(&self, claimed: u32, record: &CertificationRecord) -> u32 {
        if claimed == FULL_CERTIFICATION && !self.is_fully_approved(record) {
            0
        } else {
            claimed
        }
    }

    /// Computes the full view-model for `record`.
    #[must_use]
    pub fn evaluate(&self, record: &CertificationRecord) -> ApprovalView {
        let satisfied = satisfied_roles(record);
        let (satisfied_roles, missing_roles): (Vec<String>, Vec<String>) = self
            .required_roles(record)
            .into_iter()
            .partition(|role| satisfied.contains(role));
        let fully_approved = self.is_fully_approved(record);
        let source = if record.backend_fully_approved.is_some() {
            ApprovalSource::BackendFlag
        } else {
            ApprovalSource::Roles
        };
        ApprovalView {
            fully_approved,
            display_percentage: self.display_percentage(record.claimed_percentage, record),
            claimed_percentage: record.claimed_percentage,
            source,
            satisfied_roles,
            missing_roles,
        }
    }
}

/// Returns the normalised roles of all approval entries on `record`.
#[must_use]
pub fn satisfied_roles(record: &CertificationRecord) -> BTreeSet<String> {
    normalize_roles(record.approvals.iter().map(|a| a.role.as_str()))
}

/// Returns true if `record` is fully approved under the standard policy.
#[must_use]
pub fn is_fully_approved(record: &CertificationRecord) -> bool {
    ApprovalPolicy::standard().is_fully_approved(record)
}

/// Returns the display percentage for `claimed` under the standard policy.
#[must_use]
pub fn display_percentage(claimed: u32, record: &CertificationRecord) -> u32 {
    ApprovalPolicy::standard().display_percentage(claimed, record)
}
