//! Certification statistics over a set of records.

use serde::{Deserialize, Serialize};
use skillcert_approvals::{ApprovalPolicy, CertificationRecord};

use crate::matrix::LineFilter;

/// Counts per level and the rounded average of display percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationStats {
    /// Records counted.
    pub total: usize,
    /// Records displayed at 25%.
    pub at_25: usize,
    /// Records displayed at 50%.
    pub at_50: usize,
    /// Records displayed at 75%.
    pub at_75: usize,
    /// Records displayed at 100%.
    pub at_100: usize,
    /// Mean display percentage, rounded half up; 0 for an empty set.
    pub average: u32,
}

impl CertificationStats {
    /// Collects statistics in a single pass over the records passing `filter`.
    #[must_use]
    pub fn collect(
        records: &[CertificationRecord],
        filter: &LineFilter,
        policy: &ApprovalPolicy,
    ) -> Self {
        let mut stats = Self::default();
        let mut sum: u64 = 0;
        for record in records.iter().filter(|r| filter.matches(r)) {
            let shown = policy.display_percentage(record.claimed_percentage, record);
            stats.total += 1;
            sum += u64::from(shown);
            match shown {
                25 => stats.at_25 += 1,
                50 => stats.at_50 += 1,
                75 => stats.at_75 += 1,
                100 => stats.at_100 += 1,
                _ => {}
            }
        }
        if stats.total > 0 {
            let total = stats.total as u64;
            let rounded = (2 * sum + total) / (2 * total);
            stats.average = u32::try_from(rounded).unwrap_or(u32::MAX);
        }
        stats
    }
}
