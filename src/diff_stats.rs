//! Summary counts over a comparison result.

use serde::{Deserialize, Serialize};

use crate::credential_diff::{DiffGroup, DiffStatus};

/// Item counts by status, plus the number of risky groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct DiffStats {
    pub total: u32,
    pub same: u32,
    pub modified: u32,
    pub only_a: u32,
    pub only_b: u32,
    /// Groups (not items) flagged as risky
    pub risk_count: u32,
}

/// Reduce diff groups to summary counts in a single pass.
pub fn diff_stats(groups: &[DiffGroup]) -> DiffStats {
    let mut stats = DiffStats::default();

    for group in groups {
        if group.has_risk {
            stats.risk_count += 1;
        }

        for item in &group.items {
            stats.total += 1;
            match item.status {
                DiffStatus::Same => stats.same += 1,
                DiffStatus::Modified => stats.modified += 1,
                DiffStatus::OnlyA => stats.only_a += 1,
                DiffStatus::OnlyB => stats.only_b += 1,
            }
        }
    }

    stats
}
