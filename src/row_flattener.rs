//! Flatten diff groups into the row list a virtualized list view renders.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::credential_diff::{DiffGroup, DiffItem, DiffStatus};

/// One display row: a group header or a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VirtualRow {
    Header {
        domain: String,
        /// Visible items in the group after filtering
        count: usize,
        has_risk: bool,
        expanded: bool,
    },
    Item {
        item: DiffItem,
    },
}

/// Build the row list for the current expansion state.
///
/// `SAME` items are hidden unless `show_same` is set; a group left with no
/// visible items gets no header at all. Expanded groups are followed by
/// their visible items.
pub fn flatten_groups(
    groups: &[DiffGroup],
    expanded_domains: &HashSet<String>,
    show_same: bool,
) -> Vec<VirtualRow> {
    let mut rows = Vec::new();

    for group in groups {
        let visible: Vec<&DiffItem> = group
            .items
            .iter()
            .filter(|item| show_same || item.status != DiffStatus::Same)
            .collect();

        if visible.is_empty() {
            continue;
        }

        let expanded = expanded_domains.contains(&group.domain);

        rows.push(VirtualRow::Header {
            domain: group.domain.clone(),
            count: visible.len(),
            has_risk: group.has_risk,
            expanded,
        });

        if expanded {
            rows.extend(visible.into_iter().map(|item| VirtualRow::Item { item: item.clone() }));
        }
    }

    rows
}

/// Domains expanded when a comparison is first shown: every group with a difference.
pub fn default_expanded_domains(groups: &[DiffGroup]) -> HashSet<String> {
    groups
        .iter()
        .filter(|group| group.items.iter().any(|item| item.status != DiffStatus::Same))
        .map(|group| group.domain.clone())
        .collect()
}

/// Every group domain ("expand all").
pub fn all_domains(groups: &[DiffGroup]) -> HashSet<String> {
    groups.iter().map(|group| group.domain.clone()).collect()
}

/// Flip one domain in an expansion set.
pub fn toggle_domain(expanded_domains: &mut HashSet<String>, domain: &str) {
    if !expanded_domains.remove(domain) {
        expanded_domains.insert(domain.to_string());
    }
}
