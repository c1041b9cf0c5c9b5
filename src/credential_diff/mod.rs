//! Compare mode: reconcile two credential sets by identity key.
//!
//! Every identity key present in either set produces exactly one [`DiffItem`]:
//! - both sides, equal passwords → `SAME`
//! - both sides, different passwords → `MODIFIED`
//! - only in A → `ONLY_A`, only in B → `ONLY_B`
//!
//! Items are grouped by domain; groups and items are sorted with
//! [`locale_cmp`]. The engine is a pure function of its two inputs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::diff_stats::{diff_stats, DiffStats};
use crate::domain_normalizer::has_risk;
use crate::error::PassDiffResult;
use crate::identity_key::{build_key, locale_cmp, IdentityKey};
use crate::row_flattener::{default_expanded_domains, flatten_groups, VirtualRow};
use crate::settings::AppSettings;
use crate::types::CredentialEntry;

/// Comparison outcome for one identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffStatus {
    Same,
    Modified,
    OnlyA,
    OnlyB,
}

/// One row of the comparison result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffItem {
    pub key: IdentityKey,
    pub domain: String,
    pub username: String,
    pub status: DiffStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_a: Option<CredentialEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_b: Option<CredentialEntry>,
}

impl DiffItem {
    /// Whether either contributing entry's URL normalizes with a risk signal.
    pub fn has_risk(&self) -> bool {
        self.entry_a
            .iter()
            .chain(self.entry_b.iter())
            .any(|entry| has_risk(&entry.url))
    }
}

/// All items sharing one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffGroup {
    pub domain: String,
    pub has_risk: bool,
    pub items: Vec<DiffItem>,
}

/// Index entries by identity key. The last entry wins on duplicate keys.
fn index_by_key(entries: &[CredentialEntry]) -> HashMap<IdentityKey, &CredentialEntry> {
    entries
        .iter()
        .map(|entry| (build_key(&entry.domain, &entry.username), entry))
        .collect()
}

/// First non-empty value, preferring side A.
fn prefer_a<'a>(a: Option<&'a str>, b: Option<&'a str>) -> &'a str {
    a.filter(|s| !s.is_empty())
        .or_else(|| b.filter(|s| !s.is_empty()))
        .unwrap_or("")
}

/// Diff two credential sets into domain groups.
///
/// # Arguments
/// * `entries_a` - Baseline set
/// * `entries_b` - Set compared against the baseline
///
/// # Returns
/// Groups sorted by domain, items in each group sorted by username
pub fn diff_passwords(entries_a: &[CredentialEntry], entries_b: &[CredentialEntry]) -> Vec<DiffGroup> {
    let map_a = index_by_key(entries_a);
    let map_b = index_by_key(entries_b);

    let all_keys: BTreeSet<&IdentityKey> = map_a.keys().chain(map_b.keys()).collect();

    let mut group_map: BTreeMap<String, Vec<DiffItem>> = BTreeMap::new();

    for key in all_keys {
        let entry_a = map_a.get(key).copied();
        let entry_b = map_b.get(key).copied();

        let status = match (entry_a, entry_b) {
            (Some(a), Some(b)) if a.password == b.password => DiffStatus::Same,
            (Some(_), Some(_)) => DiffStatus::Modified,
            (Some(_), None) => DiffStatus::OnlyA,
            (None, _) => DiffStatus::OnlyB,
        };

        let domain = prefer_a(
            entry_a.map(|e| e.domain.as_str()),
            entry_b.map(|e| e.domain.as_str()),
        );
        let username = prefer_a(
            entry_a.map(|e| e.username.as_str()),
            entry_b.map(|e| e.username.as_str()),
        );

        let item = DiffItem {
            key: key.clone(),
            domain: domain.to_string(),
            username: username.to_string(),
            status,
            entry_a: entry_a.cloned(),
            entry_b: entry_b.cloned(),
        };

        group_map.entry(item.domain.clone()).or_default().push(item);
    }

    let mut groups: Vec<DiffGroup> = group_map
        .into_iter()
        .map(|(domain, mut items)| {
            let has_risk = items.iter().any(DiffItem::has_risk);
            items.sort_by(|a, b| locale_cmp(&a.username, &b.username));
            DiffGroup {
                domain,
                has_risk,
                items,
            }
        })
        .collect();

    groups.sort_by(|a, b| locale_cmp(&a.domain, &b.domain));

    tracing::debug!(
        entries_a = entries_a.len(),
        entries_b = entries_b.len(),
        groups = groups.len(),
        "diff complete"
    );

    groups
}

/// Combine both sets into one export list, B replacing A on an equal
/// `(domain, username)` pair.
///
/// The pair is compared exactly, so usernames differing only by case are
/// both kept. Each pair keeps the position where it was first seen (A first,
/// then B).
pub fn combine_prefer_b(
    entries_a: &[CredentialEntry],
    entries_b: &[CredentialEntry],
) -> Vec<CredentialEntry> {
    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();
    let mut combined: Vec<CredentialEntry> = Vec::new();

    for entry in entries_a.iter().chain(entries_b.iter()) {
        let key = (entry.domain.as_str(), entry.username.as_str());
        match positions.get(&key) {
            Some(&pos) => combined[pos] = entry.clone(),
            None => {
                positions.insert(key, combined.len());
                combined.push(entry.clone());
            }
        }
    }

    combined
}

/// Input for the compare view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareInput {
    pub entries_a: Vec<CredentialEntry>,
    pub entries_b: Vec<CredentialEntry>,
    #[serde(default)]
    pub settings: AppSettings,
    /// Expanded group domains; every group with a difference when absent
    #[serde(default)]
    pub expanded_domains: Option<Vec<String>>,
}

/// Everything the compare view renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareOutput {
    pub groups: Vec<DiffGroup>,
    pub rows: Vec<VirtualRow>,
    pub stats: DiffStats,
}

/// Run diff, flatten and stats in one call.
pub fn compare(input: CompareInput) -> CompareOutput {
    let groups = diff_passwords(&input.entries_a, &input.entries_b);

    let expanded = match input.expanded_domains {
        Some(domains) => domains.into_iter().collect(),
        None => default_expanded_domains(&groups),
    };

    let rows = flatten_groups(&groups, &expanded, input.settings.show_same_entries);
    let stats = diff_stats(&groups);

    CompareOutput {
        groups,
        rows,
        stats,
    }
}

/// Input for exporting the combined compare-view set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineExportInput {
    pub entries_a: Vec<CredentialEntry>,
    pub entries_b: Vec<CredentialEntry>,
}

/// The combined set, ready for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineExportOutput {
    pub entries: Vec<CredentialEntry>,
}

/// Combine both sets from JSON input, B preferred (convenience function for FFI).
pub fn combine_export_json(input_json: &str) -> PassDiffResult<String> {
    let input: CombineExportInput = serde_json::from_str(input_json)?;
    let entries = combine_prefer_b(&input.entries_a, &input.entries_b);
    Ok(serde_json::to_string(&CombineExportOutput { entries })?)
}

/// Compare from JSON input (convenience function for FFI).
pub fn compare_json(input_json: &str) -> PassDiffResult<String> {
    let input: CompareInput = serde_json::from_str(input_json)?;
    let output = compare(input);
    Ok(serde_json::to_string(&output)?)
}
