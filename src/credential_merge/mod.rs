//! Merge mode: collapse redundant entries inside a single export.
//!
//! A merge candidate is a set of entries with the same `(domain, username,
//! password)` triple but at least two distinct URLs. Applying a merge keeps
//! the first entry of each selected group (with its URL rewritten to the
//! resolved target) and drops the rest, so the output length is always
//!
//! ```text
//! input - Σ (members - 1)   over every selected group
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain_normalizer::has_risk;
use crate::error::PassDiffResult;
use crate::identity_key::locale_cmp;
use crate::settings::MergeStrategy;
use crate::types::CredentialEntry;

/// Exact `(domain, username, password)` triple identifying a merge group.
///
/// Compared byte for byte; unlike identity keys nothing is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeGroupKey {
    pub domain: String,
    pub username: String,
    pub password: String,
}

impl MergeGroupKey {
    pub fn of(entry: &CredentialEntry) -> Self {
        Self {
            domain: entry.domain.clone(),
            username: entry.username.clone(),
            password: entry.password.clone(),
        }
    }
}

/// Entries sharing one triple but pointing at two or more distinct URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeGroup {
    pub domain: String,
    pub username: String,
    pub password: String,
    /// Members in order of first encounter
    pub entries: Vec<CredentialEntry>,
    pub has_risk: bool,
}

impl MergeGroup {
    pub fn key(&self) -> MergeGroupKey {
        MergeGroupKey {
            domain: self.domain.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Distinct member URLs in encounter order.
    pub fn distinct_urls(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.entries
            .iter()
            .map(|entry| entry.url.as_str())
            .filter(|url| seen.insert(*url))
            .collect()
    }
}

/// Summary of a candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct MergeStats {
    pub total_groups: u32,
    /// Entries across all groups
    pub total_entries: u32,
    /// Entries removed if every group were merged
    pub can_merge: u32,
    pub risk_count: u32,
}

/// Group entries by triple, preserving first-encounter order of groups and members.
fn group_by_triple(entries: &[CredentialEntry]) -> Vec<(MergeGroupKey, Vec<&CredentialEntry>)> {
    let mut positions: HashMap<MergeGroupKey, usize> = HashMap::new();
    let mut grouped: Vec<(MergeGroupKey, Vec<&CredentialEntry>)> = Vec::new();

    for entry in entries {
        let key = MergeGroupKey::of(entry);
        match positions.get(&key) {
            Some(&pos) => grouped[pos].1.push(entry),
            None => {
                positions.insert(key.clone(), grouped.len());
                grouped.push((key, vec![entry]));
            }
        }
    }

    grouped
}

/// Find every merge candidate group in one credential set.
///
/// Groups with a single distinct URL are never returned.
///
/// # Returns
/// Candidate groups sorted by domain
pub fn find_merge_candidates(entries: &[CredentialEntry]) -> Vec<MergeGroup> {
    let mut groups: Vec<MergeGroup> = group_by_triple(entries)
        .into_iter()
        .filter(|(_, members)| {
            let urls: HashSet<&str> = members.iter().map(|e| e.url.as_str()).collect();
            urls.len() > 1
        })
        .map(|(key, members)| MergeGroup {
            has_risk: members.iter().any(|e| has_risk(&e.url)),
            entries: members.into_iter().cloned().collect(),
            domain: key.domain,
            username: key.username,
            password: key.password,
        })
        .collect();

    // Stable, so equal domains keep encounter order
    groups.sort_by(|a, b| locale_cmp(&a.domain, &b.domain));

    tracing::debug!(
        entries = entries.len(),
        groups = groups.len(),
        "merge candidates found"
    );

    groups
}

/// Resolve the URL a merged group collapses to.
///
/// `manual_choice` is only consulted by [`MergeStrategy::Manual`].
pub fn resolve_target_url(
    group: &MergeGroup,
    strategy: MergeStrategy,
    manual_choice: Option<&str>,
) -> String {
    let first_url = || {
        group
            .entries
            .first()
            .map(|entry| entry.url.clone())
            .unwrap_or_else(|| root_domain_url(&group.domain))
    };

    match strategy {
        MergeStrategy::RootDomain => root_domain_url(&group.domain),
        MergeStrategy::KeepFirst => first_url(),
        MergeStrategy::Manual => match manual_choice {
            Some(choice) => choice.to_string(),
            None => first_url(),
        },
    }
}

fn root_domain_url(domain: &str) -> String {
    format!("https://{}/", domain)
}

/// Collapse the selected merge groups and return the export list.
///
/// # Arguments
/// * `entries` - The full credential set, in original order
/// * `selected` - Keys of the groups to merge; keys that are not candidates are ignored
/// * `strategy` - Target URL strategy
/// * `manual_choices` - Per-group URLs for [`MergeStrategy::Manual`]
///
/// # Returns
/// The original list with each selected group reduced to its first member
pub fn apply_merge(
    entries: &[CredentialEntry],
    selected: &HashSet<MergeGroupKey>,
    strategy: MergeStrategy,
    manual_choices: &HashMap<MergeGroupKey, String>,
) -> Vec<CredentialEntry> {
    // Target URL per selected candidate group, and whether its representative was emitted
    let mut targets: HashMap<MergeGroupKey, (String, bool)> = find_merge_candidates(entries)
        .into_iter()
        .filter(|group| selected.contains(&group.key()))
        .map(|group| {
            let key = group.key();
            let url = resolve_target_url(
                &group,
                strategy,
                manual_choices.get(&key).map(String::as_str),
            );
            (key, (url, false))
        })
        .collect();
    let merged_groups = targets.len();

    let mut output: Vec<CredentialEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match targets.get_mut(&MergeGroupKey::of(entry)) {
            Some((_, true)) => {}
            Some((url, emitted)) => {
                *emitted = true;
                output.push(entry.with_url(url.as_str()));
            }
            None => output.push(entry.clone()),
        }
    }

    tracing::debug!(
        input = entries.len(),
        output = output.len(),
        merged_groups,
        "merge applied"
    );

    output
}

/// Summarize a candidate list.
pub fn merge_stats(groups: &[MergeGroup]) -> MergeStats {
    let total_entries: usize = groups.iter().map(|g| g.entries.len()).sum();

    MergeStats {
        total_groups: groups.len() as u32,
        total_entries: total_entries as u32,
        can_merge: (total_entries - groups.len()) as u32,
        risk_count: groups.iter().filter(|g| g.has_risk).count() as u32,
    }
}

/// Input for listing merge candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeCandidatesInput {
    pub entries: Vec<CredentialEntry>,
}

/// Candidate groups with their summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeCandidatesOutput {
    pub groups: Vec<MergeGroup>,
    pub stats: MergeStats,
}

/// A user-picked target URL for one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualChoice {
    pub key: MergeGroupKey,
    pub url: String,
}

/// Input for applying a merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyMergeInput {
    pub entries: Vec<CredentialEntry>,
    #[serde(default)]
    pub selected: Vec<MergeGroupKey>,
    #[serde(default)]
    pub strategy: MergeStrategy,
    #[serde(default)]
    pub manual_choices: Vec<ManualChoice>,
}

/// Result of applying a merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyMergeOutput {
    pub entries: Vec<CredentialEntry>,
    /// Entries dropped by the merge
    pub removed: u32,
}

/// List merge candidates from JSON input (convenience function for FFI).
pub fn find_merge_candidates_json(input_json: &str) -> PassDiffResult<String> {
    let input: MergeCandidatesInput = serde_json::from_str(input_json)?;
    let groups = find_merge_candidates(&input.entries);
    let stats = merge_stats(&groups);
    Ok(serde_json::to_string(&MergeCandidatesOutput { groups, stats })?)
}

/// Apply a merge from JSON input (convenience function for FFI).
pub fn apply_merge_json(input_json: &str) -> PassDiffResult<String> {
    let input: ApplyMergeInput = serde_json::from_str(input_json)?;

    let selected: HashSet<MergeGroupKey> = input.selected.into_iter().collect();
    let manual_choices: HashMap<MergeGroupKey, String> = input
        .manual_choices
        .into_iter()
        .map(|choice| (choice.key, choice.url))
        .collect();

    let entries = apply_merge(&input.entries, &selected, input.strategy, &manual_choices);
    let removed = (input.entries.len() - entries.len()) as u32;

    Ok(serde_json::to_string(&ApplyMergeOutput { entries, removed })?)
}

#[cfg(test)]
mod tests;
