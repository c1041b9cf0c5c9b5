//! Tests for merge candidate detection and collapse.

use super::*;

/// Helper to create an entry with a normalized domain.
fn entry(url: &str, username: &str, password: &str) -> CredentialEntry {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    CredentialEntry {
        id: format!("test-id-{:016x}", COUNTER.fetch_add(1, Ordering::SeqCst)),
        source: crate::Source::A,
        domain: crate::normalize_url(url).domain,
        url: url.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        notes: String::new(),
    }
}

fn select_all(groups: &[MergeGroup]) -> HashSet<MergeGroupKey> {
    groups.iter().map(MergeGroup::key).collect()
}

#[test]
fn test_two_urls_form_one_group() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://b.x.com", "u", "p"),
    ];

    let groups = find_merge_candidates(&entries);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].domain, "x.com");
    assert_eq!(groups[0].entries.len(), 2);
    assert_eq!(
        resolve_target_url(&groups[0], MergeStrategy::RootDomain, None),
        "https://x.com/"
    );
}

#[test]
fn test_single_url_group_is_not_a_candidate() {
    let entries = vec![
        entry("https://x.com/login", "u", "p"),
        entry("https://x.com/login", "u", "p"),
        entry("https://y.com", "u", "p"),
    ];

    assert!(find_merge_candidates(&entries).is_empty());
}

#[test]
fn test_different_password_or_username_not_grouped() {
    let entries = vec![
        entry("https://a.x.com", "u", "p1"),
        entry("https://b.x.com", "u", "p2"),
        entry("https://c.x.com", "other", "p1"),
    ];

    assert!(find_merge_candidates(&entries).is_empty());
}

#[test]
fn test_triple_match_is_case_sensitive() {
    let entries = vec![
        entry("https://a.x.com", "User", "p"),
        entry("https://b.x.com", "user", "p"),
    ];

    assert!(find_merge_candidates(&entries).is_empty());
}

#[test]
fn test_groups_sorted_by_domain_members_in_encounter_order() {
    let entries = vec![
        entry("https://z.com/1", "u", "p"),
        entry("https://m.a.com", "u", "p"),
        entry("https://z.com/2", "u", "p"),
        entry("https://n.a.com", "u", "p"),
    ];

    let groups = find_merge_candidates(&entries);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].domain, "a.com");
    assert_eq!(groups[1].domain, "z.com");
    assert_eq!(groups[1].distinct_urls(), vec!["https://z.com/1", "https://z.com/2"]);
}

#[test]
fn test_group_risk_flag() {
    let entries = vec![
        entry("https://x.com", "u", "p"),
        entry("https://admin.x.com", "u", "p"),
        entry("https://a.y.com", "u", "p"),
        entry("https://b.y.com", "u", "p"),
    ];

    let groups = find_merge_candidates(&entries);

    assert!(groups[0].has_risk);
    assert!(!groups[1].has_risk);
}

#[test]
fn test_resolve_keep_first() {
    let entries = vec![
        entry("https://b.x.com/login", "u", "p"),
        entry("https://a.x.com", "u", "p"),
    ];
    let groups = find_merge_candidates(&entries);

    assert_eq!(
        resolve_target_url(&groups[0], MergeStrategy::KeepFirst, Some("ignored")),
        "https://b.x.com/login"
    );
}

#[test]
fn test_resolve_manual() {
    let entries = vec![
        entry("https://b.x.com/login", "u", "p"),
        entry("https://a.x.com", "u", "p"),
    ];
    let groups = find_merge_candidates(&entries);

    assert_eq!(
        resolve_target_url(&groups[0], MergeStrategy::Manual, Some("https://a.x.com")),
        "https://a.x.com"
    );
    // Falls back to the first member
    assert_eq!(
        resolve_target_url(&groups[0], MergeStrategy::Manual, None),
        "https://b.x.com/login"
    );
}

#[test]
fn test_apply_merge_empty_selection_is_identity() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://b.x.com", "u", "p"),
        entry("https://y.com", "v", "q"),
    ];

    let output = apply_merge(&entries, &HashSet::new(), MergeStrategy::RootDomain, &HashMap::new());

    assert_eq!(output, entries);
}

#[test]
fn test_apply_merge_root_domain() {
    let entries = vec![
        entry("https://keep.com", "k", "k"),
        entry("https://a.x.com", "u", "p"),
        entry("https://y.com", "v", "q"),
        entry("https://b.x.com", "u", "p"),
        entry("https://c.x.com/path", "u", "p"),
    ];
    let groups = find_merge_candidates(&entries);

    let output = apply_merge(&entries, &select_all(&groups), MergeStrategy::RootDomain, &HashMap::new());

    assert_eq!(output.len(), 3);
    assert_eq!(output[0], entries[0]);
    // Representative keeps the first member's id and position
    assert_eq!(output[1].id, entries[1].id);
    assert_eq!(output[1].url, "https://x.com/");
    assert_eq!(output[2], entries[2]);
}

#[test]
fn test_apply_merge_only_selected_groups() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://b.x.com", "u", "p"),
        entry("https://a.y.com", "v", "q"),
        entry("https://b.y.com", "v", "q"),
    ];
    let groups = find_merge_candidates(&entries);
    let selected: HashSet<MergeGroupKey> = [groups[1].key()].into_iter().collect();

    let output = apply_merge(&entries, &selected, MergeStrategy::KeepFirst, &HashMap::new());

    assert_eq!(output.len(), 3);
    assert_eq!(output[0], entries[0]);
    assert_eq!(output[1], entries[1]);
    assert_eq!(output[2].url, "https://a.y.com");
}

#[test]
fn test_apply_merge_manual_choice() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://b.x.com", "u", "p"),
    ];
    let groups = find_merge_candidates(&entries);
    let manual: HashMap<MergeGroupKey, String> =
        [(groups[0].key(), "https://b.x.com".to_string())].into_iter().collect();

    let output = apply_merge(&entries, &select_all(&groups), MergeStrategy::Manual, &manual);

    assert_eq!(output.len(), 1);
    assert_eq!(output[0].id, entries[0].id);
    assert_eq!(output[0].url, "https://b.x.com");
}

#[test]
fn test_apply_merge_ignores_non_candidate_selection() {
    let entries = vec![
        entry("https://x.com", "u", "p"),
        entry("https://x.com", "u", "p"),
    ];
    let selected: HashSet<MergeGroupKey> = [MergeGroupKey::of(&entries[0])].into_iter().collect();

    let output = apply_merge(&entries, &selected, MergeStrategy::RootDomain, &HashMap::new());

    assert_eq!(output, entries);
}

#[test]
fn test_apply_merge_count_invariant() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://b.x.com", "u", "p"),
        entry("https://c.x.com", "u", "p"),
        entry("https://a.y.com", "v", "q"),
        entry("https://b.y.com", "v", "q"),
        entry("https://z.com", "w", "r"),
    ];
    let groups = find_merge_candidates(&entries);
    let stats = merge_stats(&groups);

    let output = apply_merge(&entries, &select_all(&groups), MergeStrategy::RootDomain, &HashMap::new());

    assert_eq!(output.len(), entries.len() - stats.can_merge as usize);
}

#[test]
fn test_merge_stats() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://dev.x.com", "u", "p"),
        entry("https://c.x.com", "u", "p"),
        entry("https://a.y.com", "v", "q"),
        entry("https://b.y.com", "v", "q"),
    ];

    let stats = merge_stats(&find_merge_candidates(&entries));

    assert_eq!(
        stats,
        MergeStats {
            total_groups: 2,
            total_entries: 5,
            can_merge: 3,
            risk_count: 1,
        }
    );
}

#[test]
fn test_apply_merge_json() {
    let entries = vec![
        entry("https://a.x.com", "u", "p"),
        entry("https://b.x.com", "u", "p"),
    ];
    let input = ApplyMergeInput {
        selected: vec![MergeGroupKey::of(&entries[0])],
        entries,
        strategy: MergeStrategy::RootDomain,
        manual_choices: vec![],
    };

    let output_json = apply_merge_json(&serde_json::to_string(&input).unwrap()).unwrap();
    let output: ApplyMergeOutput = serde_json::from_str(&output_json).unwrap();

    assert_eq!(output.removed, 1);
    assert_eq!(output.entries[0].url, "https://x.com/");
}

#[test]
fn test_find_merge_candidates_json() {
    let input = MergeCandidatesInput {
        entries: vec![
            entry("https://a.x.com", "u", "p"),
            entry("https://b.x.com", "u", "p"),
        ],
    };

    let output_json = find_merge_candidates_json(&serde_json::to_string(&input).unwrap()).unwrap();
    let output: MergeCandidatesOutput = serde_json::from_str(&output_json).unwrap();

    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.stats.can_merge, 1);
}
