//! URL normalization and risk classification.
//!
//! Every credential is bucketed by the domain returned from [`normalize_url`].
//! Two entries that normalize to the same domain are treated as belonging to
//! the same site by both the diff and the merge engine, so this is the one
//! place where a mistake silently merges unrelated accounts.
//!
//! Steps, in order:
//! 1. Trim, lower-case, strip `http://` / `https://`
//! 2. Cut at the first `/`, `?` or `#`, then at the first `:`
//! 3. Cloud console hosts are returned as-is and flagged
//! 4. Any sensitive label (dev, admin, ...) flags the host
//! 5. A leading `www` label is dropped
//! 6. Known public suffixes collapse the host to its registrable domain

mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;

use tables::{CLOUD_PROVIDERS, RISK_SUBDOMAINS, SINGLE_LABEL_SUFFIXES, TWO_LABEL_SUFFIXES};

/// Why a URL was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskReason {
    /// Host is a cloud provider console; needs manual handling
    CloudConsole,
    /// Host contains an environment or administrative label
    SensitiveSubdomain,
}

impl RiskReason {
    pub fn message(&self) -> &'static str {
        match self {
            RiskReason::CloudConsole => "Cloud provider console domain, requires manual handling",
            RiskReason::SensitiveSubdomain => {
                "Contains a sensitive subdomain (dev/test/admin etc.)"
            }
        }
    }
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Output of [`normalize_url`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedUrlResult {
    pub domain: String,
    pub has_risk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reason: Option<RiskReason>,
}

/// Normalize a raw URL into its comparison domain.
///
/// Never fails: empty or unparseable input yields an empty, risk-free result.
///
/// ```
/// use passdiff_core::normalize_url;
///
/// let result = normalize_url("https://www.google.com/accounts/login");
/// assert_eq!(result.domain, "google.com");
/// assert!(!result.has_risk);
/// ```
pub fn normalize_url(url: &str) -> NormalizedUrlResult {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return NormalizedUrlResult::default();
    }

    let host = extract_host(&trimmed.to_lowercase());

    if CLOUD_PROVIDERS.iter().any(|provider| host.contains(provider)) {
        return NormalizedUrlResult {
            domain: host,
            has_risk: true,
            risk_reason: Some(RiskReason::CloudConsole),
        };
    }

    let mut labels: Vec<&str> = host.split('.').collect();

    // Runs on the full label list, before the www strip
    let has_risk = labels.iter().any(|label| RISK_SUBDOMAINS.contains(*label));

    if labels.first() == Some(&"www") {
        labels.remove(0);
    }

    NormalizedUrlResult {
        domain: collapse_public_suffix(&labels),
        has_risk,
        risk_reason: has_risk.then_some(RiskReason::SensitiveSubdomain),
    }
}

/// Returns whether the URL normalizes with any risk signal.
pub fn has_risk(url: &str) -> bool {
    normalize_url(url).has_risk
}

/// Strip scheme, path, query, fragment and port from an already lower-cased URL.
fn extract_host(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let host = match without_scheme.find(['/', '?', '#']) {
        Some(pos) => &without_scheme[..pos],
        None => without_scheme,
    };

    match host.find(':') {
        Some(pos) => host[..pos].to_string(),
        None => host.to_string(),
    }
}

/// Keep the registrable part of the host for known suffixes, else the whole host.
fn collapse_public_suffix(labels: &[&str]) -> String {
    let len = labels.len();

    if len >= 2 {
        let last_two = format!("{}.{}", labels[len - 2], labels[len - 1]);
        if TWO_LABEL_SUFFIXES.contains(last_two.as_str()) {
            return labels[len.saturating_sub(3)..].join(".");
        }
    }

    if len >= 1 && SINGLE_LABEL_SUFFIXES.contains(labels[len - 1]) {
        return labels[len.saturating_sub(2)..].join(".");
    }

    labels.join(".")
}
