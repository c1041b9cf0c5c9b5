//! Fixed lookup tables used by the domain normalizer.
//!
//! The suffix tables are not a public-suffix list and must stay small:
//! adding entries changes which hosts share a comparison domain.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Environment and administrative labels that mark a host as sensitive.
static RISK_SUBDOMAIN_LIST: &[&str] = &[
    "dev", "uat", "test", "staging", "admin", "prod", "production",
    "api", "internal", "sandbox", "demo", "beta", "alpha",
];

/// Cloud console hosts. Matched by substring against the bare host.
pub static CLOUD_PROVIDERS: &[&str] = &[
    "aws.amazon.com",
    "console.aws.amazon.com",
    "portal.azure.com",
    "console.cloud.google.com",
    "cloud.digitalocean.com",
];

/// Top-level domains collapsed to `label.tld`.
static SINGLE_LABEL_SUFFIX_LIST: &[&str] = &[
    "com", "org", "net", "edu", "gov", "io", "co", "me", "cn", "uk", "de", "jp",
];

/// Second-level public suffixes collapsed to `label.sld.tld`.
static TWO_LABEL_SUFFIX_LIST: &[&str] = &["com.cn", "co.uk", "co.jp", "com.au", "co.nz"];

pub static RISK_SUBDOMAINS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| RISK_SUBDOMAIN_LIST.iter().copied().collect());

pub static SINGLE_LABEL_SUFFIXES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SINGLE_LABEL_SUFFIX_LIST.iter().copied().collect());

pub static TWO_LABEL_SUFFIXES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TWO_LABEL_SUFFIX_LIST.iter().copied().collect());
