//! Identity keys: the exact-match notion of "the same account".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Joins the two key parts. Must not occur in a hostname or a username.
const KEY_SEPARATOR: char = '\u{1f}';

/// Lower-cased `(domain, username)` pair joined into one opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the identity key for a domain and username.
pub fn build_key(domain: &str, username: &str) -> IdentityKey {
    let mut key = String::with_capacity(domain.len() + username.len() + 1);
    key.push_str(&domain.to_lowercase());
    key.push(KEY_SEPARATOR);
    key.push_str(&username.to_lowercase());
    IdentityKey(key)
}

/// Case-insensitive ordering with an ordinal tie-break.
///
/// Used for every user-visible sort (domains, usernames) so that the order is
/// stable regardless of input casing.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
