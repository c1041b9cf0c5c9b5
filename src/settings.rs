//! User-facing options passed in by the front end.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Mask shown in place of a hidden password.
pub const PASSWORD_MASK: &str = "••••••••";

/// How passwords are displayed. Has no effect on any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyMode {
    /// Always masked
    Secure,
    /// Masked until the user reveals a single cell
    #[default]
    Peek,
    /// Always shown
    Plain,
}

/// How a merge group's target URL is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum MergeStrategy {
    /// `https://{domain}/`
    #[default]
    RootDomain,
    /// URL of the first member in encounter order
    KeepFirst,
    /// User-picked URL, falling back to the first member
    Manual,
}

impl From<String> for MergeStrategy {
    fn from(value: String) -> Self {
        MergeStrategy::from(value.as_str())
    }
}

impl From<&str> for MergeStrategy {
    /// Unknown values fall back to `RootDomain`.
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "KEEP_FIRST" => MergeStrategy::KeepFirst,
            "MANUAL" => MergeStrategy::Manual,
            _ => MergeStrategy::RootDomain,
        }
    }
}

/// Settings shared by the compare and merge views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub privacy_mode: PrivacyMode,
    pub merge_strategy: MergeStrategy,
    pub show_same_entries: bool,
}

/// Text to display for a password under the given privacy mode.
///
/// `revealed` is the per-cell peek toggle and only matters in `Peek` mode.
pub fn mask_password(password: &str, mode: PrivacyMode, revealed: bool) -> Cow<'_, str> {
    match mode {
        PrivacyMode::Plain => Cow::Borrowed(password),
        PrivacyMode::Peek if revealed => Cow::Borrowed(password),
        _ => Cow::Borrowed(PASSWORD_MASK),
    }
}
