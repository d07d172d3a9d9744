use serde::{Deserialize, Serialize};

/// Which generation of listing-page markup the locators target.
///
/// The listing site has shipped at least two layouts whose labels and
/// control texts drift apart; selectors for each live in one locator
/// table keyed by this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupVersion {
    #[default]
    Current,
    Legacy,
}

impl std::fmt::Display for MarkupVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupVersion::Current => write!(f, "current"),
            MarkupVersion::Legacy => write!(f, "legacy"),
        }
    }
}
