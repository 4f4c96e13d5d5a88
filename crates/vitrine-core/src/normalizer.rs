//! Identifier normalization against a closed vocabulary.
//!
//! Free text from a caller ("terra", " EARTH ", "ear") is mapped onto one
//! canonical entry. Phases run in a fixed order and the first hit wins:
//!
//! 1. empty / whitespace-only input → the configured default
//! 2. exact match, ignoring case and non-alphanumerics
//! 3. alias table
//! 4. prefix of an entry, scanning in vocabulary order
//!
//! Vocabulary order is the only tie-breaker. No scoring is involved, so the
//! same input always produces the same answer.

use std::collections::BTreeMap;

use vitrine_contracts::action::Vocabulary;

/// Result of normalizing one raw identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedIdentifier {
    Canonical(String),
    Unresolved,
}

impl NormalizedIdentifier {
    pub fn canonical(&self) -> Option<&str> {
        match self {
            NormalizedIdentifier::Canonical(s) => Some(s),
            NormalizedIdentifier::Unresolved => None,
        }
    }
}

/// Lowercase `s` and drop every non-alphanumeric character.
fn strip(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Map `raw` onto an entry of `vocabulary`.
///
/// Alias keys are compared in stripped form, so `"red planet"` and
/// `"red-planet"` in the table both answer to the input `"Red Planet"`.
/// Input that strips to nothing (`"--"`) is a prefix of every entry and
/// resolves to the first one.
pub fn normalize(
    raw: &str,
    vocabulary: &[String],
    aliases: &BTreeMap<String, String>,
    default: &str,
) -> NormalizedIdentifier {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return NormalizedIdentifier::Canonical(default.to_string());
    }

    let clean = strip(&key);

    if let Some(entry) = vocabulary
        .iter()
        .find(|entry| strip(entry) == clean || entry.to_lowercase() == key)
    {
        return NormalizedIdentifier::Canonical(entry.clone());
    }

    if let Some(target) = aliases
        .iter()
        .find(|(alias, _)| strip(alias) == clean)
        .map(|(_, target)| target)
    {
        return NormalizedIdentifier::Canonical(target.clone());
    }

    vocabulary
        .iter()
        .find(|entry| strip(entry).starts_with(&clean))
        .map(|entry| NormalizedIdentifier::Canonical(entry.clone()))
        .unwrap_or(NormalizedIdentifier::Unresolved)
}

/// `normalize` using the entries, aliases, and default of `vocabulary`.
pub fn normalize_in(raw: &str, vocabulary: &Vocabulary) -> NormalizedIdentifier {
    normalize(raw, &vocabulary.entries, &vocabulary.aliases, &vocabulary.default)
}
