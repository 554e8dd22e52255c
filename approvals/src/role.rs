//! Role label normalisation.
//!
//! Backend data mixes casing and accents for the same role
//! (`"Producción"`, `"produccion"`, `"PRODUCCION"`). Comparison happens on a
//! canonical token: trimmed, diacritics stripped, lowercased.

use std::collections::BTreeSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns the canonical token for a role label.
///
/// Empty or whitespace-only input yields the empty string, which never
/// matches a required role.
#[must_use]
pub fn normalize_role(raw: &str) -> String {
    raw.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalises a list of role labels into a set, dropping empty tokens.
pub fn normalize_roles<I, S>(roles: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    roles
        .into_iter()
        .map(|r| normalize_role(r.as_ref()))
        .filter(|r| !r.is_empty())
        .collect()
}
