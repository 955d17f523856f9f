//! Alias matching with bounded edit-distance tolerance
//!
//! A token matches an alias when, after normalization, the two are equal, their
//! compact forms are equal ("nodejs" / "node.js"), or the alias is longer than
//! [`FUZZY_MIN_ALIAS_LEN`] characters and lies within [`MAX_EDIT_DISTANCE`] edits.
//! Substring containment never counts as a match.

use crate::processing::text_processor::{compact, normalize};
use strsim::levenshtein;

/// Aliases must be strictly longer than this to receive typo tolerance.
pub const FUZZY_MIN_ALIAS_LEN: usize = 5;

pub const MAX_EDIT_DISTANCE: usize = 1;

/// Edit distance (insert, delete, substitute cost 1) between the lowercased strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// True when `input` matches any of `aliases`.
pub fn matches_alias<S: AsRef<str>>(input: &str, aliases: &[S]) -> bool {
    let token = normalize(input);
    if token.is_empty() {
        return false;
    }
    let token_compact = compact(&token);

    aliases
        .iter()
        .any(|alias| matches_normalized(&token, &token_compact, alias.as_ref()))
}

/// Match against a single alias given a pre-normalized token and its compact form.
pub(crate) fn matches_normalized(token: &str, token_compact: &str, alias: &str) -> bool {
    let alias = normalize(alias);
    if alias.is_empty() {
        return false;
    }

    if token == alias {
        return true;
    }

    if !token_compact.is_empty() && token_compact == compact(&alias) {
        return true;
    }

    alias.chars().count() > FUZZY_MIN_ALIAS_LEN && levenshtein(token, &alias) <= MAX_EDIT_DISTANCE
}
