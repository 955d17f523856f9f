//! Text normalization and tokenization shared by both engines

use unicode_segmentation::UnicodeSegmentation;

/// Characters dropped when building the compact form of a skill name.
const COMPACT_STRIPPED: [char; 3] = [' ', '-', '.'];

/// Delimiters accepted between skills in a free-text skill list.
const SKILL_LIST_DELIMITERS: [char; 5] = [',', ';', '\n', '|', '/'];

/// Lowercase, trim and collapse internal whitespace runs to a single space.
///
/// Total over any input; the empty string normalizes to itself.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalized form with spaces, hyphens and dots removed ("Node.js" -> "nodejs").
pub fn compact(raw: &str) -> String {
    normalize(raw)
        .chars()
        .filter(|c| !COMPACT_STRIPPED.contains(c))
        .collect()
}

/// Normalized token paired with its compact form, as consumed by the alias matcher.
pub fn token_forms(raw: &str) -> (String, String) {
    let token = normalize(raw);
    let token_compact = compact(&token);
    (token, token_compact)
}

/// Split a free-text skill list ("React, Node.js; SQL") into normalized tokens.
///
/// Empty fragments are dropped and duplicates are removed, keeping first-seen order.
pub fn split_skill_list(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for fragment in text.split(|c: char| SKILL_LIST_DELIMITERS.contains(&c)) {
        let token = normalize(fragment);
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Normalize a list of skill tokens, dropping blanks and exact duplicates.
pub fn normalize_skills<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let token = normalize(skill.as_ref());
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Number of Unicode words in the text.
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Replace typographic punctuation with ASCII equivalents.
pub fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect()
}
