//! Drug mention detection in free text
//!
//! Candidates come from three signals: generic-name stem suffixes
//! ("-azole", "-statin"), brand-like capitalized tokens, and enumeration
//! phrases ("such as X, Y", "(e.g., X, Y)"). All output is lower-cased
//! and deduplicated in first-seen order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;

/// Shortest token considered a possible drug name
const MIN_TOKEN_LEN: usize = 4;

/// Longest token considered a possible drug name
const MAX_TOKEN_LEN: usize = 40;

/// Minimum length for a capitalized token to count as brand-like
const MIN_BRAND_LEN: usize = 5;

static PAREN_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*(?:e\.g\.|eg\.|including|such as)\s*,?\s*([^)]+)\)").expect("valid regex")
});

static SUCH_AS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsuch as\s+([A-Za-z][A-Za-z0-9 ,'\-]*)").expect("valid regex"));

/// Detect candidate drug mentions in a text unit
///
/// Returns lower-cased names, deduplicated, in order of first appearance.
pub fn detect_mentions(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for raw in text.split(|c: char| !(c.is_alphanumeric() || c == '-')) {
        let token = raw.trim_matches('-');
        if token.len() < MIN_TOKEN_LEN || token.len() > MAX_TOKEN_LEN {
            continue;
        }
        let token_lower = token.to_lowercase();
        if lexicon.is_stopword(&token_lower) {
            continue;
        }
        if has_generic_suffix(&token_lower, lexicon) || looks_brand_like(token) {
            push_unique(&mut found, token_lower);
        }
    }

    for caps in PAREN_LIST_RE
        .captures_iter(text)
        .chain(SUCH_AS_RE.captures_iter(text))
    {
        if let Some(list) = caps.get(1) {
            for item in split_enumeration(list.as_str()) {
                let item_lower = item.to_lowercase();
                if !lexicon.is_stopword(&item_lower) {
                    push_unique(&mut found, item_lower);
                }
            }
        }
    }

    found
}

/// True when the token ends in a known generic-name stem
fn has_generic_suffix(token_lower: &str, lexicon: &Lexicon) -> bool {
    lexicon
        .generic_suffixes
        .iter()
        .any(|suffix| token_lower.len() > suffix.len() && token_lower.ends_with(suffix.as_str()))
}

/// True for a capitalized, otherwise lower-case, purely alphabetic token
fn looks_brand_like(token: &str) -> bool {
    if token.len() < MIN_BRAND_LEN {
        return false;
    }
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase())
}

/// Split an enumeration capture into plausible name items
///
/// Items are kept when they are one to three alphabetic words; longer
/// fragments are prose, not names.
fn split_enumeration(list: &str) -> Vec<&str> {
    list.split(&[',', ';'][..])
        .flat_map(|part| part.split(" and "))
        .flat_map(|part| part.split(" or "))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| {
            let words: Vec<&str> = item.split_whitespace().collect();
            (1..=3).contains(&words.len())
                && words
                    .iter()
                    .all(|w| w.chars().all(|c| c.is_alphabetic() || c == '-'))
        })
        .collect()
}

fn push_unique(found: &mut Vec<String>, candidate: String) {
    if !found.iter().any(|existing| *existing == candidate) {
        found.push(candidate);
    }
}
