use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalizes free text into a URL-safe page identifier.
///
/// Lowercases the input, collapses every run of characters outside `[a-z0-9]`
/// into a single `-` and trims separators from both ends.
pub fn slugify(term: &str) -> String {
    let lowered = term.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Turns a slug back into a display title.
///
/// Only the first character of the whole string is uppercased:
/// `quantum-computing` becomes `Quantum computing`.
pub fn display_title(slug: &str) -> String {
    let spaced = slug.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Anchor id for a section title: lowercased, whitespace runs become `-`.
pub fn section_id(title: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}
