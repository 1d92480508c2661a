//! Query normalization, tokenization and heading slugs.

use regex::Regex;
use std::sync::LazyLock;

/// Characters dropped from slugs: anything that is not an ASCII word character,
/// whitespace or a hyphen.
static SLUG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug regex"));
static SLUG_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static SLUG_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid regex"));

/// Trim and lower-case a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a normalized query into distinct whitespace-delimited tokens, in query order.
///
/// Repeated words count once, so a query like `"api api"` scores the same as `"api"`.
pub fn query_tokens(query: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = vec![];
    for word in query.split_whitespace() {
        if !tokens.contains(&word) {
            tokens.push(word);
        }
    }
    tokens
}

/// Derive a URL-fragment-safe identifier from heading text.
///
/// Lower-cases, strips non-word characters, turns whitespace runs into single hyphens,
/// collapses hyphen runs and trims hyphens from both ends. May return an empty string
/// for text with no word characters.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lower, "");
    let spaced = SLUG_SPACES.replace_all(stripped.trim(), "-");
    let collapsed = SLUG_HYPHENS.replace_all(&spaced, "-");
    collapsed.trim_matches('-').to_string()
}
