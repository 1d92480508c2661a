//! HTML rendering of search results.

use regex::{Regex, RegexBuilder};

use super::index::{EntryKind, IndexEntry};
use super::query::{ScoredEntry, SearchOutcome};
use super::tokenize::{normalize_query, query_tokens};

/// Label shown under each result: `Heading <level>` or `Content`.
pub fn type_label(entry: &IndexEntry) -> String {
    match (entry.kind, entry.level) {
        (EntryKind::Heading, Some(level)) => format!("Heading {}", level),
        (EntryKind::Heading, None) => "Heading".to_string(),
        (EntryKind::Content, _) => "Content".to_string(),
    }
}

const fn icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Heading => "📄",
        EntryKind::Content => "📝",
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build one case-insensitive alternation over the tokens, longest first so that a
/// longer token wins where two overlap.
fn token_pattern(tokens: &[&str]) -> Option<Regex> {
    let mut tokens: Vec<&str> = tokens.iter().copied().filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return None;
    }
    tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .inspect_err(|e| tracing::warn!("Failed to build highlight pattern: {}", e))
        .ok()
}

/// Escape `text` and wrap each case-insensitive occurrence of a token in `<mark>`.
///
/// Tokens are matched literally, never as patterns, and the original casing of the
/// text is preserved inside the marks.
pub fn highlight_terms(text: &str, tokens: &[&str]) -> String {
    let Some(pattern) = token_pattern(tokens) else {
        return escape_html(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Render one result row.
pub fn render_result(result: &ScoredEntry<'_>, tokens: &[&str]) -> String {
    let entry = result.entry;
    format!(
        concat!(
            "<div class=\"search-result-item\" data-target=\"{}\">\n",
            "  <div class=\"search-result-icon\">{}</div>\n",
            "  <div class=\"search-result-content\">\n",
            "    <div class=\"search-result-title\">{}</div>\n",
            "    <div class=\"search-result-type\">{}</div>\n",
            "  </div>\n",
            "</div>\n",
        ),
        escape_html(&entry.id),
        icon(entry.kind),
        highlight_terms(&entry.text, tokens),
        type_label(entry)
    )
}

/// Render the contents of the results container.
///
/// Returns `None` when the query was too short, meaning the container should be emptied
/// and hidden rather than filled.
pub fn render_results(outcome: &SearchOutcome<'_>, query: &str) -> Option<String> {
    let SearchOutcome::Results(results) = outcome else {
        return None;
    };

    if results.is_empty() {
        return Some(r#"<div class="search-no-results">No results found</div>"#.to_string());
    }

    let query = normalize_query(query);
    let tokens = query_tokens(&query);
    let mut output = String::from("<div class=\"search-results-header\">Search Results</div>\n");
    for result in results {
        output.push_str(&render_result(result, &tokens));
    }
    Some(output)
}
