//! Relevance scoring for index entries.
//!
//! Scores are plain sums over the query tokens an entry contains:
//! - `+10` per matching token when the entry is a heading
//! - `+5` when the entry's whole text equals the token
//! - `+len(token)` for every matching token

use super::index::IndexEntry;

pub const HEADING_BONUS: u32 = 10;
pub const EXACT_MATCH_BONUS: u32 = 5;

/// Score and number of distinct tokens matched for one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryScore {
    pub score: u32,
    pub match_count: u32,
}

/// Score an entry against already-normalized, de-duplicated tokens.
///
/// Matching is a case-insensitive substring test; `match_count == 0` means no match.
pub fn score_entry(entry: &IndexEntry, tokens: &[&str]) -> EntryScore {
    let text = entry.text.to_lowercase();
    let mut result = EntryScore::default();

    for token in tokens.iter().filter(|t| !t.is_empty()) {
        if !text.contains(*token) {
            continue;
        }
        result.match_count += 1;
        if entry.is_heading() {
            result.score += HEADING_BONUS;
        }
        if text == *token {
            result.score += EXACT_MATCH_BONUS;
        }
        result.score += u32::try_from(token.chars().count()).unwrap_or(u32::MAX);
    }

    result
}
