//! Free-text queries over a [`SearchIndex`].

use crate::config::SearchSettings;
use serde::Serialize;

use super::index::{IndexEntry, SearchIndex};
use super::scoring::score_entry;
use super::tokenize::{normalize_query, query_tokens};

/// An index entry with its score for one query. Discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a IndexEntry,
    pub score: u32,
    pub match_count: u32,
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum SearchOutcome<'a> {
    /// The query was too short to run: the result surface should be cleared and hidden.
    TooShort,
    /// The query ran. An empty list means "no results", which is still shown.
    Results(Vec<ScoredEntry<'a>>),
}

impl<'a> SearchOutcome<'a> {
    pub fn results(&self) -> &[ScoredEntry<'a>] {
        match self {
            Self::TooShort => &[],
            Self::Results(results) => results,
        }
    }

    pub const fn is_too_short(&self) -> bool {
        matches!(self, Self::TooShort)
    }
}

/// Scores and ranks index entries against queries.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    settings: SearchSettings,
}

impl QueryEngine {
    pub const fn new(settings: SearchSettings) -> Self {
        Self { settings }
    }

    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Run a query.
    ///
    /// The query is trimmed and lower-cased here, so raw input text is fine. Results are
    /// sorted by score (highest first); equal scores keep index order. At most
    /// `max_results` entries are returned.
    pub fn search<'a>(&self, index: &'a SearchIndex, query: &str) -> SearchOutcome<'a> {
        let query = normalize_query(query);
        if query.chars().count() < self.settings.min_query_chars {
            return SearchOutcome::TooShort;
        }

        let tokens = query_tokens(&query);
        let mut results: Vec<_> = index
            .entries()
            .iter()
            .filter_map(|entry| {
                let scored = score_entry(entry, &tokens);
                (scored.match_count > 0).then_some(ScoredEntry {
                    entry,
                    score: scored.score,
                    match_count: scored.match_count,
                })
            })
            .collect();
        let matched = results.len();

        // `sort_by` is stable, which is what keeps ties in index order.
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(self.settings.max_results);

        tracing::debug!(
            "Query '{}' ({} tokens): {} of {} entries matched, returning {}",
            query,
            tokens.len(),
            matched,
            index.len(),
            results.len()
        );

        SearchOutcome::Results(results)
    }
}

/// Run a query with default settings.
pub fn search<'a>(index: &'a SearchIndex, query: &str) -> SearchOutcome<'a> {
    QueryEngine::default().search(index, query)
}
