//! The search result surface: what the results container shows, driven by UI events.
//!
//! ```text
//! Hidden ──(query ≥ min chars)──▶ Showing { Results | NoResults }
//!    ▲                                  │
//!    └──(selection | click outside | query shortened)
//! ```
//!
//! The host forwards its input, click and timer events to the `on_*`/`tick` methods and
//! applies the returned [`Navigation`] and the current [`SurfaceState`] to the page.

use crate::page::NodePath;
use serde::Serialize;
use std::time::{Duration, Instant};

use super::index::SearchIndex;
use super::query::{QueryEngine, SearchOutcome};
use super::render::{highlight_terms, render_results, type_label};
use super::tokenize::{normalize_query, query_tokens};

/// One rendered result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub title_html: String,
    pub type_label: String,
    pub score: u32,
}

/// What the results container currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum SurfaceState {
    #[default]
    Hidden,
    Results(Vec<ResultRow>),
    NoResults,
}

impl SurfaceState {
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
}

/// Side effect of selecting a result: scroll to the source element and flash it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub target_id: String,
    pub locator: NodePath,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
    pub highlight_color: String,
    pub highlight_for: Duration,
}

/// A highlight applied by a navigation, pending removal.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveHighlight {
    target_id: String,
    expires_at: Instant,
}

/// Result surface bound to one page's index.
#[derive(Debug)]
pub struct SearchSurface<'i> {
    index: &'i SearchIndex,
    engine: QueryEngine,
    state: SurfaceState,
    html: Option<String>,
    highlights: Vec<ActiveHighlight>,
}

impl<'i> SearchSurface<'i> {
    pub fn new(index: &'i SearchIndex, engine: QueryEngine) -> Self {
        Self {
            index,
            engine,
            state: SurfaceState::Hidden,
            html: None,
            highlights: vec![],
        }
    }

    pub const fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Rendered container markup, `None` while hidden.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Re-run the query and replace whatever was showing.
    pub fn on_query_changed(&mut self, raw: &str) -> &SurfaceState {
        let outcome = self.engine.search(self.index, raw);
        self.html = render_results(&outcome, raw);

        self.state = match outcome {
            SearchOutcome::TooShort => SurfaceState::Hidden,
            SearchOutcome::Results(results) if results.is_empty() => SurfaceState::NoResults,
            SearchOutcome::Results(results) => {
                let query = normalize_query(raw);
                let tokens = query_tokens(&query);
                SurfaceState::Results(
                    results
                        .iter()
                        .map(|r| ResultRow {
                            id: r.entry.id.clone(),
                            title_html: highlight_terms(&r.entry.text, &tokens),
                            type_label: type_label(r.entry),
                            score: r.score,
                        })
                        .collect(),
                )
            }
        };
        &self.state
    }

    /// Handle a click on a result row.
    ///
    /// Always hides the surface. Returns the navigation to perform when `id` names an
    /// indexed entry, and starts its highlight timer.
    pub fn on_result_selected(&mut self, id: &str, now: Instant) -> Option<Navigation> {
        self.hide();

        let Some(entry) = self.index.get(id) else {
            tracing::debug!("Selected result '{}' is not in the index", id);
            return None;
        };

        let settings = self.engine.settings();
        let highlight_for = Duration::from_millis(settings.highlight_ms);
        self.highlights.retain(|h| h.target_id != entry.id);
        self.highlights.push(ActiveHighlight {
            target_id: entry.id.clone(),
            expires_at: now + highlight_for,
        });

        Some(Navigation {
            target_id: entry.id.clone(),
            locator: entry.locator.clone(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
            highlight_color: settings.highlight_color.clone(),
            highlight_for,
        })
    }

    /// Handle a click anywhere outside the input and the results container.
    pub fn on_click_outside(&mut self) {
        self.hide();
    }

    /// Ids currently highlighted.
    pub fn highlighted(&self) -> impl Iterator<Item = &str> {
        self.highlights.iter().map(|h| h.target_id.as_str())
    }

    /// Expire highlights whose time is up, returning the ids to un-highlight.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.highlights)
            .into_iter()
            .partition(|h| h.expires_at <= now);
        self.highlights = live;
        expired.into_iter().map(|h| h.target_id).collect()
    }

    fn hide(&mut self) {
        self.state = SurfaceState::Hidden;
        self.html = None;
    }
}
