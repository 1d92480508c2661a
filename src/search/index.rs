//! Page indexing: headings and text blocks captured into an ordered [`SearchIndex`].

use crate::config::SearchSettings;
use crate::page::{Element, NodePath, Page};
use ahash::AHashSet;
use serde::Serialize;

use super::tokenize::slugify;

/// Tags indexed as body content.
const CONTENT_TAGS: &[&str] = &["p", "li"];
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Discriminates headings from body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Heading,
    Content,
}

/// One indexable unit of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Unique within the index; the navigation target for this entry.
    pub id: String,
    /// Trimmed text captured at build time. Later DOM edits are not reflected.
    pub text: String,
    pub kind: EntryKind,
    /// Heading depth; `Some` only for headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Where the source element lives in the page.
    pub locator: NodePath,
}

impl IndexEntry {
    pub fn heading(id: impl Into<String>, level: u8, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: EntryKind::Heading,
            level: Some(level),
            locator: NodePath::default(),
        }
    }

    pub fn content(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: EntryKind::Content,
            level: None,
            locator: NodePath::default(),
        }
    }

    #[must_use]
    pub fn with_locator(mut self, locator: NodePath) -> Self {
        self.locator = locator;
        self
    }

    pub fn is_heading(&self) -> bool {
        self.kind == EntryKind::Heading
    }
}

/// The in-memory search index for one page load.
///
/// Entries are ordered headings-first (document order), then content (document order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Wrap pre-built entries.
    ///
    /// Ids are assumed unique; use [`build_index`] to derive them from a page.
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn heading_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_heading()).count()
    }
}

/// Hands out ids, suffixing `-2`, `-3`, ... when a candidate is already taken.
///
/// An allocator built with [`IdAllocator::for_page`] also steers clear of every id
/// already present in the page, so ids it writes never duplicate another element's.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    taken: AHashSet<String>,
    reserved: AHashSet<String>,
}

impl IdAllocator {
    pub(crate) fn for_page(page: &Page) -> Self {
        Self {
            taken: AHashSet::default(),
            reserved: page.element_ids().into_iter().collect(),
        }
    }

    fn is_free(&self, id: &str) -> bool {
        !self.taken.contains(id) && !self.reserved.contains(id)
    }

    pub(crate) fn allocate(&mut self, candidate: &str) -> String {
        let mut id = candidate.to_string();
        let mut n = 2;
        while !self.is_free(&id) {
            id = format!("{}-{}", candidate, n);
            n += 1;
        }
        self.taken.insert(id.clone());
        id
    }

    /// Take an id an element already carries. Fails if this allocator handed it out before.
    pub(crate) fn claim(&mut self, existing: &str) -> bool {
        self.taken.insert(existing.to_string())
    }
}

/// Id for a heading: its existing `id`, or a slug of its text written onto the element.
///
/// Headings with no usable slug fall back to `heading-<ordinal>`. An existing id is kept
/// unless an earlier heading already claimed it (duplicate ids in the source markup); the
/// element is then given a fresh suffixed id, so every returned id names exactly one
/// element. A second pass over the same page reuses the ids written by the first.
pub(crate) fn heading_id(element: &Element, text: &str, ordinal: usize, ids: &mut IdAllocator) -> String {
    let candidate = match element.id() {
        Some(existing) if ids.claim(&existing) => return existing,
        Some(existing) => existing,
        None => {
            let slug = slugify(text);
            if slug.is_empty() {
                format!("heading-{}", ordinal)
            } else {
                slug
            }
        }
    };
    let id = ids.allocate(&candidate);
    element.set_id(&id);
    id
}

/// Scan the page's content region and build the search index.
///
/// Never fails: a page without the region, or with nothing in it, yields an empty index.
pub fn build_index(page: &Page, settings: &SearchSettings) -> SearchIndex {
    let start = std::time::Instant::now();
    let max_level = usize::from(settings.max_heading_level.clamp(1, 6));
    let region = &settings.content_selector;
    let mut ids = IdAllocator::for_page(page);
    let mut entries = vec![];

    for (ordinal, element) in page
        .select_within(region, &HEADING_TAGS[..max_level])
        .into_iter()
        .enumerate()
    {
        let Some(level) = element.heading_level() else {
            continue;
        };
        let text = element.text_content().trim().to_string();
        let id = heading_id(&element, &text, ordinal, &mut ids);
        entries.push(IndexEntry::heading(id, level, text).with_locator(element.path().clone()));
    }
    let headings = entries.len();

    for (ordinal, element) in page.select_within(region, CONTENT_TAGS).into_iter().enumerate() {
        let id = ids.allocate(&format!("content-{}", ordinal));
        let text = element.text_content().trim().to_string();
        entries.push(IndexEntry::content(id, text).with_locator(element.path().clone()));
    }

    tracing::info!(
        "Built search index over '{}': {} headings, {} content blocks in {:?}",
        region,
        headings,
        entries.len() - headings,
        start.elapsed()
    );

    SearchIndex { entries }
}
