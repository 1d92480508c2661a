//! Table of contents generated from the page's headings.

use crate::config::TocSettings;
use crate::page::{Page, append_child, create_element, create_text};
use crate::search::render::escape_html;
use crate::search::{IdAllocator, heading_id};
use serde::Serialize;

const EMPTY_MESSAGE: &str = "No headings found";

/// One link in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

impl TocEntry {
    fn href(&self) -> String {
        format!("#{}", self.id)
    }

    fn data_level(&self) -> String {
        format!("h{}", self.level)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    entries: Vec<TocEntry>,
    active: Option<usize>,
}

impl TableOfContents {
    /// Mirror the configured heading levels inside the content region, one entry per
    /// heading. Headings without an id get a slug written onto them.
    pub fn build(page: &Page, settings: &TocSettings) -> Self {
        let tags: Vec<String> = settings.levels.iter().map(|l| format!("h{}", l)).collect();
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        let mut ids = IdAllocator::for_page(page);

        let entries: Vec<_> = page
            .select_within(&settings.content_selector, &tags)
            .into_iter()
            .enumerate()
            .filter_map(|(ordinal, element)| {
                let level = element.heading_level()?;
                let text = element.text_content().trim().to_string();
                let id = heading_id(&element, &text, ordinal, &mut ids);
                Some(TocEntry { id, text, level })
            })
            .collect();

        tracing::debug!("Table of contents: {} entries", entries.len());
        Self {
            entries,
            active: None,
        }
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The link currently marked active.
    pub fn active(&self) -> Option<&TocEntry> {
        self.active.map(|i| &self.entries[i])
    }

    /// A heading scrolled into the reading zone: make its link the only active one.
    ///
    /// Ids not in the table leave the current state untouched. Returns whether the
    /// active link changed.
    pub fn on_heading_visible(&mut self, id: &str) -> bool {
        let Some(position) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let changed = self.active != Some(position);
        self.active = Some(position);
        changed
    }

    /// Render the links as HTML.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return format!(r#"<p class="toc-empty">{}</p>"#, EMPTY_MESSAGE);
        }

        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let class = if self.active == Some(i) {
                    "toc-link active"
                } else {
                    "toc-link"
                };
                format!(
                    r#"<a href="{}" class="{}" data-level="{}">{}</a>"#,
                    escape_html(&entry.href()),
                    class,
                    entry.data_level(),
                    escape_html(&entry.text)
                )
            })
            .collect()
    }

    /// Write the links into the element with `container_id`.
    ///
    /// Returns `false` when the page has no such container.
    pub fn install(&self, page: &Page, container_id: &str) -> bool {
        let Some(container) = page.get_element_by_id(container_id) else {
            tracing::debug!("No table of contents container '#{}'", container_id);
            return false;
        };

        let children = if self.entries.is_empty() {
            let p = create_element("p", &[("class", "toc-empty")]);
            append_child(&p, create_text(EMPTY_MESSAGE));
            vec![p]
        } else {
            self.entries
                .iter()
                .map(|entry| {
                    let href = entry.href();
                    let level = entry.data_level();
                    let link = create_element(
                        "a",
                        &[
                            ("href", href.as_str()),
                            ("class", "toc-link"),
                            ("data-level", level.as_str()),
                        ],
                    );
                    append_child(&link, create_text(&entry.text));
                    link
                })
                .collect()
        };

        page.replace_children(&container, children);
        true
    }
}
