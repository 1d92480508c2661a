//! Sidebar navigation: filtering by typed text and marking the current page.

use crate::config::SidebarSettings;
use crate::debounce::Debouncer;
use crate::page::{Element, Page};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub items: Vec<NavItem>,
}

/// The navigation sections read from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    sections: Vec<NavSection>,
}

/// Visibility of one item after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView<'a> {
    #[serde(flatten)]
    pub item: &'a NavItem,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView<'a> {
    pub visible: bool,
    pub items: Vec<ItemView<'a>>,
}

impl Sidebar {
    pub const fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    /// Read every section and its items from the page.
    pub fn from_page(page: &Page, settings: &SidebarSettings) -> Self {
        let sections = page
            .select(&settings.section_selector)
            .iter()
            .map(|section| NavSection {
                items: items_in(page, section, settings),
            })
            .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    fn items(&self) -> impl Iterator<Item = &NavItem> {
        self.sections.iter().flat_map(|s| &s.items)
    }

    /// Filter by a case-insensitive substring of the item label.
    ///
    /// An empty query shows everything; otherwise a section is visible only while at
    /// least one of its items is.
    pub fn filter(&self, query: &str) -> Vec<SectionView<'_>> {
        let query = query.to_lowercase();
        self.sections
            .iter()
            .map(|section| {
                let items: Vec<_> = section
                    .items
                    .iter()
                    .map(|item| ItemView {
                        item,
                        visible: query.is_empty() || item.label.to_lowercase().contains(&query),
                    })
                    .collect();
                SectionView {
                    visible: query.is_empty() || items.iter().any(|i| i.visible),
                    items,
                }
            })
            .collect()
    }

    /// Items whose link target appears in the current path.
    pub fn active_items<'a>(&'a self, current_path: &'a str) -> impl Iterator<Item = &'a NavItem> + 'a {
        self.items().filter(move |item| {
            item.href
                .as_deref()
                .is_some_and(|href| !href.is_empty() && current_path.contains(href))
        })
    }
}

/// Nav items inside `section`, in document order.
fn items_in(page: &Page, section: &Element, settings: &SidebarSettings) -> Vec<NavItem> {
    let prefix = section.path().indices();
    page.select(&settings.item_selector)
        .into_iter()
        .filter(|item| {
            let path = item.path().indices();
            path.len() > prefix.len() && path.starts_with(prefix)
        })
        .map(|item| NavItem {
            label: item.text_content().trim().to_string(),
            href: item.attribute("href"),
        })
        .collect()
}

/// Sidebar filter fed by a debounced text input.
#[derive(Debug)]
pub struct SidebarController {
    sidebar: Sidebar,
    input: Debouncer<String>,
    query: String,
}

impl SidebarController {
    pub fn new(sidebar: Sidebar, settings: &SidebarSettings) -> Self {
        Self {
            sidebar,
            input: Debouncer::new(Duration::from_millis(settings.debounce_ms)),
            query: String::new(),
        }
    }

    pub const fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// The query the current view reflects.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.input.push(text.to_string(), now);
    }

    /// Apply the pending input once it has settled. Returns the new view if it changed.
    pub fn tick(&mut self, now: Instant) -> Option<Vec<SectionView<'_>>> {
        let query = self.input.poll(now)?;
        tracing::debug!("Filtering sidebar by '{}'", query);
        self.query = query;
        Some(self.sidebar.filter(&self.query))
    }

    pub fn view(&self) -> Vec<SectionView<'_>> {
        self.sidebar.filter(&self.query)
    }
}
