//! Parsed HTML pages.
//!
//! A [`Page`] owns the DOM tree produced by html5ever. Everything else in the crate
//! reads the tree through [`Element`] handles returned by the selection methods here,
//! and refers back to elements by [`NodePath`] rather than by holding nodes.

mod element;
mod selector;

pub use element::{Element, NodePath, append_child, create_element, create_text};
pub use selector::Selector;

use crate::error::PageError;
use html5ever::{
    parse_document,
    serialize::{SerializeOpts, serialize},
    tendril::TendrilSink,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::{
    fmt::{self, Debug, Formatter},
    path::Path,
};

/// A rendered documentation page.
pub struct Page {
    dom: RcDom,
}

impl Debug for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("children", &self.dom.document.children.borrow().len())
            .finish()
    }
}

impl Page {
    /// Parse an HTML document. html5ever recovers from malformed markup, so this never fails.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// Read and parse an HTML file.
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let html = std::fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded page {} ({} bytes)", path.display(), html.len());
        Ok(Self::parse(&html))
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<Element> {
        let mut out = vec![];
        let mut path = vec![];
        walk(&self.dom.document, &mut path, &mut |handle, path| {
            if element_matches(handle, selector) {
                out.push(Element::new(handle.clone(), NodePath::from_indices(path)));
            }
        });
        out
    }

    /// Elements whose tag is one of `tags` and that sit inside an element matching
    /// `region`, in document order.
    ///
    /// Nested regions do not produce duplicates, and the region element itself is
    /// never returned (only its descendants are "within" it).
    pub fn select_within(&self, region: &Selector, tags: &[&str]) -> Vec<Element> {
        let mut out = vec![];
        let mut path = vec![];
        collect_within(&self.dom.document, &mut path, false, region, tags, &mut out);
        out
    }

    /// First element whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.select(&Selector::Id(id.to_string())).into_iter().next()
    }

    /// Every non-empty `id` attribute in the document, in document order. Duplicates are kept.
    pub fn element_ids(&self) -> Vec<String> {
        let mut ids = vec![];
        let mut path = vec![];
        walk(&self.dom.document, &mut path, &mut |handle, _| {
            if let Some(id) = element::attribute(handle, "id").filter(|id| !id.is_empty()) {
                ids.push(id);
            }
        });
        ids
    }

    /// Look an element up by its path. Returns `None` if the path no longer leads to an
    /// element (e.g. the tree was restructured after the path was taken).
    pub fn resolve(&self, path: &NodePath) -> Option<Element> {
        let mut node = self.dom.document.clone();
        for &index in path.indices() {
            let child = node.children.borrow().get(index).cloned()?;
            node = child;
        }
        matches!(node.data, NodeData::Element { .. }).then(|| Element::new(node, path.clone()))
    }

    /// Replace all children of `parent` with `children`.
    pub fn replace_children(&self, parent: &Element, children: Vec<Handle>) {
        let handle = parent.handle();
        for old in handle.children.borrow_mut().drain(..) {
            old.parent.set(None);
        }
        for child in children {
            append_child(handle, child);
        }
    }

    /// Serialize the whole document back to HTML.
    pub fn to_html(&self) -> Result<String, PageError> {
        let mut output = Vec::new();
        let document = SerializableHandle::from(self.dom.document.clone());
        serialize(&mut output, &document, SerializeOpts::default()).map_err(PageError::Serialize)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Pre-order walk over element nodes, tracking the child-index path.
fn walk(node: &Handle, path: &mut Vec<usize>, visit: &mut impl FnMut(&Handle, &[usize])) {
    for (index, child) in node.children.borrow().iter().enumerate() {
        if !matches!(child.data, NodeData::Element { .. }) {
            continue;
        }
        path.push(index);
        visit(child, path);
        walk(child, path, visit);
        path.pop();
    }
}

fn collect_within(
    node: &Handle,
    path: &mut Vec<usize>,
    in_region: bool,
    region: &Selector,
    tags: &[&str],
    out: &mut Vec<Element>,
) {
    for (index, child) in node.children.borrow().iter().enumerate() {
        let Some(tag) = element::tag_name(child) else {
            continue;
        };
        path.push(index);
        if in_region && tags.contains(&tag.as_str()) {
            out.push(Element::new(child.clone(), NodePath::from_indices(path)));
        }
        let child_in_region = in_region || element_matches(child, region);
        collect_within(child, path, child_in_region, region, tags, out);
        path.pop();
    }
}

fn element_matches(handle: &Handle, selector: &Selector) -> bool {
    let Some(tag) = element::tag_name(handle) else {
        return false;
    };
    let id = element::attribute(handle, "id");
    let class = element::attribute(handle, "class");
    selector.matches(&tag, id.as_deref(), class.as_deref())
}
