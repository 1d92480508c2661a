//! Element handles and DOM node helpers.

use html5ever::{Attribute, LocalName, QualName, ns};
use markup5ever_rcdom::{Handle, Node, NodeData};
use serde::Serialize;
use std::{
    cell::{Cell, RefCell},
    fmt::{self, Debug, Formatter},
    rc::Rc,
};

/// Child-index path from the document root to a node.
///
/// Used as a non-owning lookup key for elements: the page owns the tree, anything that
/// needs to point back at an element stores one of these and resolves it through
/// [`Page::resolve`](super::Page::resolve).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub(crate) fn from_indices(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }

    /// Child indices from the document root, outermost first.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", index)?;
            first = false;
        }
        Ok(())
    }
}

/// An element found in a [`Page`](super::Page), together with its location.
#[derive(Clone)]
pub struct Element {
    handle: Handle,
    path: NodePath,
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("id", &self.id())
            .field("path", &self.path)
            .finish()
    }
}

impl Element {
    pub(crate) const fn new(handle: Handle, path: NodePath) -> Self {
        Self { handle, path }
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub(crate) const fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Lower-case tag name, or an empty string for non-element nodes.
    pub fn tag(&self) -> String {
        tag_name(&self.handle).unwrap_or_default()
    }

    /// Heading depth for `h1`..`h6`, `None` for any other element.
    pub fn heading_level(&self) -> Option<u8> {
        heading_level(&self.tag())
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        attribute(&self.handle, name)
    }

    /// The element's `id` attribute, if present and non-empty.
    pub fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
    }

    /// Concatenated text of all descendant text nodes, like the DOM's `textContent`.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.handle, &mut text);
        text
    }

    /// Set the `id` attribute, replacing any existing value.
    pub fn set_id(&self, id: &str) {
        set_attribute(&self.handle, "id", id);
    }
}

pub(crate) fn tag_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => {
            let local: &str = &name.local;
            Some(local.to_ascii_lowercase())
        }
        _ => None,
    }
}

pub(crate) fn heading_level(tag: &str) -> Option<u8> {
    let digit = tag.strip_prefix('h')?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

pub(crate) fn attribute(handle: &Handle, name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

fn set_attribute(handle: &Handle, name: &str, value: &str) {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    if let Some(attr) = attrs.iter_mut().find(|attr| &*attr.name.local == name) {
        attr.value = value.into();
    } else {
        attrs.push(Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        });
    }
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

/// Create a detached HTML element node.
pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: (*value).into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: RefCell::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a detached text node.
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.into()),
        },
    })
}

/// Append `child` to `parent`, fixing up the child's parent pointer.
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}
