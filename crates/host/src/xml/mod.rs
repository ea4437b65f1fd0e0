//! An implementation of the `HostNode` trait for the `roxmltree` crate.
//!
//! `roxmltree` documents are read-only, so properties written through
//! `set_property` live in a side map owned by the `XmlDocument` and keyed by
//! node id.

use crate::error::HostError;
use crate::native::SelectorList;
use crate::node::HostNode;
use roxmltree::NodeId;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};

type PropertyMap = RefCell<HashMap<NodeId, HashMap<String, Value>>>;

/// A wrapper around a `roxmltree::Document` that acts as the entry point
/// for querying an XML tree.
pub struct XmlDocument<'a> {
    doc: roxmltree::Document<'a>,
    properties: PropertyMap,
}

impl<'a> XmlDocument<'a> {
    /// Parses an XML string into a queryable document.
    pub fn parse(text: &'a str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(XmlDocument {
            doc,
            properties: RefCell::new(HashMap::new()),
        })
    }

    /// The document node, the parent of the document element.
    pub fn root(&'a self) -> XmlNode<'a> {
        self.wrap(self.doc.root())
    }

    pub fn document_element(&'a self) -> XmlNode<'a> {
        self.wrap(self.doc.root_element())
    }

    fn wrap(&'a self, node: roxmltree::Node<'a, 'a>) -> XmlNode<'a> {
        XmlNode {
            node,
            properties: &self.properties,
        }
    }
}

/// A handle to a node of an `XmlDocument`.
#[derive(Clone, Copy)]
pub struct XmlNode<'a> {
    node: roxmltree::Node<'a, 'a>,
    properties: &'a PropertyMap,
}

impl<'a> XmlNode<'a> {
    pub fn raw(&self) -> roxmltree::Node<'a, 'a> {
        self.node
    }

    /// The local tag name; empty for non-element nodes.
    pub fn tag_name(&self) -> &'a str {
        if self.node.is_element() {
            self.node.tag_name().name()
        } else {
            ""
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// A property previously stored with `set_property`.
    pub fn property(&self, name: &str) -> Option<Value> {
        self.properties
            .borrow()
            .get(&self.node.id())
            .and_then(|props| props.get(name))
            .cloned()
    }

    fn with_node(&self, node: roxmltree::Node<'a, 'a>) -> Self {
        XmlNode {
            node,
            properties: self.properties,
        }
    }
}

// Identity is the node id; the property map is shared by every handle.
impl<'a> Debug for XmlNode<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.node.fmt(f)
    }
}

impl<'a> PartialEq for XmlNode<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.node.id() == other.node.id()
    }
}
impl<'a> Eq for XmlNode<'a> {}

impl<'a> Hash for XmlNode<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.id().hash(state);
    }
}

impl<'a> HostNode for XmlNode<'a> {
    fn query_selector(&self, selector: &str) -> Result<Option<Self>, HostError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .node
            .descendants()
            .skip(1)
            .find(|n| list.matches(*n))
            .map(|n| self.with_node(n)))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, HostError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .node
            .descendants()
            .skip(1)
            .filter(|n| list.matches(*n))
            .map(|n| self.with_node(n))
            .collect())
    }

    fn matches(&self, selector: &str) -> Result<bool, HostError> {
        Ok(SelectorList::parse(selector)?.matches(self.node))
    }

    fn closest(&self, selector: &str) -> Result<Option<Self>, HostError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .node
            .ancestors()
            .find(|n| list.matches(*n))
            .map(|n| self.with_node(n)))
    }

    fn text_content(&self) -> String {
        if self.node.is_text() {
            return self.node.text().unwrap_or("").to_string();
        }
        let mut s = String::new();
        for child in self.node.descendants() {
            if child.is_text()
                && let Some(text) = child.text()
            {
                s.push_str(text);
            }
        }
        s
    }

    fn set_property(&self, name: &str, value: Value) {
        log::trace!("Setting property '{}' on {:?}", name, self.node);
        self.properties
            .borrow_mut()
            .entry(self.node.id())
            .or_default()
            .insert(name.to_string(), value);
    }
}
