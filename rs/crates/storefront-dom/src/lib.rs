//! storefront-dom — Shared DomNode types for Storefront renderers
//!
//! This crate defines the canonical Rust representation of the JSON DOM
//! snapshot format. The view layer builds these trees; the HTML renderer and
//! the snapshot serializer consume them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single node in the snapshot DOM tree.
///
/// Attributes and events use `BTreeMap` so serialized snapshots are
/// byte-for-byte deterministic for a given state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    /// HTML tag name (e.g. "div", "button", "input")
    pub tag: String,

    /// Stable identity for efficient DOM reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// HTML attributes (class, placeholder, data-*, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<BTreeMap<String, String>>,

    /// Map of DOM event name → action name (e.g. "click" → "add_to_cart")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<BTreeMap<String, String>>,

    /// Text content for leaf nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DomNode>>,
}

/// A complete snapshot wrapping the root DomNode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: DomNode,
}

impl DomNode {
    /// Create an empty element node
    pub fn elem(tag: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            key: None,
            attrs: None,
            events: None,
            text: None,
            children: None,
        }
    }

    /// Create a simple text node
    pub fn text(tag: &str, content: &str) -> Self {
        DomNode {
            text: Some(content.to_string()),
            ..Self::elem(tag)
        }
    }

    /// Builder: set the stable key
    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Builder: set an attribute
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Builder: map a DOM event to an action name
    pub fn event(mut self, name: &str, action: &str) -> Self {
        self.events
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), action.to_string());
        self
    }

    /// Builder: append a child node
    pub fn child(mut self, node: DomNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Builder: append many child nodes
    pub fn children(mut self, nodes: impl IntoIterator<Item = DomNode>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(nodes);
        self
    }

    /// Get an attribute value if present
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(name).map(|s| s.as_str())
    }

    /// Get a class attribute if present
    pub fn class(&self) -> Option<&str> {
        self.get_attr("class")
    }

    /// Iterate over children (empty slice if none)
    pub fn children_iter(&self) -> &[DomNode] {
        match &self.children {
            Some(c) => c,
            None => &[],
        }
    }

    /// Get an event action by event name
    pub fn get_event(&self, name: &str) -> Option<&str> {
        self.events.as_ref()?.get(name).map(|s| s.as_str())
    }

    /// Depth-first search for the first node matching the predicate
    pub fn find<'a>(&'a self, pred: &dyn Fn(&DomNode) -> bool) -> Option<&'a DomNode> {
        if pred(self) {
            return Some(self);
        }
        for child in self.children_iter() {
            if let Some(hit) = child.find(pred) {
                return Some(hit);
            }
        }
        None
    }
}

impl Snapshot {
    pub fn new(root: DomNode) -> Self {
        Snapshot { root }
    }

    /// Serialize to the JSON wire format
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parse a snapshot from a JSON string
pub fn parse_snapshot(json: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a single DomNode from a JSON string
pub fn parse_node(json: &str) -> Result<DomNode, serde_json::Error> {
    serde_json::from_str(json)
}
