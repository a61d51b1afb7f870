//! The document mirror: node data, tree relations, and the queries the page
//! runtime needs (class lookup in document order, text content, inline style
//! mutation, idempotent removal).
//!
//! The mirror is intentionally forgiving: updates referring to keys that are
//! absent (or already removed) are absorbed as no-ops, so a removal racing
//! external tree mutation never surfaces an error.

use crate::{DOMSubscriber, DOMUpdate, NodeKey};
use anyhow::Result;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Data stored for each document node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Data for an element node. The `class` and `style` attributes are kept in
/// parsed form alongside the raw attribute list so membership checks and
/// style mutation stay cheap.
#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    attrs: SmallVec<(String, String), 4>,
    classes: HashSet<String>,
    style: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag: String) -> Self {
        Self {
            tag,
            attrs: SmallVec::new(),
            classes: HashSet::new(),
            style: Vec::new(),
        }
    }

    /// Lowercased tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Raw attribute value, if set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// True if the element's class attribute contains the given token.
    /// Token matching is case-sensitive, per standards-mode class semantics.
    pub fn has_class(&self, token: &str) -> bool {
        self.classes.contains(token)
    }

    /// Current inline-style value for a property, if any.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an inline-style declaration, replacing any previous value.
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        if let Some(entry) = self
            .style
            .iter_mut()
            .find(|(property, _)| property.as_str() == name)
        {
            entry.1 = value.to_owned();
        } else {
            self.style.push((name.to_owned(), value.to_owned()));
        }
    }

    /// Set an attribute, replacing any previous value. The parsed class set
    /// and style declarations are re-derived when those attributes change.
    pub fn set_attribute(&mut self, name: String, value: String) {
        match name.as_str() {
            "class" => {
                self.classes = value
                    .split_ascii_whitespace()
                    .map(str::to_owned)
                    .collect();
            }
            "style" => {
                self.style = parse_style_attr(&value);
            }
            _ => {}
        }
        if let Some(entry) = self.attrs.iter_mut().find(|(attr_name, _)| *attr_name == name) {
            entry.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }
}

/// Parse an inline `style` attribute into a declaration list. Declarations
/// without a colon are dropped.
fn parse_style_attr(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .filter_map(|declaration| {
            let (property, val) = declaration.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some((property.to_owned(), val.trim().to_owned()))
        })
        .collect()
}

/// The document mirror state. Node data and tree relations are keyed by
/// [`NodeKey`]; the root key is always present.
#[derive(Debug)]
pub struct Document {
    nodes: HashMap<NodeKey, NodeData>,
    children: HashMap<NodeKey, Vec<NodeKey>>,
    parents: HashMap<NodeKey, NodeKey>,
    end_of_document: bool,
}

/// Shared handle used by the page runtime and its scheduled tasks.
pub type SharedDocument = Arc<Mutex<Document>>;

impl Document {
    /// Create a document containing only the root node.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeKey::ROOT, NodeData::Document);
        Self {
            nodes,
            children: HashMap::new(),
            parents: HashMap::new(),
            end_of_document: false,
        }
    }

    /// Apply a batch of updates in order.
    pub fn apply_batch(&mut self, batch: Vec<DOMUpdate>) -> Result<()> {
        for update in batch {
            self.apply_update(update)?;
        }
        Ok(())
    }

    /// Apply a single update. Updates naming absent nodes are no-ops.
    pub fn apply_update(&mut self, update: DOMUpdate) -> Result<()> {
        use DOMUpdate::*;

        match update {
            CreateElement { node, tag, attrs } => {
                let mut data = ElementData::new(tag);
                for (name, value) in attrs {
                    data.set_attribute(name, value);
                }
                self.nodes.insert(node, NodeData::Element(data));
            }
            CreateText { node, text } => {
                self.nodes.insert(node, NodeData::Text(text));
            }
            CreateComment { node, text } => {
                self.nodes.insert(node, NodeData::Comment(text));
            }
            AppendChild { parent, child } => {
                if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
                    return Ok(());
                }
                self.parents.insert(child, parent);
                let entry = self.children.entry(parent).or_default();
                if !entry.contains(&child) {
                    entry.push(child);
                }
            }
            SetAttr { node, name, value } => {
                if let Some(NodeData::Element(data)) = self.nodes.get_mut(&node) {
                    data.set_attribute(name, value);
                }
            }
            RemoveNode { node } => {
                self.remove_subtree(node);
            }
            EndOfDocument => {
                self.end_of_document = true;
            }
        }
        Ok(())
    }

    /// True once the parser has signalled the end of the document.
    pub const fn is_complete(&self) -> bool {
        self.end_of_document
    }

    /// Whether the node is currently attached data in the document.
    pub fn contains(&self, node: NodeKey) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Number of nodes currently in the document, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of a node, in insertion order.
    pub fn children(&self, node: NodeKey) -> &[NodeKey] {
        self.children
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.parents.get(&node).copied()
    }

    /// Element data for a node, if it is an element.
    pub fn element(&self, node: NodeKey) -> Option<&ElementData> {
        match self.nodes.get(&node) {
            Some(NodeData::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Lowercased tag name of an element node.
    pub fn tag(&self, node: NodeKey) -> Option<&str> {
        self.element(node).map(ElementData::tag)
    }

    /// Raw attribute value of an element node.
    pub fn attr(&self, node: NodeKey, name: &str) -> Option<&str> {
        self.element(node).and_then(|data| data.attr(name))
    }

    /// Current inline-style value for a property on an element node.
    pub fn style_property(&self, node: NodeKey, name: &str) -> Option<&str> {
        self.element(node).and_then(|data| data.style_property(name))
    }

    /// Set an inline-style declaration on an element node. No-op for absent
    /// or non-element nodes.
    pub fn set_style_property(&mut self, node: NodeKey, name: &str, value: &str) {
        if let Some(NodeData::Element(data)) = self.nodes.get_mut(&node) {
            data.set_style_property(name, value);
        }
    }

    /// All element nodes whose class set contains at least one of the given
    /// tokens, in document order (preorder from the root). Each element is
    /// listed once even if several of its classes match. The result is a
    /// snapshot taken at call time; later insertions are not observed by it.
    pub fn elements_with_any_class(&self, tokens: &[&str]) -> Vec<NodeKey> {
        let mut out = Vec::new();
        self.walk_classes(NodeKey::ROOT, tokens, &mut out);
        out
    }

    fn walk_classes(&self, node: NodeKey, tokens: &[&str], out: &mut Vec<NodeKey>) {
        if let Some(data) = self.element(node) {
            if tokens.iter().any(|token| data.has_class(token)) {
                out.push(node);
            }
        }
        if let Some(children) = self.children.get(&node) {
            for child in children {
                self.walk_classes(*child, tokens, out);
            }
        }
    }

    /// Concatenation of all descendant text node contents, in document
    /// order. Absent nodes yield an empty string.
    pub fn text_content(&self, node: NodeKey) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeKey, out: &mut String) {
        if let Some(NodeData::Text(text)) = self.nodes.get(&node) {
            out.push_str(text);
        }
        if let Some(children) = self.children.get(&node) {
            for child in children {
                self.collect_text(*child, out);
            }
        }
    }

    /// Detach a node and all of its descendants and drop their data.
    /// Idempotent: removing an absent node is a silent no-op.
    pub fn remove_subtree(&mut self, node: NodeKey) {
        if let Some(children) = self.children.remove(&node) {
            for child in children {
                self.remove_subtree(child);
            }
        }
        if let Some(parent) = self.parents.remove(&node) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|sibling| *sibling != node);
            }
        }
        if node != NodeKey::ROOT {
            self.nodes.remove(&node);
        }
    }

    /// Wrap the document in the shared handle used by scheduled tasks.
    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl DOMSubscriber for Document {
    fn apply_update(&mut self, update: DOMUpdate) -> Result<()> {
        Self::apply_update(self, update)
    }
}
