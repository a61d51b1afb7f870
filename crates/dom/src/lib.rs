//! DOM update model and document mirroring primitives.
//!
//! This crate centralizes the types shared between the HTML parser and the
//! page runtime: stable node keys, the batchable [`DOMUpdate`] enum, and the
//! [`Document`] mirror that applies updates and answers queries.

use anyhow::Result;

pub mod document;
pub use document::{Document, ElementData, NodeData, SharedDocument};

/// A 64-bit stable key for DOM nodes used to correlate updates across
/// subsystems. Keys are minted by producers (the parser sink, tests) and are
/// never reused within a document.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// The document root key (always present).
    pub const ROOT: NodeKey = NodeKey(0);
}

/// A batchable update applied to the runtime document and mirrored to
/// subscribers.
#[derive(Debug, Clone)]
pub enum DOMUpdate {
    CreateElement {
        node: NodeKey,
        tag: String,
        attrs: Vec<(String, String)>,
    },
    CreateText {
        node: NodeKey,
        text: String,
    },
    CreateComment {
        node: NodeKey,
        text: String,
    },
    AppendChild {
        parent: NodeKey,
        child: NodeKey,
    },
    SetAttr {
        node: NodeKey,
        name: String,
        value: String,
    },
    RemoveNode {
        node: NodeKey,
    },
    EndOfDocument,
}

/// A subscriber that receives [`DOMUpdate`] values and mirrors them into its
/// own state.
pub trait DOMSubscriber {
    /// Apply a single update to the subscriber state.
    fn apply_update(&mut self, update: DOMUpdate) -> Result<()>;
}
