//! Streaming document construction: mints node keys and sends
//! [`DOMUpdate`] values over a channel as the parse proceeds.

use dom::{DOMUpdate, NodeKey};
use std::cell::Cell;
use std::sync::mpsc;

/// Builder that decouples the parser from whatever mirrors the updates.
/// Key 0 is the document root; minted keys start at 1.
pub struct DocumentBuilder {
    next_key: Cell<u64>,
    tx: mpsc::Sender<DOMUpdate>,
}

impl DocumentBuilder {
    /// Create a builder that streams updates to the given channel.
    pub fn new(tx: mpsc::Sender<DOMUpdate>) -> Self {
        Self {
            next_key: Cell::new(1),
            tx,
        }
    }

    /// The document root key.
    pub const fn document(&self) -> NodeKey {
        NodeKey::ROOT
    }

    fn mint_key(&self) -> NodeKey {
        let key = NodeKey(self.next_key.get());
        self.next_key.set(self.next_key.get() + 1);
        key
    }

    fn send_update(&self, update: DOMUpdate) {
        // The receiver outlives the parse; a send failure just means the
        // mirror went away, in which case there is nothing left to update.
        let _ = self.tx.send(update);
    }

    /// Create an element node with its initial attributes.
    pub fn create_element(&self, tag: String, attrs: Vec<(String, String)>) -> NodeKey {
        let node = self.mint_key();
        self.send_update(DOMUpdate::CreateElement { node, tag, attrs });
        node
    }

    /// Create a text node.
    pub fn create_text(&self, text: String) -> NodeKey {
        let node = self.mint_key();
        self.send_update(DOMUpdate::CreateText { node, text });
        node
    }

    /// Create a comment node.
    pub fn create_comment(&self, text: String) -> NodeKey {
        let node = self.mint_key();
        self.send_update(DOMUpdate::CreateComment { node, text });
        node
    }

    /// Establish a parent-child relationship.
    pub fn append_child(&self, parent: NodeKey, child: NodeKey) {
        self.send_update(DOMUpdate::AppendChild { parent, child });
    }

    /// Signal that the document is fully built.
    pub fn finish(&self) {
        self.send_update(DOMUpdate::EndOfDocument);
    }
}
