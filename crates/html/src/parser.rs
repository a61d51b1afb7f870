//! HTML5 parsing using html5ever.

use crate::builder::DocumentBuilder;
use anyhow::{Context as _, Result};
use dom::{Document, NodeKey};
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use log::debug;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use std::sync::mpsc;

/// Parse a complete HTML string into a [`Document`].
///
/// Parse errors in the markup are tolerated: html5ever recovers and the
/// resulting tree is mirrored as-is. Doctypes and processing instructions
/// are dropped; comments are kept as comment nodes.
///
/// # Errors
/// Returns an error if reading the input fails or an update cannot be
/// applied to the mirror.
pub fn parse_document_str(html: &str) -> Result<Document> {
    let (tx, rx) = mpsc::channel();
    let builder = DocumentBuilder::new(tx);

    let rc_dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .context("failed to read HTML input")?;

    convert_node(&builder, &rc_dom.document, builder.document());
    builder.finish();
    // Close the channel so the drain below terminates.
    drop(builder);

    let mut document = Document::new();
    for update in rx {
        document.apply_update(update)?;
    }
    debug!("html: built document with {} nodes", document.node_count());
    Ok(document)
}

/// Convert an html5ever node into builder updates under the given parent.
fn convert_node(builder: &DocumentBuilder, rc_node: &Handle, parent: NodeKey) {
    match &rc_node.data {
        RcNodeData::Document => {
            for child in rc_node.children.borrow().iter() {
                convert_node(builder, child, parent);
            }
        }

        // Doctypes and processing instructions carry nothing the mirror needs.
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}

        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            let node = builder.create_text(text);
            builder.append_child(parent, node);
        }

        RcNodeData::Comment { contents } => {
            let node = builder.create_comment(contents.to_string());
            builder.append_child(parent, node);
        }

        RcNodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let node = builder.create_element(tag, attrs);
            builder.append_child(parent, node);

            for child in rc_node.children.borrow().iter() {
                convert_node(builder, child, node);
            }
        }
    }
}
