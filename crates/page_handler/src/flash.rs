//! Auto-dismiss for success-style flash messages.
//!
//! On document ready the page is scanned once for `result-message` and
//! `result-box` elements. Each one whose text reads as a success is faded
//! out after a fixed delay and then removed from the tree; everything else
//! is left untouched. The scan never re-runs, so elements inserted later
//! are not considered.
//!
//! The success predicate is substring containment against English wording
//! and a checkmark symbol. A differently worded or localized message will
//! silently stay on screen; that matches the behavior this was ported from.

use crate::state::HtmlPage;
use dom::{Document, NodeKey, SharedDocument};
use log::{info, warn};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delay between the scan and the start of the fade.
pub const DISMISS_DELAY: Duration = Duration::from_millis(5000);
/// Duration of the opacity fade; removal happens once it has elapsed.
pub const FADE_DURATION: Duration = Duration::from_millis(500);

const FADE_TRANSITION: &str = "opacity 0.5s";
const FLASH_CLASSES: [&str; 2] = ["result-message", "result-box"];
const SUCCESS_MARKERS: [&str; 2] = ["successful", "\u{2713}"];

/// True if the text reads as a success message. Case-sensitive substring
/// containment, not whole-word matching.
pub fn is_success_text(text: &str) -> bool {
    SUCCESS_MARKERS.iter().any(|marker| text.contains(marker))
}

/// All flash-message elements currently in the document, in document order.
/// The result is fixed at call time.
pub fn collect_flash_messages(document: &Document) -> Vec<NodeKey> {
    document.elements_with_any_class(&FLASH_CLASSES)
}

/// Register auto-dismiss as the page's document-ready handler.
pub fn install(page: &mut HtmlPage) {
    page.on_document_ready(|document| {
        // Detached, like the timer callbacks this mirrors.
        drop(auto_dismiss(document));
    });
}

/// Scan the document and schedule a two-stage dismissal for every flash
/// message whose text qualifies: after [`DISMISS_DELAY`] the element is
/// faded to opacity 0, and [`FADE_DURATION`] later it is removed from the
/// tree. Returns the spawned task handles so callers can await completion.
pub fn auto_dismiss(document: SharedDocument) -> Vec<JoinHandle<()>> {
    let candidates: Vec<NodeKey> = match document.lock() {
        Ok(doc) => collect_flash_messages(&doc)
            .into_iter()
            .filter(|&node| is_success_text(&doc.text_content(node)))
            .collect(),
        Err(_) => {
            warn!("flash: document lock poisoned, skipping scan");
            return Vec::new();
        }
    };
    info!(
        "flash: auto-dismiss armed, {} message(s) scheduled",
        candidates.len()
    );

    candidates
        .into_iter()
        .map(|node| {
            let document = document.clone();
            tokio::spawn(dismiss_after_delay(document, node))
        })
        .collect()
}

/// The per-element dismissal: fade, then remove. Both stages tolerate the
/// element having been removed externally in the meantime.
async fn dismiss_after_delay(document: SharedDocument, node: NodeKey) {
    sleep(DISMISS_DELAY).await;
    if let Ok(mut doc) = document.lock() {
        doc.set_style_property(node, "opacity", "0");
        doc.set_style_property(node, "transition", FADE_TRANSITION);
    }
    sleep(FADE_DURATION).await;
    if let Ok(mut doc) = document.lock() {
        doc.remove_subtree(node);
    }
}
