//! Page state and the one-shot document-ready dispatch.

use anyhow::Result;
use dom::SharedDocument;
use log::info;

/// Callback invoked once when the document-ready signal is dispatched.
pub type ReadyCallback = Box<dyn FnOnce(SharedDocument) + Send>;

/// A loaded page: the shared document plus the ready-signal bookkeeping.
pub struct HtmlPage {
    document: SharedDocument,
    ready_callbacks: Vec<ReadyCallback>,
    document_ready_fired: bool,
}

impl HtmlPage {
    /// Parse markup into a page. Loading does not fire the ready signal;
    /// call [`HtmlPage::dispatch_document_ready`] once the host is ready.
    ///
    /// # Errors
    /// Returns an error if parsing the markup fails.
    pub fn load(markup: &str) -> Result<Self> {
        let document = html::parse_document_str(markup)?.into_shared();
        Ok(Self {
            document,
            ready_callbacks: Vec::new(),
            document_ready_fired: false,
        })
    }

    /// A clone of the shared document handle.
    pub fn document(&self) -> SharedDocument {
        self.document.clone()
    }

    /// True once the parser has signalled the end of the document.
    pub fn parsing_finished(&self) -> bool {
        self.document
            .lock()
            .is_ok_and(|document| document.is_complete())
    }

    /// Register a callback for the document-ready signal. Callbacks run in
    /// registration order; one registered after the signal has already
    /// fired never runs.
    pub fn on_document_ready<F>(&mut self, callback: F)
    where
        F: FnOnce(SharedDocument) + Send + 'static,
    {
        if self.document_ready_fired {
            return;
        }
        self.ready_callbacks.push(Box::new(callback));
    }

    /// Dispatch the document-ready signal. The first call runs all
    /// registered callbacks synchronously; subsequent calls are no-ops.
    pub fn dispatch_document_ready(&mut self) {
        if self.document_ready_fired {
            return;
        }
        self.document_ready_fired = true;
        info!("HtmlPage: dispatching document ready");
        for callback in self.ready_callbacks.drain(..) {
            callback(self.document.clone());
        }
    }
}
