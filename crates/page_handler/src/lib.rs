//! Page lifecycle and page-level behaviors layered on the document mirror.

pub mod flash;
pub mod state;

pub use state::HtmlPage;
