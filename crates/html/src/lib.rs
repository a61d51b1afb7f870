//! HTML parsing into the document mirror.

pub mod builder;
pub mod parser;

pub use builder::DocumentBuilder;
pub use parser::parse_document_str;
