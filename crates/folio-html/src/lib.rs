//! folio HTML Parser
//!
//! HTML5 parsing built on html5ever, producing a `folio_dom::Document`.

mod parser;

pub use parser::HtmlParser;
pub use folio_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// HTML parsing errors
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
