//! fOS HTML Parser
//!
//! HTML5 parser built on html5ever, producing arena documents, plus the
//! serializer used for outer/inner markup.

mod parser;
mod serializer;

pub use fos_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, inner_html, outer_html};

/// Parse an HTML string into a document
pub fn parse(html: &str) -> ParseOutcome {
    HtmlParser::new().parse(html)
}

/// Result of parsing HTML
///
/// Parsing never fails outright: html5ever recovers from malformed input,
/// so the errors are diagnostics about a document that was still built.
#[derive(Debug)]
pub struct ParseOutcome {
    pub document: Document,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    /// Whether the parser had to recover from anything
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed markup: {0}")]
    Malformed(String),
}
