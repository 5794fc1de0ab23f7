//! fOS CSS Selectors
//!
//! Compiles selector text into a [`SelectorQuery`] and runs it against an
//! arena tree.

mod parser;
mod query;
pub mod selectors;

pub use parser::SelectorParser;
pub use query::{Combinator, ComplexSelector, SelectorQuery};

/// Compile a selector list
pub fn compile(selector: &str) -> Result<SelectorQuery, SelectorError> {
    let query = SelectorParser::new(selector).parse()?;
    tracing::trace!(selector, alternatives = query.alternatives().len(), "compiled selector");
    Ok(query)
}

/// Selector compilation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Invalid selector \"{selector}\": {message}")]
    Invalid { selector: String, message: String },
}
