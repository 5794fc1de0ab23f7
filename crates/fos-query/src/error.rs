//! Query errors

use fos_css::SelectorError;
use fos_dom::DomError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced by the query API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Content that cannot be turned into nodes
    #[error("Expecting a node, node list, node set, markup or nothing, but got {received}")]
    InvalidInput { received: String },

    /// Selector did not compile
    #[error(transparent)]
    InvalidSelector(#[from] SelectorError),

    /// Base URL is not absolute
    #[error("Base URL must be an absolute URL (\"{base}\")")]
    InvalidBaseUrl { base: String },

    /// Tree mutation rejected
    #[error("DOM operation failed: {0}")]
    Dom(#[from] DomError),
}
