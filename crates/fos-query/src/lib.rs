//! fOS Query
//!
//! Chainable query/mutation API over arena documents. Every operation
//! takes and returns a [`NodeSet`]: an ordered, identity-deduplicated view
//! of nodes that may span several documents.
//!
//! ```
//! use fos_query::NodeSet;
//!
//! let list = NodeSet::from_html("<ul><li>0</li></ul>").unwrap();
//! list.append("<li>1</li><li>2</li>").unwrap();
//! assert_eq!(list.find("li").unwrap().len(), 3);
//! assert_eq!(list.html(), "<ul><li>0</li><li>1</li><li>2</li></ul>");
//! ```

mod attributes;
mod bootstrap;
mod class_list;
mod content;
mod error;
mod facade_cache;
mod mutation;
mod node_ref;
mod node_set;
mod query;
mod style_map;
mod url_resolver;

pub use bootstrap::LoadOptions;
pub use class_list::ClassList;
pub use content::Content;
pub use error::{QueryError, QueryResult};
pub use node_ref::{NodeKey, NodeRef};
pub use node_set::{Iter, NodeSet};
pub use style_map::StyleMap;
pub use url_resolver::UrlResolver;

pub use fos_dom::{Document, NodeId, SharedDocument};
