//! Content accepted by constructors and mutations

use crate::error::{QueryError, QueryResult};
use crate::node_ref::NodeRef;
use crate::node_set::NodeSet;

/// Anything that can be turned into a node set
#[derive(Debug, Clone, Default)]
pub enum Content {
    /// No content
    #[default]
    Empty,
    /// A single node
    Node(NodeRef),
    /// A list of nodes, deduplicated on conversion
    Nodes(Vec<NodeRef>),
    /// Another node set
    Set(NodeSet),
    /// Markup to parse
    Markup(String),
}

impl Content {
    /// Resolve into a node set.
    ///
    /// Node references must still name nodes of their documents; a dangling
    /// reference is rejected as [`QueryError::InvalidInput`].
    pub fn into_node_set(self) -> QueryResult<NodeSet> {
        match self {
            Content::Empty => Ok(NodeSet::new()),
            Content::Node(node) => {
                check_exists(&node)?;
                Ok(NodeSet::from_nodes([node]))
            }
            Content::Nodes(nodes) => {
                nodes.iter().try_for_each(check_exists)?;
                Ok(NodeSet::from_nodes(nodes))
            }
            Content::Set(set) => Ok(NodeSet::from_nodes(set.nodes)),
            Content::Markup(markup) => NodeSet::from_html(&markup),
        }
    }
}

fn check_exists(node: &NodeRef) -> QueryResult<()> {
    if node.exists() {
        Ok(())
    } else {
        Err(QueryError::InvalidInput {
            received: format!("dangling node reference {}", node.id()),
        })
    }
}

impl NodeSet {
    /// Build a node set from any supported content
    pub fn create(content: impl Into<Content>) -> QueryResult<NodeSet> {
        content.into().into_node_set()
    }
}

impl From<NodeRef> for Content {
    fn from(node: NodeRef) -> Self {
        Content::Node(node)
    }
}

impl From<Vec<NodeRef>> for Content {
    fn from(nodes: Vec<NodeRef>) -> Self {
        Content::Nodes(nodes)
    }
}

impl From<&[NodeRef]> for Content {
    fn from(nodes: &[NodeRef]) -> Self {
        Content::Nodes(nodes.to_vec())
    }
}

impl From<NodeSet> for Content {
    fn from(set: NodeSet) -> Self {
        Content::Set(set)
    }
}

impl From<&NodeSet> for Content {
    fn from(set: &NodeSet) -> Self {
        Content::Set(set.clone())
    }
}

impl From<&str> for Content {
    fn from(markup: &str) -> Self {
        Content::Markup(markup.to_string())
    }
}

impl From<String> for Content {
    fn from(markup: String) -> Self {
        Content::Markup(markup)
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(content: Option<T>) -> Self {
        content.map_or(Content::Empty, Into::into)
    }
}
