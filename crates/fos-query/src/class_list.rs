//! `class` attribute facade
//!
//! Tokens are split on whitespace, deduplicated and kept in first-seen
//! order. Every mutation writes the attribute back immediately; an empty
//! list removes the attribute instead of writing an empty string.

use crate::node_ref::NodeRef;
use crate::node_set::NodeSet;

/// Parsed view of one node's `class` attribute
#[derive(Debug, Clone)]
pub struct ClassList {
    node: NodeRef,
    classes: Vec<String>,
}

impl ClassList {
    /// Parse the current attribute. Non-elements load as empty.
    pub fn load(node: NodeRef) -> Self {
        let raw = node.with_tree(|tree| {
            tree.get_attribute(node.id(), "class")
                .map(str::to_string)
                .unwrap_or_default()
        });
        let mut classes = Vec::new();
        push_tokens(&mut classes, &raw);
        Self { node, classes }
    }

    pub fn all(&self) -> &[String] {
        &self.classes
    }

    /// True when every whitespace-separated token of `class` is present
    pub fn has(&self, class: &str) -> bool {
        let mut tokens = class.split_whitespace().peekable();
        tokens.peek().is_some() && tokens.all(|token| self.classes.iter().any(|c| c == token))
    }

    pub fn add(&mut self, class: &str) {
        push_tokens(&mut self.classes, class);
        self.store();
    }

    pub fn remove(&mut self, class: &str) {
        let tokens: Vec<&str> = class.split_whitespace().collect();
        self.classes.retain(|c| !tokens.contains(&c.as_str()));
        self.store();
    }

    fn store(&self) {
        let value = self.classes.join(" ");
        let id = self.node.id();
        self.node.with_tree_mut(|tree| {
            let Some(element) = tree.get_mut(id).and_then(|node| node.as_element_mut()) else {
                return;
            };
            if value.is_empty() {
                element.remove_attr("class");
            } else {
                element.set_attr("class", value);
            }
        });
    }
}

fn push_tokens(classes: &mut Vec<String>, input: &str) {
    for token in input.split_whitespace() {
        if !classes.iter().any(|c| c == token) {
            classes.push(token.to_string());
        }
    }
}

impl NodeSet {
    /// Add class tokens to every node
    pub fn add_class(&self, class: &str) -> &Self {
        for node in &self.nodes {
            self.facades.with_class_list(node, |list| list.add(class));
        }
        self
    }

    /// Remove class tokens from every node
    pub fn remove_class(&self, class: &str) -> &Self {
        for node in &self.nodes {
            self.facades.with_class_list(node, |list| list.remove(class));
        }
        self
    }

    /// Classes of the first node
    pub fn classes(&self) -> Vec<String> {
        self.first_node()
            .map(|node| self.facades.with_class_list(node, |list| list.all().to_vec()))
            .unwrap_or_default()
    }

    /// Whether any node carries all of the given class tokens
    pub fn has_class(&self, class: &str) -> bool {
        self.nodes
            .iter()
            .any(|node| self.facades.with_class_list(node, |list| list.has(class)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{Document, NodeId};

    fn element(class: Option<&str>) -> (NodeRef, NodeId) {
        let doc = Document::new("about:blank").into_shared();
        let body = doc.borrow().body().unwrap();
        if let Some(class) = class {
            doc.borrow_mut()
                .tree_mut()
                .set_attribute(body, "class", class)
                .unwrap();
        }
        (NodeRef::new(&doc, body), body)
    }

    fn raw(node: &NodeRef) -> Option<String> {
        node.with_tree(|tree| tree.get_attribute(node.id(), "class").map(str::to_string))
    }

    #[test]
    fn test_load_splits_and_dedups() {
        let (node, _) = element(Some("  a b\ta  c "));
        assert_eq!(ClassList::load(node).all(), ["a", "b", "c"]);
    }

    #[test]
    fn test_add_and_remove_write_through() {
        let (node, _) = element(None);
        let mut list = ClassList::load(node.clone());

        list.add("a");
        list.add("b a");
        assert_eq!(raw(&node).as_deref(), Some("a b"));

        list.remove("a");
        assert_eq!(raw(&node).as_deref(), Some("b"));

        list.remove("b");
        assert_eq!(raw(&node), None);
    }

    #[test]
    fn test_has_requires_every_token() {
        let (node, _) = element(Some("a b"));
        let list = ClassList::load(node);
        assert!(list.has("a"));
        assert!(list.has("b a"));
        assert!(!list.has("a c"));
        assert!(!list.has(""));
        assert!(!list.has("   "));
    }

    #[test]
    fn test_non_element_is_inert() {
        let doc = Document::new("about:blank").into_shared();
        let mut list = ClassList::load(NodeRef::document_node(&doc));
        list.add("a");
        assert_eq!(list.all(), ["a"]);
        assert!(!doc.borrow().tree().has_attribute(doc.borrow().root(), "class"));
    }
}
