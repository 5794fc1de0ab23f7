//! Scalar readers and attribute writers
//!
//! Readers look at the first node only and return the zero value for an
//! empty set. Writers apply to every element of the set.

use fos_html::{inner_html, outer_html};

use crate::facade_cache::FacadeKind;
use crate::node_ref::NodeKey;
use crate::node_set::NodeSet;

impl NodeSet {
    /// DOM node name of the first node (`#text`, `#document`, tag name ...)
    pub fn name(&self) -> Option<String> {
        let node = self.first_node()?;
        node.with_tree(|tree| tree.node_name(node.id()).map(str::to_string))
    }

    /// Outer markup of the first node
    pub fn html(&self) -> String {
        self.first_node()
            .map(|node| node.with_tree(|tree| outer_html(tree, node.id()).trim().to_string()))
            .unwrap_or_default()
    }

    /// Markup of the first node's children
    pub fn inner_html(&self) -> String {
        self.first_node()
            .map(|node| node.with_tree(|tree| inner_html(tree, node.id()).trim().to_string()))
            .unwrap_or_default()
    }

    /// Attributes of the first node in source order
    pub fn attributes(&self) -> Vec<(String, String)> {
        let Some(node) = self.first_node() else {
            return Vec::new();
        };
        node.with_tree(|tree| {
            tree.get(node.id())
                .and_then(|n| n.as_element())
                .map(|element| {
                    element
                        .attrs
                        .iter()
                        .map(|attr| (attr.name.clone(), attr.value.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        let node = self.first_node()?;
        node.with_tree(|tree| tree.get_attribute(node.id(), name).map(str::to_string))
    }

    /// Whether any node carries the attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.nodes
            .iter()
            .any(|node| node.with_tree(|tree| tree.has_attribute(node.id(), name)))
    }

    /// Set an attribute on every element
    pub fn set_attribute(&self, name: &str, value: impl ToString) -> &Self {
        let value = value.to_string();
        for node in &self.nodes {
            let written = node.with_tree_mut(|tree| {
                let Some(element) = tree.get_mut(node.id()).and_then(|n| n.as_element_mut()) else {
                    return false;
                };
                element.set_attr(name, value.as_str());
                true
            });
            if written {
                self.evict(node.key(), name);
            }
        }
        self
    }

    /// Remove an attribute from every element
    pub fn remove_attribute(&self, name: &str) -> &Self {
        for node in &self.nodes {
            let removed = node.with_tree_mut(|tree| {
                tree.get_mut(node.id())
                    .and_then(|n| n.as_element_mut())
                    .is_some_and(|element| element.remove_attr(name))
            });
            if removed {
                self.evict(node.key(), name);
            }
        }
        self
    }

    fn evict(&self, key: NodeKey, attribute: &str) {
        if let Some(kind) = FacadeKind::from_attribute(attribute) {
            self.facades.invalidate(key, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readers_on_empty_set() {
        let empty = NodeSet::new();
        assert_eq!(empty.name(), None);
        assert_eq!(empty.html(), "");
        assert_eq!(empty.inner_html(), "");
        assert!(empty.attributes().is_empty());
        assert_eq!(empty.attribute("id"), None);
        assert!(!empty.has_attribute("id"));
    }

    #[test]
    fn test_attribute_round_trip() {
        let set = NodeSet::from_html(r#"<div id="a" data-x="1"></div><div></div>"#).unwrap();
        assert_eq!(
            set.attributes(),
            vec![("id".to_string(), "a".to_string()), ("data-x".to_string(), "1".to_string())]
        );
        set.set_attribute("title", 42);
        assert_eq!(set.last().attribute("title").as_deref(), Some("42"));

        set.remove_attribute("id");
        assert!(!set.has_attribute("id"));
        assert!(set.has_attribute("title"));
    }

    #[test]
    fn test_raw_write_evicts_facades() {
        let set = NodeSet::from_html(r#"<p class="a" style="height:1px"></p>"#).unwrap();
        assert_eq!(set.classes(), ["a"]);
        assert_eq!(set.style("height").as_deref(), Some("1px"));

        set.set_attribute("class", "b c");
        set.set_attribute("style", "display:none;");
        assert_eq!(set.classes(), ["b", "c"]);
        assert_eq!(set.style("height"), None);
        assert_eq!(set.style("display").as_deref(), Some("none"));

        set.remove_attribute("class");
        assert!(set.classes().is_empty());
    }

    #[test]
    fn test_text_nodes_are_skipped() {
        let text = NodeSet::from_html("plain").unwrap();
        assert_eq!(text.name().as_deref(), Some("#text"));
        text.set_attribute("id", "x");
        assert!(!text.has_attribute("id"));
        assert_eq!(text.html(), "plain");
    }
}
