//! Inline `style` attribute facade
//!
//! Parsed from `;`-separated `name:value` pairs. A pair that does not split
//! into exactly two parts on `:`, or whose trimmed name or value is empty,
//! is dropped on load. Serialization writes `name:value;` per property, in
//! order, and removes the attribute when no property is left.

use crate::node_ref::NodeRef;
use crate::node_set::NodeSet;

/// Parsed view of one node's `style` attribute
#[derive(Debug, Clone)]
pub struct StyleMap {
    node: NodeRef,
    styles: Vec<(String, String)>,
}

impl StyleMap {
    /// Parse the current attribute. Non-elements load as empty.
    pub fn load(node: NodeRef) -> Self {
        let styles = node.with_tree(|tree| {
            tree.get_attribute(node.id(), "style")
                .map(parse_declarations)
                .unwrap_or_default()
        });
        Self { node, styles }
    }

    pub fn all(&self) -> &[(String, String)] {
        &self.styles
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.styles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a property; an empty value removes it
    pub fn set(&mut self, name: &str, value: &str) {
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() {
            return;
        }
        if value.is_empty() {
            self.remove(name);
            return;
        }
        match self.styles.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.styles.push((name.to_string(), value.to_string())),
        }
        self.store();
    }

    pub fn remove(&mut self, name: &str) {
        let name = name.trim();
        self.styles.retain(|(n, _)| n != name);
        self.store();
    }

    fn store(&self) {
        let value: String = self
            .styles
            .iter()
            .map(|(name, value)| format!("{}:{};", name, value))
            .collect();
        let id = self.node.id();
        self.node.with_tree_mut(|tree| {
            let Some(element) = tree.get_mut(id).and_then(|node| node.as_element_mut()) else {
                return;
            };
            if value.is_empty() {
                element.remove_attr("style");
            } else {
                element.set_attr("style", value);
            }
        });
    }
}

fn parse_declarations(raw: &str) -> Vec<(String, String)> {
    let mut styles: Vec<(String, String)> = Vec::new();
    for declaration in raw.split(';') {
        let parts: Vec<&str> = declaration.split(':').collect();
        let [name, value] = parts.as_slice() else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        // Later declarations win, keeping the first position
        match styles.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => styles.push((name.to_string(), value.to_string())),
        }
    }
    styles
}

impl NodeSet {
    /// Set a style property on every node
    pub fn set_style(&self, name: &str, value: &str) -> &Self {
        for node in &self.nodes {
            self.facades.with_style_map(node, |styles| styles.set(name, value));
        }
        self
    }

    /// Remove a style property from every node
    pub fn remove_style(&self, name: &str) -> &Self {
        for node in &self.nodes {
            self.facades.with_style_map(node, |styles| styles.remove(name));
        }
        self
    }

    /// Value of a style property on the first node
    pub fn style(&self, name: &str) -> Option<String> {
        let node = self.first_node()?;
        self.facades
            .with_style_map(node, |styles| styles.get(name).map(str::to_string))
    }

    /// All style properties of the first node
    pub fn styles(&self) -> Vec<(String, String)> {
        self.first_node()
            .map(|node| self.facades.with_style_map(node, |styles| styles.all().to_vec()))
            .unwrap_or_default()
    }

    /// Whether any node sets the style property
    pub fn has_style(&self, name: &str) -> bool {
        self.nodes
            .iter()
            .any(|node| self.facades.with_style_map(node, |styles| styles.has(name)))
    }
}
