//! HTML Serialization (innerHTML/outerHTML)
//!
//! Serializes arena nodes back to HTML strings.
//!
//! Key features:
//! - innerHTML/outerHTML serialization
//! - Proper HTML escaping
//! - Void element handling

use fos_dom::{DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone, Default)]
pub struct HtmlSerializer;

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "frame", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output);
        output
    }

    /// Serialize a node and its descendants
    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let mut pending = vec![Step::Node(node_id)];
        while let Some(step) = pending.pop() {
            let node_id = match step {
                Step::Node(id) => id,
                Step::EndTag(tag) => {
                    output.push_str("</");
                    output.push_str(tag);
                    output.push('>');
                    continue;
                }
            };
            let Some(node) = tree.get(node_id) else {
                continue;
            };

            match &node.data {
                NodeData::Document => {
                    push_children(tree, node_id, &mut pending);
                }
                NodeData::Element(elem) => {
                    let tag = elem.name.as_str();

                    // Start tag
                    output.push('<');
                    output.push_str(tag);

                    // Attributes
                    for attr in elem.attrs.iter() {
                        output.push(' ');
                        output.push_str(&attr.name);
                        if !attr.value.is_empty() {
                            output.push_str("=\"");
                            escape_attribute(&attr.value, output);
                            output.push('"');
                        }
                    }
                    output.push('>');

                    if VOID_ELEMENTS.contains(&tag) {
                        continue;
                    }

                    pending.push(Step::EndTag(tag));
                    if RAW_TEXT_ELEMENTS.contains(&tag) {
                        self.serialize_children_raw(tree, node_id, output);
                    } else {
                        push_children(tree, node_id, &mut pending);
                    }
                }
                NodeData::Text(text) => {
                    escape_text(&text.content, output);
                }
                NodeData::Comment(text) => {
                    output.push_str("<!--");
                    output.push_str(text);
                    output.push_str("-->");
                }
                NodeData::Doctype { name, .. } => {
                    output.push_str("<!DOCTYPE ");
                    output.push_str(name);
                    output.push('>');
                }
                NodeData::ProcessingInstruction { target, data } => {
                    output.push_str("<?");
                    output.push_str(target);
                    if !data.is_empty() {
                        output.push(' ');
                        output.push_str(data);
                    }
                    output.push('>');
                }
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (_child_id, child) in tree.children(parent_id) {
            if let Some(text) = child.as_text() {
                output.push_str(text);
            }
        }
    }
}

/// Pending serializer work
enum Step<'a> {
    Node(NodeId),
    EndTag(&'a str),
}

/// Queue children so the first one is popped first
fn push_children<'a>(tree: &'a DomTree, parent_id: NodeId, pending: &mut Vec<Step<'a>>) {
    let children = tree.child_ids(parent_id);
    pending.extend(children.into_iter().rev().map(Step::Node));
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Utility: Get innerHTML of a node
pub fn inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: Get outerHTML of a node
pub fn outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}
