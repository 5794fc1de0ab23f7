//! HTML5 Parser implementation
//!
//! Uses html5ever's build-in RcDom and converts to our DOM format.
//! This is simpler and more reliable than implementing TreeSink directly.

use fos_dom::{Document, DomTree, ElementData, Node, NodeData, NodeId, NodeOperations};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::{ParseError, ParseOutcome};

/// Elements whose whitespace-only text children are layout noise
const STRUCTURAL_PARENTS: &[&str] = &["html", "head"];

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> ParseOutcome {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> ParseOutcome {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        let root = document.root();
        self.convert(&dom.document, document.tree_mut(), root);

        let errors: Vec<ParseError> = dom
            .errors
            .borrow()
            .iter()
            .map(|message| ParseError::Malformed(message.to_string()))
            .collect();

        tracing::debug!(
            "Parsed {} nodes ({} recoverable errors)",
            document.tree().len(),
            errors.len()
        );
        ParseOutcome { document, errors }
    }

    /// Convert an RcDom tree to our DOM format
    fn convert(&self, document: &Handle, tree: &mut DomTree, root: NodeId) {
        // Children are pushed in reverse so siblings come off in source order
        let mut pending: Vec<(Handle, NodeId)> = vec![(document.clone(), root)];
        while let Some((handle, parent)) = pending.pop() {
            let Some(container) = self.convert_node(&handle, tree, parent) else {
                continue;
            };
            let mut children: Vec<Handle> = handle.children.borrow().clone();
            // <template> keeps its markup in a separate fragment
            if let RcNodeData::Element {
                template_contents, ..
            } = &handle.data
            {
                if let Some(contents) = template_contents.borrow().as_ref() {
                    children.extend(contents.children.borrow().iter().cloned());
                }
            }
            pending.extend(children.into_iter().rev().map(|child| (child, container)));
        }
    }

    /// Convert a single node, returning the node its children belong under
    fn convert_node(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: NodeId,
    ) -> Option<NodeId> {
        match &handle.data {
            RcNodeData::Document => Some(parent),
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => {
                let id = tree.create_doctype(name, public_id, system_id);
                attach(tree, parent, id);
                None
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !(text.trim().is_empty() && is_structural(tree, parent)) {
                    let id = tree.create_text(&text);
                    attach(tree, parent, id);
                }
                None
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                attach(tree, parent, id);
                None
            }
            RcNodeData::Element { name, attrs, .. } => {
                let mut elem = ElementData::new(&name.local);
                for attr in attrs.borrow().iter() {
                    elem.set_attr(&attr.name.local, attr.value.to_string());
                }

                let id = tree.push(Node::element(&name.local));
                if let Some(node) = tree.get_mut(id) {
                    node.data = NodeData::Element(elem);
                }
                attach(tree, parent, id);
                Some(id)
            }
            RcNodeData::ProcessingInstruction { target, contents } => {
                let id = tree.create_processing_instruction(target, contents);
                attach(tree, parent, id);
                None
            }
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_structural(tree: &DomTree, parent: NodeId) -> bool {
    match tree.get(parent) {
        Some(node) if node.is_document() => true,
        Some(node) => node
            .as_element()
            .is_some_and(|e| STRUCTURAL_PARENTS.contains(&e.name.as_str())),
        None => false,
    }
}

fn attach(tree: &mut DomTree, parent: NodeId, child: NodeId) {
    // html5ever only hands out well-formed trees; a rejected link would mean
    // a parent that cannot hold children, in which case the node is dropped.
    if let Err(err) = tree.append_child(parent, child) {
        tracing::trace!(%parent, %child, "dropping parsed node: {}", err);
    }
}
