//! Compiled selector queries
//!
//! A [`SelectorQuery`] is evaluated against a context node: an element is
//! selected when some alternative matches it and the leftmost compound of
//! that alternative lands on the context node or one of its descendants.
//! Matching walks right to left and backtracks over descendant and
//! sibling combinators.

use fos_dom::{DomTree, NodeId};

use crate::selectors::{CompoundSelector, ElementContext};

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Compounds joined by combinators, stored left to right.
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// A compiled selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorQuery {
    text: String,
    alternatives: Vec<ComplexSelector>,
}

impl SelectorQuery {
    pub(crate) fn new(text: &str, alternatives: Vec<ComplexSelector>) -> Self {
        Self {
            text: text.to_string(),
            alternatives,
        }
    }

    /// Source text this query was compiled from
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alternatives(&self) -> &[ComplexSelector] {
        &self.alternatives
    }

    /// All matching elements in document order.
    ///
    /// The whole tree the context belongs to is scanned, since sibling
    /// combinators can reach past the context's own subtree. The context
    /// itself is part of the result when it matches.
    pub fn execute(&self, tree: &DomTree, context: NodeId) -> Vec<NodeId> {
        if tree.get(context).is_none() {
            return Vec::new();
        }
        let top = tree.top_ancestor(context);

        let matches: Vec<NodeId> = std::iter::once(top)
            .chain(tree.descendants(top).map(|(id, _)| id))
            .filter(|&id| self.matches(tree, id, context))
            .collect();

        tracing::trace!(
            selector = %self.text,
            %context,
            count = matches.len(),
            "selector executed"
        );
        matches
    }

    /// Whether `node` is selected relative to `context`
    pub fn matches(&self, tree: &DomTree, node: NodeId, context: NodeId) -> bool {
        self.alternatives.iter().any(|complex| {
            complex
                .compounds
                .len()
                .checked_sub(1)
                .is_some_and(|last| match_from(tree, complex, last, node, context))
        })
    }
}

/// Match `compounds[index]` against `node`, then the rest leftwards
fn match_from(
    tree: &DomTree,
    complex: &ComplexSelector,
    index: usize,
    node: NodeId,
    context: NodeId,
) -> bool {
    let Some(element) = ElementContext::new(tree, node) else {
        return false;
    };
    if !complex.compounds[index].matches(&element) {
        return false;
    }
    if index == 0 {
        return tree.contains(context, node);
    }

    let next = index - 1;
    match complex.combinators[next] {
        Combinator::Descendant => {
            let mut current = tree.parent(node);
            while let Some(ancestor) = current {
                if match_from(tree, complex, next, ancestor, context) {
                    return true;
                }
                current = tree.parent(ancestor);
            }
            false
        }
        Combinator::Child => tree
            .parent(node)
            .is_some_and(|parent| match_from(tree, complex, next, parent, context)),
        Combinator::NextSibling => previous_element_sibling(tree, node)
            .is_some_and(|sibling| match_from(tree, complex, next, sibling, context)),
        Combinator::SubsequentSibling => {
            let mut current = previous_element_sibling(tree, node);
            while let Some(sibling) = current {
                if match_from(tree, complex, next, sibling, context) {
                    return true;
                }
                current = previous_element_sibling(tree, sibling);
            }
            false
        }
    }
}

fn previous_element_sibling(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.get(node)?.prev_sibling;
    while current.is_valid() {
        let sibling = tree.get(current)?;
        if sibling.is_element() {
            return Some(current);
        }
        current = sibling.prev_sibling;
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::compile;
    use fos_dom::{DomTree, NodeId, NodeOperations};

    /// root > div#outer > (p.a, p.b > span, p.c)
    fn sample() -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "id", "outer").unwrap();
        tree.append_child(tree.root(), div).unwrap();

        let mut ps = Vec::new();
        for class in ["a", "b", "c"] {
            let p = tree.create_element("p");
            tree.set_attribute(p, "class", class).unwrap();
            tree.append_child(div, p).unwrap();
            ps.push(p);
        }
        let span = tree.create_element("span");
        tree.append_child(ps[1], span).unwrap();
        ps.push(span);
        (tree, div, ps)
    }

    #[test]
    fn test_execute_document_order() {
        let (tree, _, ps) = sample();
        let query = compile("span, p").unwrap();
        // span sits inside p.b, ahead of p.c
        assert_eq!(query.execute(&tree, tree.root()), vec![ps[0], ps[1], ps[3], ps[2]]);
    }

    #[test]
    fn test_context_included_when_matching() {
        let (tree, div, _) = sample();
        let query = compile("div").unwrap();
        assert_eq!(query.execute(&tree, div), vec![div]);
    }

    #[test]
    fn test_leftmost_anchored_in_context() {
        let (tree, _, ps) = sample();
        // Context p.b: the span is inside, but "div span" needs the div inside p.b
        assert!(compile("div span").unwrap().execute(&tree, ps[1]).is_empty());
        assert_eq!(compile("p span").unwrap().execute(&tree, ps[1]), vec![ps[3]]);
    }

    #[test]
    fn test_sibling_reaches_outside_context() {
        let (tree, _, ps) = sample();
        let query = compile(".a + p").unwrap();
        assert_eq!(query.execute(&tree, ps[0]), vec![ps[1]]);
        let query = compile(".a ~ p").unwrap();
        assert_eq!(query.execute(&tree, ps[0]), vec![ps[1], ps[2]]);
    }

    #[test]
    fn test_child_combinator() {
        let (tree, div, ps) = sample();
        let query = compile("#outer > *").unwrap();
        assert_eq!(query.execute(&tree, div), ps[..3].to_vec());
    }

    #[test]
    fn test_descendant_backtracking() {
        let (tree, _, ps) = sample();
        let query = compile("div p > span").unwrap();
        assert_eq!(query.execute(&tree, tree.root()), vec![ps[3]]);
        assert!(compile("p.a span").unwrap().execute(&tree, tree.root()).is_empty());
    }
}
