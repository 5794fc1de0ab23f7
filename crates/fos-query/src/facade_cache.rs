//! Per-set facade cache
//!
//! Parsed class lists and style maps are kept per node identity for the
//! lifetime of the owning [`NodeSet`](crate::NodeSet). Raw writes of the
//! `class`/`style` attribute through the generic attribute path must call
//! [`FacadeCache::invalidate`] so the next read re-parses.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::class_list::ClassList;
use crate::node_ref::{NodeKey, NodeRef};
use crate::style_map::StyleMap;

/// Which derived view of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FacadeKind {
    Class,
    Style,
}

impl FacadeKind {
    /// The facade backed by attribute `name`, if any
    pub(crate) fn from_attribute(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("class") {
            Some(Self::Class)
        } else if name.eq_ignore_ascii_case("style") {
            Some(Self::Style)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FacadeCache {
    classes: RefCell<HashMap<NodeKey, ClassList>>,
    styles: RefCell<HashMap<NodeKey, StyleMap>>,
}

impl FacadeCache {
    /// Run `f` on the cached class list of `node`, loading it on first use
    pub(crate) fn with_class_list<R>(&self, node: &NodeRef, f: impl FnOnce(&mut ClassList) -> R) -> R {
        let mut classes = self.classes.borrow_mut();
        let list = classes
            .entry(node.key())
            .or_insert_with(|| ClassList::load(node.clone()));
        f(list)
    }

    /// Run `f` on the cached style map of `node`, loading it on first use
    pub(crate) fn with_style_map<R>(&self, node: &NodeRef, f: impl FnOnce(&mut StyleMap) -> R) -> R {
        let mut styles = self.styles.borrow_mut();
        let map = styles
            .entry(node.key())
            .or_insert_with(|| StyleMap::load(node.clone()));
        f(map)
    }

    pub(crate) fn invalidate(&self, key: NodeKey, kind: FacadeKind) {
        let evicted = match kind {
            FacadeKind::Class => self.classes.borrow_mut().remove(&key).is_some(),
            FacadeKind::Style => self.styles.borrow_mut().remove(&key).is_some(),
        };
        if evicted {
            tracing::trace!(node = %key.node, ?kind, "evicted cached facade");
        }
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self, key: NodeKey, kind: FacadeKind) -> bool {
        match kind {
            FacadeKind::Class => self.classes.borrow().contains_key(&key),
            FacadeKind::Style => self.styles.borrow().contains_key(&key),
        }
    }
}
