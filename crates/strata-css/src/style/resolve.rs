//! Style resolution.
//!
//! [CSSOM § 9 `getComputedStyle()`](https://drafts.csswg.org/cssom/#dom-window-getcomputedstyle)
//!
//! The stacking core never reads a property map itself. It asks a
//! [`StyleResolver`] for a node's [`ComputedStyle`], so the same classifier
//! runs against a snapshot, a test fixture, or a live engine.

use strata_dom::{DomTree, NodeId};

use super::computed::ComputedStyle;
use crate::StackingError;

/// Source of computed styles for the nodes of one document.
pub trait StyleResolver {
    /// Resolve the computed style of `node`.
    ///
    /// # Errors
    ///
    /// - [`StackingError::NoRenderingContext`] when the document has no view
    /// - [`StackingError::NotAnElement`] when `node` is not an element
    fn resolve(&self, node: NodeId) -> Result<ComputedStyle, StackingError>;
}

/// Resolves styles straight from the computed values stored in a
/// [`DomTree`].
///
/// Nothing is cached: every call parses the node's property map again, so a
/// resolver never hands out a stale record.
#[derive(Debug, Clone, Copy)]
pub struct DocumentStyles<'a> {
    tree: &'a DomTree,
}

impl<'a> DocumentStyles<'a> {
    /// Resolve styles for the nodes of `tree`.
    #[must_use]
    pub const fn new(tree: &'a DomTree) -> Self {
        Self { tree }
    }

    /// The tree being resolved against.
    #[must_use]
    pub const fn tree(&self) -> &'a DomTree {
        self.tree
    }
}

impl StyleResolver for DocumentStyles<'_> {
    fn resolve(&self, node: NodeId) -> Result<ComputedStyle, StackingError> {
        // "If elt's node document has no associated Window, ..." there is no
        // computed style to return.
        if self.tree.view().is_none() {
            return Err(StackingError::NoRenderingContext { node });
        }
        let element = self
            .tree
            .as_element(node)
            .ok_or(StackingError::NotAnElement { node })?;
        Ok(ComputedStyle::from_properties(&element.style))
    }
}
