//! Errors raised while classifying and layering a document.
//!
//! Stacking is a pure function of its style input, so none of these are
//! retryable: each one aborts the conversion from the node where it was
//! detected outward.

use strata_dom::NodeId;
use thiserror::Error;

use crate::stacking::LayerName;
use crate::style::{Float, Position};

/// A fatal stacking error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackingError {
    /// Style resolution is unavailable because the node's document has no
    /// view.
    #[error("no rendering context for node {node:?}: the document has no view")]
    NoRenderingContext {
        /// The node whose style was requested.
        node: NodeId,
    },

    /// Style was requested for a node that is not an element.
    #[error("node {node:?} is not an element and has no computed style")]
    NotAnElement {
        /// The offending node.
        node: NodeId,
    },

    /// No classifier rule matched; the rule set has a gap.
    #[error(
        "cannot assign node {node:?} to a stacking layer \
         (position: {position}, float: {float}, display: {display})"
    )]
    UnclassifiableNode {
        /// The element that could not be placed.
        node: NodeId,
        /// Its computed `position`.
        position: Position,
        /// Its computed `float`.
        float: Float,
        /// Its computed `display`, as written in CSS.
        display: String,
    },

    /// An entry reached a z-index-sorted layer without an integer sort key.
    #[error("entry {index} of layer '{layer}' has no z-index sort key")]
    MissingSortKey {
        /// The layer being sorted.
        layer: LayerName,
        /// Position of the entry within the layer before sorting.
        index: usize,
    },

    /// The document has no element to root the stacking tree at.
    #[error("the document has no root element")]
    NoDocumentElement,
}
