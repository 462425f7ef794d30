//! Computed style and stacking-context layering for the Strata converter.
//!
//! # Scope
//!
//! This crate implements:
//! - **Computed Style** - the fixed-shape record of resolved values that
//!   stacking depends on, parsed from a snapshot's `getComputedStyle` strings
//! - **Style Resolution** - the [`StyleResolver`] seam, with
//!   [`DocumentStyles`] reading straight from a [`strata_dom::DomTree`]
//! - **Stacking** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - the stacking-context predicate
//!   - the seven-layer classifier
//!   - the recursive layer-tree builder
//!   - stable z-index ordering of the negative and positive layers
//!
//! # Not Implemented
//!
//! - Cascade and inheritance (the snapshot already holds computed values)
//! - Layout (the snapshot already holds border boxes)
//! - Top-layer elements, `container-type`, and `backdrop-filter` triggers

mod error;
/// Stacking contexts and paint-order layering.
pub mod stacking;
/// Computed style values and style resolution.
pub mod style;

pub use error::StackingError;
pub use stacking::{
    EntryContent, Layer, LayerEntry, LayerName, LayerSet, NodePainter, PaintStep, PendingLayers,
    Placement, StackingContext, StackingContextReason, StackingTreeBuilder, build_stacking_tree,
    classify, establishes_stacking_context, is_in_flow, is_inline, is_positioned,
    node_establishes_stacking_context, paint_order, stacking_context_reason,
};
pub use style::{
    ComputedStyle, Containment, DisplayValue, DocumentStyles, Float, InnerDisplayType, Isolation,
    MixBlendMode, OuterDisplayType, OverflowScrolling, Position, StyleResolver, ZIndex,
};
