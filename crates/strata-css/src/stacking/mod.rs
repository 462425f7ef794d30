//! CSS Stacking Contexts and Painting Order.
//!
//! [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
//!
//! "An element in CSS 2 may have a stack level, which describes its position
//! within a set of elements sharing the same stacking context."
//!
//! [CSS 2.1 Appendix E: Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)

mod builder;
mod classify;
mod layers;
mod order;
mod predicate;

pub use builder::{NodePainter, StackingTreeBuilder, build_stacking_tree};
pub use classify::{Placement, classify, is_in_flow, is_inline, is_positioned};
pub use layers::{
    EntryContent, Layer, LayerEntry, LayerName, LayerSet, PendingLayers, StackingContext,
};
pub use order::{PaintStep, paint_order};
pub use predicate::{
    StackingContextReason, establishes_stacking_context, node_establishes_stacking_context,
    stacking_context_reason,
};
