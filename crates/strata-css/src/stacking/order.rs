//! Stack-level ordering and paint-order traversal.
//!
//! [§ 9.9.1](https://www.w3.org/TR/CSS2/visuren.html#z-index)
//!
//! "Boxes with the same stack level in a stacking context are stacked
//! back-to-front according to document tree order."

use strata_dom::NodeId;

use super::layers::{EntryContent, LayerEntry, LayerName, StackingContext};
use crate::StackingError;

/// Stable-sort the entries of a z-index layer by ascending stack level.
///
/// Entries arrive in document order, and the sort is stable, so equal stack
/// levels keep that order.
pub(crate) fn sort_by_stack_level<P>(
    layer: LayerName,
    entries: &mut [LayerEntry<P>],
) -> Result<(), StackingError> {
    if let Some(index) = entries.iter().position(|entry| entry.sort_key.is_none()) {
        return Err(StackingError::MissingSortKey { layer, index });
    }
    entries.sort_by_key(|entry| entry.sort_key);
    Ok(())
}

/// One painted node in a flattened paint order.
#[derive(Debug, Clone)]
pub struct PaintStep<'a, P> {
    /// The node being painted.
    pub node: NodeId,
    /// The element owning the stacking context the node is painted in.
    pub context: NodeId,
    /// Which layer of that context the node sits in.
    pub layer: LayerName,
    /// Nesting depth of the context; the root context is 0.
    pub depth: usize,
    /// The node's primitives.
    pub primitives: &'a [P],
}

/// [§ Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// Flatten a finalized stacking tree into the order nodes are painted,
/// back to front. A nested context contributes its own steps at the point
/// where its entry sits in the parent.
#[must_use]
pub fn paint_order<P>(root: &StackingContext<P>) -> Vec<PaintStep<'_, P>> {
    let mut steps = Vec::new();
    push_steps(root, 0, &mut steps);
    steps
}

fn push_steps<'a, P>(
    context: &'a StackingContext<P>,
    depth: usize,
    steps: &mut Vec<PaintStep<'a, P>>,
) {
    for layer in context.layers.layers() {
        for entry in layer.entries() {
            match &entry.content {
                EntryContent::Paint { primitives } => steps.push(PaintStep {
                    node: entry.node,
                    context: context.owner,
                    layer: layer.name(),
                    depth,
                    primitives,
                }),
                EntryContent::Context { context: nested } => push_steps(nested, depth + 1, steps),
            }
        }
    }
}
