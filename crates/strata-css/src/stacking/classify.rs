//! The layer classifier.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Places one element of a stacking context into one of the seven layers,
//! or reports that it starts a nested context that must be built first.

use std::cmp::Ordering;

use strata_dom::NodeId;

use super::layers::LayerName;
use super::predicate::{StackingContextReason, stacking_context_reason};
use crate::StackingError;
use crate::style::{ComputedStyle, OuterDisplayType, Position};

/// Where an element goes in its enclosing stacking context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Paint the element in this layer, then keep classifying its
    /// descendants in the same context.
    Flat(LayerName),
    /// The element establishes a stacking context. Build it recursively and
    /// place the finished context in `layer` at `stack_level`.
    Nested {
        /// Layer 2, 6 or 7.
        layer: LayerName,
        /// Sort key within the layer.
        stack_level: i32,
        /// The rule that made the element a context.
        reason: StackingContextReason,
    },
}

impl Placement {
    /// The layer the element (or its context) lands in.
    #[must_use]
    pub const fn layer(self) -> LayerName {
        match self {
            Self::Flat(layer) | Self::Nested { layer, .. } => layer,
        }
    }

    /// Whether the element starts a nested context.
    #[must_use]
    pub const fn is_nested(self) -> bool {
        matches!(self, Self::Nested { .. })
    }
}

/// [§ 9.3.1](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "An element is said to be positioned if its 'position' property has a
/// value other than 'static'."
#[must_use]
pub fn is_positioned(style: &ComputedStyle) -> bool {
    style.is_positioned()
}

/// [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
///
/// "An element is called out of flow if it is floated, absolutely
/// positioned, or is the root element. An element is called in-flow if it
/// is not out-of-flow." The root element never reaches the classifier, so
/// only the first two conditions are checked.
#[must_use]
pub fn is_in_flow(style: &ComputedStyle) -> bool {
    !style.float.is_floating() && !matches!(style.position, Position::Absolute | Position::Fixed)
}

/// [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
///
/// Inline-level boxes, including inline blocks, inline tables, inline flex
/// and inline grid containers, and run-ins.
#[must_use]
pub fn is_inline(style: &ComputedStyle) -> bool {
    matches!(style.display.outer, OuterDisplayType::Inline | OuterDisplayType::RunIn)
}

/// Classify `node` into a layer of its enclosing stacking context.
///
/// `parent` is the style of the node's parent element; it decides whether a
/// `z-index` on a static box takes effect (flex and grid items).
///
/// STEP order, first match wins:
/// 1. Contexts with a negative `z-index` go to layer 2.
/// 2. Contexts with a positive `z-index` go to layer 7.
/// 3. Every other context goes to layer 6 at stack level 0.
/// 4. In-flow, block-level, non-positioned boxes go to layer 3.
/// 5. Non-positioned floats go to layer 4.
/// 6. In-flow, inline-level, non-positioned boxes go to layer 5.
/// 7. Positioned boxes with `z-index: auto` or `0` go to layer 6.
///
/// # Errors
///
/// [`StackingError::UnclassifiableNode`] if no rule matches.
pub fn classify(
    node: NodeId,
    style: &ComputedStyle,
    parent: Option<&ComputedStyle>,
) -> Result<Placement, StackingError> {
    let positioned = is_positioned(style);
    let in_flow = is_in_flow(style);
    let inline = is_inline(style);

    // STEP 1-3: Nested stacking contexts.
    // [§ Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
    //
    // A context is painted as one unit at its stack level: layer 2 when
    // negative, layer 7 when positive, layer 6 otherwise.
    if let Some(reason) = stacking_context_reason(style, parent) {
        let stack_level = style.z_index.integer().unwrap_or(0);
        let layer = match stack_level.cmp(&0) {
            Ordering::Less => LayerName::NegativeStackLevels,
            Ordering::Equal => LayerName::ZeroStackLevel,
            Ordering::Greater => LayerName::PositiveStackLevels,
        };
        return Ok(Placement::Nested {
            layer,
            stack_level,
            reason,
        });
    }

    // STEP 4: "the in-flow, non-inline-level, non-positioned descendants."
    if in_flow && !inline && !positioned {
        return Ok(Placement::Flat(LayerName::InFlowBlocks));
    }

    // STEP 5: "the non-positioned floats."
    if !positioned && style.float.is_floating() {
        return Ok(Placement::Flat(LayerName::NonPositionedFloats));
    }

    // STEP 6: "the in-flow, inline-level, non-positioned descendants,
    // including inline tables and inline blocks."
    if in_flow && inline && !positioned {
        return Ok(Placement::Flat(LayerName::InFlowInlines));
    }

    // STEP 7: "the positioned descendants with stack level 0."
    //
    // `auto` counts as stack level 0 here. Any positioned box with an
    // integer z-index was already placed as a context.
    if positioned && style.z_index.stack_level() == 0 {
        return Ok(Placement::Flat(LayerName::ZeroStackLevel));
    }

    Err(StackingError::UnclassifiableNode {
        node,
        position: style.position,
        float: style.float,
        display: style.display.to_string(),
    })
}
