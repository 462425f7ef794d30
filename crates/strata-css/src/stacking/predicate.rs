//! The stacking-context predicate.
//!
//! [MDN: Stacking context](https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_positioned_layout/Understanding_z-index/Stacking_context)
//! collects the triggers scattered across the CSS modules; each rule below
//! cites the module that defines it.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;
use strata_dom::{DomTree, NodeId};
use strum_macros::{AsRefStr, Display};

use crate::StackingError;
use crate::style::{
    ComputedStyle, Isolation, MixBlendMode, OverflowScrolling, Position, StyleResolver,
};

/// [CSS Will Change 1 § 2](https://www.w3.org/TR/css-will-change-1/#will-change)
///
/// "If any non-initial value of a property would create a stacking context
/// on the element, specifying that property in will-change must create a
/// stacking context on the element."
static WILL_CHANGE_TRIGGERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "clip-path",
        "contain",
        "filter",
        "isolation",
        "mask",
        "mask-border",
        "mask-image",
        "mix-blend-mode",
        "opacity",
        "perspective",
        "position",
        "transform",
        "-webkit-overflow-scrolling",
        "z-index",
    ]
    .into_iter()
    .collect()
});

/// Why an element establishes a stacking context. When several rules
/// apply, the first in declaration order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StackingContextReason {
    /// The root element of the document.
    Root,
    /// `position: absolute | relative` with `z-index` other than `auto`.
    PositionedWithZIndex,
    /// `position: fixed`.
    FixedPositioning,
    /// `position: sticky`.
    StickyPositioning,
    /// A flex or grid item with `z-index` other than `auto`.
    FlexOrGridItemWithZIndex,
    /// `opacity` below 1.
    Opacity,
    /// `mix-blend-mode` other than `normal`.
    MixBlendMode,
    /// `transform` other than `none`.
    Transform,
    /// `filter` other than `none`.
    Filter,
    /// `perspective` other than `none`.
    Perspective,
    /// `clip-path` other than `none`.
    ClipPath,
    /// `mask` other than `none`.
    Mask,
    /// `mask-image` other than `none`.
    MaskImage,
    /// `mask-border` other than `none`.
    MaskBorder,
    /// `isolation: isolate`.
    Isolation,
    /// `-webkit-overflow-scrolling: touch`.
    OverflowScrollingTouch,
    /// `contain` including `layout`, `paint`, `strict` or `content`.
    Containment,
    /// `will-change` naming a property from the trigger set.
    WillChange,
}

/// The first rule under which an element with `style`, whose parent element
/// has `parent`, establishes a stacking context, or `None`.
///
/// The root element is not recognized here; the builder gives it
/// [`StackingContextReason::Root`].
#[must_use]
pub fn stacking_context_reason(
    style: &ComputedStyle,
    parent: Option<&ComputedStyle>,
) -> Option<StackingContextReason> {
    use StackingContextReason as Reason;

    // [CSS Display 3 § 2.5](https://www.w3.org/TR/css-display-3/#valdef-display-contents)
    //
    // An element with `display: contents` has no box, so nothing it sets
    // can form a context.
    if style.display_contents {
        return None;
    }

    // [§ 9.9.1](https://www.w3.org/TR/CSS2/visuren.html#z-index)
    //
    // "<integer> ... The box also establishes a new stacking context."
    let has_z_index = !style.z_index.is_auto();
    let reason = match style.position {
        Position::Absolute | Position::Relative if has_z_index => {
            Some(Reason::PositionedWithZIndex)
        }
        // [CSS Positioned Layout 3 § 2](https://www.w3.org/TR/css-position-3/#position-property)
        //
        // Fixed and sticky boxes always form a stacking context.
        Position::Fixed => Some(Reason::FixedPositioning),
        Position::Sticky => Some(Reason::StickyPositioning),
        _ => None,
    };
    if reason.is_some() {
        return reason;
    }

    // [CSS Flexbox 1 § 4.3](https://www.w3.org/TR/css-flexbox-1/#painting)
    //
    // "Flex items paint exactly the same as inline blocks, except that ...
    // z-index values other than auto create a stacking context even if
    // position is static." Grid items behave the same way.
    if has_z_index && parent.is_some_and(|parent| parent.display.is_flex_or_grid_container()) {
        return Some(Reason::FlexOrGridItemWithZIndex);
    }

    // [CSS Color 4 § 13.2](https://www.w3.org/TR/css-color-4/#transparency)
    //
    // "any value other than 1 ... establishes a new stacking context."
    if style.opacity < 1.0 {
        return Some(Reason::Opacity);
    }
    if style.mix_blend_mode != MixBlendMode::Normal {
        return Some(Reason::MixBlendMode);
    }

    let none_or_value = [
        (style.transform.is_some(), Reason::Transform),
        (style.filter.is_some(), Reason::Filter),
        (style.perspective.is_some(), Reason::Perspective),
        (style.clip_path.is_some(), Reason::ClipPath),
        (style.mask.is_some(), Reason::Mask),
        (style.mask_image.is_some(), Reason::MaskImage),
        (style.mask_border.is_some(), Reason::MaskBorder),
    ];
    if let Some((_, reason)) = none_or_value.into_iter().find(|(set, _)| *set) {
        return Some(reason);
    }

    if style.isolation == Isolation::Isolate {
        return Some(Reason::Isolation);
    }
    if style.overflow_scrolling == OverflowScrolling::Touch {
        return Some(Reason::OverflowScrollingTouch);
    }
    if style.contain.iter().any(|keyword| keyword.establishes_stacking_context()) {
        return Some(Reason::Containment);
    }
    if style
        .will_change
        .iter()
        .any(|property| WILL_CHANGE_TRIGGERS.contains(property.as_str()))
    {
        return Some(Reason::WillChange);
    }
    None
}

/// Whether an element with `style`, whose parent element has `parent`,
/// establishes a stacking context.
///
/// A pure function of its two inputs; nothing is cached between calls.
#[must_use]
pub fn establishes_stacking_context(style: &ComputedStyle, parent: Option<&ComputedStyle>) -> bool {
    stacking_context_reason(style, parent).is_some()
}

/// Node-level form of [`establishes_stacking_context`].
///
/// Non-element nodes never establish a stacking context. For elements, both
/// the node's style and its parent element's style are resolved afresh.
///
/// # Errors
///
/// Propagates [`StackingError::NoRenderingContext`] when the document has no
/// view.
pub fn node_establishes_stacking_context<R: StyleResolver + ?Sized>(
    tree: &DomTree,
    resolver: &R,
    node: NodeId,
) -> Result<bool, StackingError> {
    if !tree.is_element(node) {
        return Ok(false);
    }
    let style = resolver.resolve(node)?;
    let parent = match tree.parent(node).filter(|&parent| tree.is_element(parent)) {
        Some(parent) => Some(resolver.resolve(parent)?),
        None => None,
    };
    Ok(establishes_stacking_context(&style, parent.as_ref()))
}
