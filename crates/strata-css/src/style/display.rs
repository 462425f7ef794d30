//! CSS Display property types and parsing
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use std::fmt;

use strum_macros::{Display, EnumString};

// [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
//
// "The display property defines an element's display type, which consists of
// the two basic qualities of how an element generates boxes:
//   - the inner display type, which defines the kind of formatting context
//     it generates, dictating how its descendant boxes are laid out.
//   - the outer display type, which dictates how the principal box itself
//     participates in flow layout."

/// [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
///
/// "The `<display-outside>` keywords specify the element's outer display type,
/// which is essentially its principal box's role in flow layout."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum OuterDisplayType {
    /// "The element generates a block-level box when placed in flow layout."
    Block,
    /// "The element generates an inline-level box when placed in flow layout."
    Inline,
    /// "The element generates a run-in box, which is a type of inline-level box."
    RunIn,
}

/// [§ 2.2 Inner Display Layout Models](https://www.w3.org/TR/css-display-3/#inner-model)
///
/// "The `<display-inside>` keywords specify the element's inner display type,
/// which defines the type of formatting context that lays out its contents."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum InnerDisplayType {
    /// "The element lays out its contents using flow layout (block-and-inline layout)."
    Flow,
    /// Flow layout that always establishes a new block formatting context.
    FlowRoot,
    /// "The element lays out its contents using table layout."
    Table,
    /// "The element lays out its contents using flex layout."
    Flex,
    /// "The element lays out its contents using grid layout."
    Grid,
}

/// Combined display value
/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayValue {
    /// "The outer display type, which dictates how the box participates in flow layout."
    pub outer: OuterDisplayType,
    /// "The inner display type, which dictates how its descendant boxes are laid out."
    pub inner: InnerDisplayType,
}

impl DisplayValue {
    /// Build a display value from its two halves.
    #[must_use]
    pub const fn new(outer: OuterDisplayType, inner: InnerDisplayType) -> Self {
        Self { outer, inner }
    }

    /// `display: block`
    #[must_use]
    pub const fn block() -> Self {
        Self::new(OuterDisplayType::Block, InnerDisplayType::Flow)
    }

    /// `display: inline`, the initial value.
    #[must_use]
    pub const fn inline() -> Self {
        Self::new(OuterDisplayType::Inline, InnerDisplayType::Flow)
    }

    /// `display: inline-block`
    #[must_use]
    pub const fn inline_block() -> Self {
        Self::new(OuterDisplayType::Inline, InnerDisplayType::FlowRoot)
    }

    /// `display: flex`
    #[must_use]
    pub const fn flex() -> Self {
        Self::new(OuterDisplayType::Block, InnerDisplayType::Flex)
    }

    /// `display: grid`
    #[must_use]
    pub const fn grid() -> Self {
        Self::new(OuterDisplayType::Block, InnerDisplayType::Grid)
    }

    /// Whether descendants are laid out as flex or grid items, the case in
    /// which a child's `z-index` applies without positioning.
    #[must_use]
    pub const fn is_flex_or_grid_container(self) -> bool {
        matches!(self.inner, InnerDisplayType::Flex | InnerDisplayType::Grid)
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::inline()
    }
}

impl fmt::Display for DisplayValue {
    /// Writes the shortest keyword form that round-trips.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InnerDisplayType::{Flex, Flow, FlowRoot, Grid, Table};
        use OuterDisplayType::{Block, Inline, RunIn};
        match (self.outer, self.inner) {
            (Block, Flow) => f.write_str("block"),
            (Inline, Flow) => f.write_str("inline"),
            (RunIn, Flow) => f.write_str("run-in"),
            (Block, FlowRoot) => f.write_str("flow-root"),
            (Inline, FlowRoot) => f.write_str("inline-block"),
            (Block, inner @ (Table | Flex | Grid)) => write!(f, "{inner}"),
            (Inline, inner @ (Table | Flex | Grid)) => write!(f, "inline-{inner}"),
            (outer, inner) => write!(f, "{outer} {inner}"),
        }
    }
}

/// [§ 2.4 Combination Display Keywords](https://www.w3.org/TR/css-display-3/#display-legacy)
///
/// Single-keyword forms, including the legacy `inline-*` keywords and the
/// table-internal values (which stacking treats like blocks).
fn parse_single_keyword(keyword: &str) -> Option<DisplayValue> {
    use InnerDisplayType::{Flex, Flow, FlowRoot, Grid, Table};
    use OuterDisplayType::{Block, Inline, RunIn};
    let value = match keyword {
        "block" | "list-item" => DisplayValue::new(Block, Flow),
        "inline" => DisplayValue::new(Inline, Flow),
        "run-in" => DisplayValue::new(RunIn, Flow),
        "flow-root" => DisplayValue::new(Block, FlowRoot),
        "inline-block" => DisplayValue::new(Inline, FlowRoot),
        "table" => DisplayValue::new(Block, Table),
        "inline-table" => DisplayValue::new(Inline, Table),
        "flex" | "-webkit-box" => DisplayValue::new(Block, Flex),
        "inline-flex" | "-webkit-inline-box" => DisplayValue::new(Inline, Flex),
        "grid" => DisplayValue::new(Block, Grid),
        "inline-grid" => DisplayValue::new(Inline, Grid),
        // [§ 2.4 Layout-Internal Display Types](https://www.w3.org/TR/css-display-3/#layout-specific-display)
        "table-row-group" | "table-header-group" | "table-footer-group" | "table-row"
        | "table-cell" | "table-column-group" | "table-column" | "table-caption" => {
            DisplayValue::new(Block, FlowRoot)
        }
        _ => return None,
    };
    Some(value)
}

/// [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// Parse a computed `display` value. Accepts single keywords and the
/// two-keyword `<display-outside> <display-inside>` form in either order
/// (`list-item` is ignored when combined).
///
/// Returns `None` for `none` and `contents` (see [`is_display_none`] and
/// [`is_display_contents`]) and for anything unrecognized.
#[must_use]
pub fn parse_display_value(value: &str) -> Option<DisplayValue> {
    let lower = value.trim().to_ascii_lowercase();
    let keywords: Vec<&str> = lower
        .split_ascii_whitespace()
        .filter(|&k| k != "list-item")
        .collect();

    match keywords.as_slice() {
        [] if lower.contains("list-item") => Some(DisplayValue::block()),
        [single] => parse_single_keyword(single),
        [first, second] => {
            let (outer, inner) = first
                .parse::<OuterDisplayType>()
                .ok()
                .zip(second.parse::<InnerDisplayType>().ok())
                .or_else(|| {
                    second
                        .parse::<OuterDisplayType>()
                        .ok()
                        .zip(first.parse::<InnerDisplayType>().ok())
                })?;
            Some(DisplayValue::new(outer, inner))
        }
        _ => None,
    }
}

/// [§ 2.6 display: none](https://www.w3.org/TR/css-display-3/#valdef-display-none)
///
/// "The element and its descendants generate no boxes or text runs."
#[must_use]
pub fn is_display_none(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("none")
}

/// [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#valdef-display-contents)
///
/// "The element itself does not generate any boxes, but its children and
/// pseudo-elements still generate boxes and text runs as normal."
#[must_use]
pub fn is_display_contents(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("contents")
}
