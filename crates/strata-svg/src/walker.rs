//! Tree-walker painter: snapshot nodes to vector primitives.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The stacking builder decides which layer a node lands in; this painter
//! decides what the node itself draws. Geometry comes straight from the
//! border boxes in the snapshot, so nothing here performs layout.

use strata_css::{ComputedStyle, NodePainter};
use strata_dom::{DomTree, ElementData, NodeId, Rect};

use crate::primitive::{FontAttributes, Primitive};

/// Initial value of `color` when the snapshot omits it.
const DEFAULT_COLOR: &str = "black";

/// Paints elements and text from the computed values in a [`DomTree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPainter;

impl SvgPainter {
    /// Create a painter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl NodePainter for SvgPainter {
    type Primitive = Primitive;

    /// [§ Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    ///
    /// "For each element: ... the background color of the element, the
    /// background image of the element, the border of the element", then
    /// replaced content.
    fn paint_element(
        &mut self,
        tree: &DomTree,
        node: NodeId,
        _style: &ComputedStyle,
    ) -> Vec<Primitive> {
        let Some(element) = tree.as_element(node) else {
            return Vec::new();
        };
        let Some(bounds) = element.bounds.filter(|bounds| !bounds.is_empty()) else {
            return Vec::new();
        };
        // [§ 11.2 Visibility](https://www.w3.org/TR/CSS2/visufx.html#visibility)
        //
        // "hidden: The generated box is invisible (fully transparent, nothing
        // is drawn), but still affects layout."
        if is_hidden(element) {
            return Vec::new();
        }

        let mut primitives = Vec::new();

        // STEP 1: Background color.
        let background = element
            .property("background-color")
            .filter(|color| !is_transparent(color));
        if let Some(fill) = background {
            primitives.push(Primitive::Rect {
                x: bounds.x,
                y: bounds.y,
                width: bounds.width,
                height: bounds.height,
                fill: fill.trim().to_string(),
            });
        }

        // STEP 2: Background image.
        if let Some(href) = element.property("background-image").and_then(parse_css_url) {
            primitives.push(Primitive::Image {
                x: bounds.x,
                y: bounds.y,
                width: bounds.width,
                height: bounds.height,
                href,
            });
        }

        // STEP 3: Borders.
        paint_borders(element, bounds, &mut primitives);

        // STEP 4: Replaced content.
        // [§ 4.8.4 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
        let src = element
            .attrs
            .get("src")
            .filter(|src| element.tag_name == "img" && !src.is_empty());
        if let Some(src) = src {
            primitives.push(Primitive::Image {
                x: bounds.x,
                y: bounds.y,
                width: bounds.width,
                height: bounds.height,
                href: src.clone(),
            });
        }

        primitives
    }

    /// Text takes its color and font from the parent element, and its
    /// position from its own box, or the parent's when layout reported none.
    fn paint_text(&mut self, tree: &DomTree, node: NodeId) -> Vec<Primitive> {
        let Some(text) = tree.as_text(node) else {
            return Vec::new();
        };
        let parent = tree.parent_element(node).and_then(|parent| tree.as_element(parent));
        if parent.is_some_and(is_hidden) {
            return Vec::new();
        }
        let Some(bounds) = text.bounds.or_else(|| parent.and_then(|parent| parent.bounds)) else {
            return Vec::new();
        };

        // [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
        let preserve = parent
            .and_then(|parent| parent.property("white-space"))
            .is_some_and(|value| value.trim().starts_with("pre"));
        let content = if preserve {
            text.text.clone()
        } else {
            text.text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
        };
        if content.is_empty() {
            return Vec::new();
        }

        let property = |name: &str| {
            parent
                .and_then(|parent| parent.property(name))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        vec![Primitive::Text {
            x: bounds.x,
            y: bounds.y,
            text: content,
            fill: property("color").unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            font: FontAttributes {
                family: property("font-family"),
                size: property("font-size"),
                weight: property("font-weight"),
                style: property("font-style").filter(|style| style != "normal"),
            },
        }]
    }
}

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// One rectangle per visible side. Top and bottom span the full border box
/// width; left and right fill the space between them.
fn paint_borders(element: &ElementData, bounds: Rect, primitives: &mut Vec<Primitive>) {
    let side = |name: &str| -> Option<(f32, String)> {
        let style = element.property(&format!("border-{name}-style"))?.trim();
        if style.eq_ignore_ascii_case("none") || style.eq_ignore_ascii_case("hidden") {
            return None;
        }
        let width = element
            .property(&format!("border-{name}-width"))
            .and_then(parse_px)
            .filter(|width| *width > 0.0)?;
        let color = element
            .property(&format!("border-{name}-color"))
            .or_else(|| element.property("color"))
            .map_or_else(|| DEFAULT_COLOR.to_string(), |color| color.trim().to_string());
        if is_transparent(&color) {
            return None;
        }
        Some((width, color))
    };

    let top = side("top");
    let right = side("right");
    let bottom = side("bottom");
    let left = side("left");
    let top_width = top.as_ref().map_or(0.0, |(width, _)| *width);
    let bottom_width = bottom.as_ref().map_or(0.0, |(width, _)| *width);
    let inner_height = (bounds.height - top_width - bottom_width).max(0.0);

    if let Some((width, fill)) = top {
        primitives.push(Primitive::Rect {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: width,
            fill,
        });
    }
    if let Some((width, fill)) = right {
        primitives.push(Primitive::Rect {
            x: bounds.x + bounds.width - width,
            y: bounds.y + top_width,
            width,
            height: inner_height,
            fill,
        });
    }
    if let Some((width, fill)) = bottom {
        primitives.push(Primitive::Rect {
            x: bounds.x,
            y: bounds.y + bounds.height - width,
            width: bounds.width,
            height: width,
            fill,
        });
    }
    if let Some((width, fill)) = left {
        primitives.push(Primitive::Rect {
            x: bounds.x,
            y: bounds.y + top_width,
            width,
            height: inner_height,
            fill,
        });
    }
}

fn is_hidden(element: &ElementData) -> bool {
    element
        .property("visibility")
        .is_some_and(|value| matches!(value.trim(), "hidden" | "collapse"))
}

/// Whether a computed color paints nothing: `transparent`, or any `rgba()`
/// with zero alpha (`getComputedStyle` reports `rgba(0, 0, 0, 0)`).
fn is_transparent(color: &str) -> bool {
    let color = color.trim();
    if color.is_empty() || color.eq_ignore_ascii_case("transparent") {
        return true;
    }
    color
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|args| args.rsplit([',', '/']).next())
        .and_then(|alpha| alpha.trim().parse::<f32>().ok())
        .is_some_and(|alpha| alpha <= 0.0)
}

/// Parse a computed length in pixels, e.g. `1.5px` or `0`.
fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

/// [CSS Values 4 § 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)
///
/// The first `url(...)` of a computed `background-image`, unquoted.
fn parse_css_url(value: &str) -> Option<String> {
    let start = value.find("url(")? + "url(".len();
    let rest = &value[start..];
    let inner = rest[..rest.find(')')?].trim();
    let unquoted = inner
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|inner| inner.strip_suffix('\'')))
        .unwrap_or(inner);
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_colors() {
        assert!(is_transparent("transparent"));
        assert!(is_transparent("rgba(0, 0, 0, 0)"));
        assert!(is_transparent("rgba(255 0 0 / 0)"));
        assert!(!is_transparent("rgba(0, 0, 0, 0.5)"));
        assert!(!is_transparent("rgb(255, 0, 0)"));
        assert!(!is_transparent("red"));
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("2px"), Some(2.0));
        assert_eq!(parse_px(" 0 "), Some(0.0));
        assert_eq!(parse_px("thin"), None);
    }

    #[test]
    fn test_parse_css_url() {
        assert_eq!(parse_css_url("url(\"a.png\")").as_deref(), Some("a.png"));
        assert_eq!(parse_css_url("url('b.svg'), none").as_deref(), Some("b.svg"));
        assert_eq!(parse_css_url("url(c.gif)").as_deref(), Some("c.gif"));
        assert_eq!(parse_css_url("linear-gradient(red, blue)"), None);
        assert_eq!(parse_css_url("none"), None);
    }
}
