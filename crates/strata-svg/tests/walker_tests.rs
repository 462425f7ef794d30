//! Tests for turning snapshot nodes into primitives.

use strata_css::{ComputedStyle, NodePainter};
use strata_dom::{DomTree, ElementData, NodeId, Rect};
use strata_svg::{FontAttributes, Primitive, SvgPainter};

const BOX: Rect = Rect {
    x: 10.0,
    y: 20.0,
    width: 100.0,
    height: 50.0,
};

fn paint(style: &[(&str, &str)]) -> Vec<Primitive> {
    let mut tree = DomTree::with_view(200.0, 200.0);
    let node = tree.append_element(NodeId::ROOT, ElementData::new("div", style).with_bounds(BOX));
    SvgPainter::new().paint_element(&tree, node, &ComputedStyle::default())
}

#[test]
fn test_background_color_fills_border_box() {
    assert_eq!(
        paint(&[("background-color", "rgb(255, 0, 0)")]),
        vec![Primitive::Rect {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
            fill: "rgb(255, 0, 0)".to_string(),
        }]
    );
}

#[test]
fn test_transparent_background_paints_nothing() {
    assert!(paint(&[("background-color", "rgba(0, 0, 0, 0)")]).is_empty());
    assert!(paint(&[("background-color", "transparent")]).is_empty());
}

#[test]
fn test_borders_paint_one_rect_per_visible_side() {
    let primitives = paint(&[
        ("border-top-style", "solid"),
        ("border-top-width", "2px"),
        ("border-top-color", "blue"),
        ("border-left-style", "dashed"),
        ("border-left-width", "4px"),
        ("color", "green"),
        ("border-right-style", "none"),
        ("border-right-width", "9px"),
        ("border-bottom-style", "solid"),
        ("border-bottom-width", "0px"),
    ]);
    assert_eq!(
        primitives,
        vec![
            Primitive::Rect {
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 2.0,
                fill: "blue".to_string(),
            },
            Primitive::Rect {
                x: 10.0,
                y: 22.0,
                width: 4.0,
                height: 48.0,
                fill: "green".to_string(),
            },
        ]
    );
}

#[test]
fn test_visibility_hidden_paints_nothing() {
    assert!(paint(&[("background-color", "red"), ("visibility", "hidden")]).is_empty());
}

#[test]
fn test_element_without_bounds_paints_nothing() {
    let mut tree = DomTree::with_view(200.0, 200.0);
    let node = tree.append_element(
        NodeId::ROOT,
        ElementData::new("div", &[("background-color", "red")]),
    );
    assert!(SvgPainter::new().paint_element(&tree, node, &ComputedStyle::default()).is_empty());
}

#[test]
fn test_img_and_background_image_become_images() {
    let mut tree = DomTree::with_view(200.0, 200.0);
    let img = tree.append_element(
        NodeId::ROOT,
        ElementData::new("img", &[("background-image", "url(\"bg.png\")")])
            .with_bounds(BOX)
            .with_attr("src", "photo.jpg"),
    );
    let hrefs: Vec<String> = SvgPainter::new()
        .paint_element(&tree, img, &ComputedStyle::default())
        .iter()
        .filter_map(|primitive| primitive.href().map(str::to_string))
        .collect();
    assert_eq!(hrefs, vec!["bg.png", "photo.jpg"]);
}

#[test]
fn test_text_uses_parent_font_and_collapses_space() {
    let mut tree = DomTree::with_view(200.0, 200.0);
    let p = tree.append_element(
        NodeId::ROOT,
        ElementData::new(
            "p",
            &[
                ("color", "rgb(1, 2, 3)"),
                ("font-size", "14px"),
                ("font-family", "serif"),
                ("font-weight", "700"),
                ("font-style", "normal"),
            ],
        )
        .with_bounds(BOX),
    );
    let text = tree.append_text(p, "  hello \n  world ", None);

    assert_eq!(
        SvgPainter::new().paint_text(&tree, text),
        vec![Primitive::Text {
            x: 10.0,
            y: 20.0,
            text: "hello world".to_string(),
            fill: "rgb(1, 2, 3)".to_string(),
            font: FontAttributes {
                family: Some("serif".to_string()),
                size: Some("14px".to_string()),
                weight: Some("700".to_string()),
                style: None,
            },
        }]
    );
}

#[test]
fn test_text_prefers_its_own_bounds() {
    let mut tree = DomTree::with_view(200.0, 200.0);
    let span = tree.append_element(NodeId::ROOT, ElementData::new("span", &[]).with_bounds(BOX));
    let own = Rect {
        x: 50.0,
        y: 60.0,
        width: 10.0,
        height: 10.0,
    };
    let text = tree.append_text(span, "x", Some(own));

    let primitives = SvgPainter::new().paint_text(&tree, text);
    assert!(matches!(
        primitives.as_slice(),
        [Primitive::Text { x, y, fill, .. }] if (*x - 50.0).abs() < f32::EPSILON
            && (*y - 60.0).abs() < f32::EPSILON
            && fill == "black"
    ));
}

#[test]
fn test_text_in_hidden_parent_paints_nothing() {
    let mut tree = DomTree::with_view(200.0, 200.0);
    let span = tree.append_element(
        NodeId::ROOT,
        ElementData::new("span", &[("visibility", "hidden")]).with_bounds(BOX),
    );
    let text = tree.append_text(span, "secret", None);
    assert!(SvgPainter::new().paint_text(&tree, text).is_empty());
}
