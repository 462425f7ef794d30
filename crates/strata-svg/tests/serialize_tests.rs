//! Tests for SVG output and the conversion pipeline.

use strata_css::StackingError;
use strata_dom::{DomTree, ElementData, NodeId, Rect, load};
use strata_svg::{ConvertError, ConvertOptions, build_layers, convert};

const SNAPSHOT: &str = r#"{
  "viewport": { "width": 320, "height": 240 },
  "root": {
    "type": "element",
    "tag": "html",
    "style": { "display": "block", "background-color": "white" },
    "bounds": { "x": 0, "y": 0, "width": 320, "height": 240 },
    "children": [
      {
        "type": "element",
        "tag": "div",
        "attributes": { "id": "top" },
        "style": { "display": "block", "position": "absolute", "z-index": "2", "background-color": "red" },
        "bounds": { "x": 10, "y": 10, "width": 50, "height": 50 }
      },
      {
        "type": "element",
        "tag": "div",
        "attributes": { "id": "faded" },
        "style": { "display": "block", "opacity": "0.5", "background-color": "blue" },
        "bounds": { "x": 20, "y": 20, "width": 50, "height": 50 },
        "children": [
          { "type": "text", "text": "a < b", "bounds": { "x": 20, "y": 20, "width": 30, "height": 16 } }
        ]
      },
      {
        "type": "element",
        "tag": "div",
        "attributes": { "id": "bottom" },
        "style": { "display": "block", "position": "relative", "z-index": "-1", "background-color": "green" },
        "bounds": { "x": 30, "y": 30, "width": 50, "height": 50 }
      },
      { "type": "comment" }
    ]
  }
}"#;

fn svg() -> String {
    let tree = match load(SNAPSHOT) {
        Ok(tree) => tree,
        Err(err) => panic!("snapshot failed to load: {err}"),
    };
    match convert(&tree, &ConvertOptions::default()) {
        Ok(svg) => svg,
        Err(err) => panic!("conversion failed: {err}"),
    }
}

fn offset(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' missing from:\n{haystack}"))
}

#[test]
fn test_root_surface_uses_viewport() {
    let svg = svg();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="240" viewBox="0 0 320 240">"#
    ));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_elements_are_written_in_paint_order() {
    let svg = svg();
    let white = offset(&svg, r#"fill="white""#);
    let green = offset(&svg, r#"fill="green""#);
    let blue = offset(&svg, r#"fill="blue""#);
    let red = offset(&svg, r#"fill="red""#);
    assert!(white < green && green < blue && blue < red, "{svg}");
}

#[test]
fn test_contexts_and_layers_are_annotated() {
    let svg = svg();
    assert!(svg.contains(r#"data-stacking-context="html" data-stacking-reason="root""#));
    assert!(svg.contains(r#"data-stacking-reason="opacity" opacity="0.5""#));
    assert!(svg.contains(r#"data-stacking-reason="positioned-with-z-index" data-z-index="-1""#));
    assert!(svg.contains(r#"data-stacking-layer="negative-stack-levels""#));
    assert!(svg.contains(r#"data-stacking-layer="positive-stack-levels""#));
    assert!(svg.contains(r#"data-element="div" data-id="faded""#));
    assert!(!svg.contains(r#"data-stacking-layer="non-positioned-floats""#));
}

#[test]
fn test_text_is_escaped() {
    let svg = svg();
    assert!(svg.contains("a &lt; b"), "{svg}");
}

#[test]
fn test_layer_tree_serializes_to_json() {
    let tree = match load(SNAPSHOT) {
        Ok(tree) => tree,
        Err(err) => panic!("snapshot failed to load: {err}"),
    };
    let layers = build_layers(&tree, &ConvertOptions::default());
    let json = layers.map(|root| serde_json::to_value(&root).ok());
    let Ok(Some(json)) = json else {
        panic!("layer tree did not serialize");
    };
    assert_eq!(json["tag_name"], "html");
    assert_eq!(json["reason"], "root");
    assert_eq!(json["z_index"], "auto");
    assert_eq!(json["layers"][1]["name"], "negative-stack-levels");
    assert_eq!(json["layers"][1]["entries"][0]["kind"], "context");
    assert_eq!(json["layers"][1]["entries"][0]["sort_key"], -1);
}

#[test]
fn test_missing_view_is_an_error() {
    let mut tree = DomTree::new();
    let _ = tree.append_element(
        NodeId::ROOT,
        ElementData::new("html", &[]).with_bounds(Rect::default()),
    );
    let result = convert(&tree, &ConvertOptions::default());
    assert!(matches!(
        result,
        Err(ConvertError::Stacking(StackingError::NoRenderingContext { .. }))
    ));
}
