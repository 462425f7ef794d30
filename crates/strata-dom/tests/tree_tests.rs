//! Tests for tree construction, traversal, and snapshot loading.

use strata_dom::{DomTree, ElementData, NodeId, NodeKind, Rect, SnapshotError, load};

#[test]
fn test_append_keeps_source_order() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html", &[]));
    let a = tree.append_element(html, ElementData::new("a", &[]));
    let b = tree.append_text(html, "b", None);
    let c = tree.append_element(html, ElementData::new("c", &[]));

    assert_eq!(tree.children(html), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(html));
    assert_eq!(tree.parent(NodeId::ROOT), None);
    assert_eq!(tree.document_element(), Some(html));
}

#[test]
fn test_preorder_is_depth_first_source_order() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html", &[]));
    let body = tree.append_element(html, ElementData::new("body", &[]));
    let p = tree.append_element(body, ElementData::new("p", &[]));
    let text = tree.append_text(p, "x", None);
    let footer = tree.append_element(html, ElementData::new("footer", &[]));

    let order: Vec<NodeId> = tree.preorder(html).collect();
    assert_eq!(order, vec![html, body, p, text, footer]);
}

#[test]
fn test_ancestors_and_parent_element() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html", &[]));
    let body = tree.append_element(html, ElementData::new("body", &[]));
    let text = tree.append_text(body, "x", None);

    let ancestors: Vec<NodeId> = tree.ancestors(text).collect();
    assert_eq!(ancestors, vec![body, html, NodeId::ROOT]);
    assert_eq!(tree.parent_element(text), Some(body));
    assert_eq!(tree.parent_element(html), None);
}

#[test]
fn test_element_builders() {
    let data = ElementData::new("IMG", &[("z-index", "2")])
        .with_attr("src", "a.png")
        .with_bounds(Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        });
    assert_eq!(data.tag_name, "img");
    assert_eq!(data.property("z-index"), Some("2"));
    assert_eq!(data.property("opacity"), None);
    assert_eq!(data.attrs.get("src").map(String::as_str), Some("a.png"));
    assert!(!data.bounds.unwrap().is_empty());
}

#[test]
fn test_load_snapshot() {
    let json = r#"{
        "viewport": { "width": 640, "height": 480 },
        "root": {
            "type": "element",
            "tag": "HTML",
            "style": { "Z-Index": "auto" },
            "children": [
                { "type": "comment" },
                { "type": "text", "text": "hi", "bounds": { "x": 0, "y": 0, "width": 10, "height": 5 } },
                { "type": "element", "tag": "div", "attributes": { "id": "d" } }
            ]
        }
    }"#;
    let tree = load(json).unwrap();

    let view = tree.view().unwrap();
    assert!((view.width - 640.0).abs() < f32::EPSILON);

    let html = tree.document_element().unwrap();
    let element = tree.as_element(html).unwrap();
    assert_eq!(element.tag_name, "html");
    assert_eq!(element.property("z-index"), Some("auto"));

    let children = tree.children(html);
    assert_eq!(children.len(), 3);
    assert!(matches!(tree.get(children[0]).unwrap().kind, NodeKind::Other));
    assert_eq!(tree.as_text(children[1]).unwrap().text, "hi");
    assert_eq!(tree.as_element(children[2]).unwrap().id(), Some("d"));
}

#[test]
fn test_load_snapshot_without_viewport() {
    let tree = load(r#"{ "root": { "type": "element", "tag": "html" } }"#).unwrap();
    assert!(tree.view().is_none());
}

#[test]
fn test_load_snapshot_rejects_text_root() {
    let result = load(r#"{ "viewport": null, "root": { "type": "text", "text": "x" } }"#);
    assert!(matches!(result, Err(SnapshotError::RootNotElement("text"))));
}

#[test]
fn test_load_snapshot_rejects_garbage() {
    assert!(matches!(load("{ nope"), Err(SnapshotError::Json(_))));
}

#[test]
fn test_load_deeply_nested_snapshot() {
    const DEPTH: usize = 2000;
    let mut json = String::from(r#"{ "viewport": { "width": 100, "height": 100 }, "root": "#);
    for _ in 0..DEPTH {
        json.push_str(r#"{ "type": "element", "tag": "div", "children": ["#);
    }
    json.push_str(r#"{ "type": "text", "text": "leaf" }"#);
    for _ in 0..DEPTH {
        json.push_str("] }");
    }
    json.push_str(" }");

    let tree = load(&json).unwrap();
    assert_eq!(tree.len(), DEPTH + 2);

    let leaf = tree.preorder(NodeId::ROOT).last().unwrap();
    assert_eq!(tree.as_text(leaf).unwrap().text, "leaf");
    // Every element plus the Document sits above the leaf.
    assert_eq!(tree.ancestors(leaf).count(), DEPTH + 1);
}

#[test]
fn test_load_snapshot_rejects_children_under_text() {
    let json = r#"{ "root": { "type": "element", "tag": "html", "children": [
        { "type": "text", "text": "x", "children": [{ "type": "comment" }] }
    ] } }"#;
    assert!(matches!(load(json), Err(SnapshotError::Json(_))));
}

#[test]
fn test_load_snapshot_rejects_unknown_node_type() {
    let json = r#"{ "root": { "type": "element", "tag": "html", "children": [
        { "type": "cdata" }
    ] } }"#;
    assert!(matches!(load(json), Err(SnapshotError::Json(_))));
    assert!(matches!(load(r#"{ "viewport": null }"#), Err(SnapshotError::Json(_))));
}
