//! Tests for replacing image references with `data:` URLs.

use std::fs;
use std::path::PathBuf;

use strata_common::net::NetError;
use strata_common::warning::has_warned;
use strata_dom::{DomTree, ElementData, NodeId, Rect};
use strata_svg::{ConvertOptions, Primitive, build_layers, inline_resources};

const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

const BOX: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 10.0,
    height: 10.0,
};

/// A scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("strata-inline-{name}-{}", std::process::id()));
    let _ = fs::create_dir_all(&dir);
    dir
}

fn tree_with_images(sources: &[&str]) -> DomTree {
    let mut tree = DomTree::with_view(100.0, 100.0);
    let html = tree.append_element(
        NodeId::ROOT,
        ElementData::new("html", &[("display", "block")]).with_bounds(BOX),
    );
    for src in sources {
        let _ = tree.append_element(
            html,
            ElementData::new("img", &[("display", "inline")])
                .with_bounds(BOX)
                .with_attr("src", src),
        );
    }
    tree
}

fn hrefs(tree: &DomTree, options: &ConvertOptions) -> Vec<String> {
    let root = match build_layers(tree, options) {
        Ok(root) => root,
        Err(err) => panic!("build failed: {err}"),
    };
    root.primitives()
        .into_iter()
        .filter_map(Primitive::href)
        .map(str::to_string)
        .collect()
}

#[test]
fn test_local_image_is_inlined() {
    let dir = scratch_dir("local");
    let path = dir.join("pixel.png");
    let _ = fs::write(&path, PNG_HEADER);
    let src = path.to_string_lossy().into_owned();

    let tree = tree_with_images(&[&src]);
    let options = ConvertOptions {
        inline_resources: true,
        base_url: None,
    };
    let hrefs = hrefs(&tree, &options);

    assert_eq!(hrefs.len(), 1);
    assert!(hrefs[0].starts_with("data:image/png;base64,"), "{}", hrefs[0]);
}

#[test]
fn test_references_are_untouched_without_the_option() {
    let tree = tree_with_images(&["missing.png"]);
    assert_eq!(hrefs(&tree, &ConvertOptions::default()), vec!["missing.png"]);
}

#[test]
fn test_relative_reference_resolves_against_base() {
    let dir = scratch_dir("base");
    let _ = fs::write(dir.join("logo.png"), PNG_HEADER);
    let base = dir.join("page.html").to_string_lossy().into_owned();

    let tree = tree_with_images(&["logo.png"]);
    let options = ConvertOptions {
        inline_resources: true,
        base_url: Some(base),
    };
    let hrefs = hrefs(&tree, &options);

    assert!(hrefs[0].starts_with("data:image/png;base64,"), "{}", hrefs[0]);
}

#[test]
fn test_failed_fetch_is_isolated() {
    let dir = scratch_dir("partial");
    let good = dir.join("good.png");
    let _ = fs::write(&good, PNG_HEADER);
    let good = good.to_string_lossy().into_owned();
    let bad = dir.join("does-not-exist.png").to_string_lossy().into_owned();

    let tree = tree_with_images(&[&bad, &good]);
    let root = match build_layers(&tree, &ConvertOptions::default()) {
        Ok(root) => root,
        Err(err) => panic!("build failed: {err}"),
    };
    let (root, report) = inline_resources(root, None);

    assert_eq!(report.inlined, vec![good]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, bad);
    assert!(matches!(report.failed[0].1, NetError::Io { .. }));
    let message = format!("failed to inline '{bad}': {}", report.failed[0].1);
    assert!(has_warned("Inline", &message));

    let hrefs: Vec<&str> = root.primitives().into_iter().filter_map(Primitive::href).collect();
    assert_eq!(hrefs[0], bad);
    assert!(hrefs[1].starts_with("data:image/png;base64,"));
}

#[test]
fn test_data_urls_are_left_alone() {
    let data = "data:image/gif;base64,R0lGODlhAQABAAAAACw=";
    let tree = tree_with_images(&[data]);
    let root = match build_layers(&tree, &ConvertOptions::default()) {
        Ok(root) => root,
        Err(err) => panic!("build failed: {err}"),
    };
    let (root, report) = inline_resources(root, None);

    assert!(report.inlined.is_empty());
    assert!(report.failed.is_empty());
    let hrefs: Vec<&str> = root.primitives().into_iter().filter_map(Primitive::href).collect();
    assert_eq!(hrefs, vec![data]);
}
