//! Property tests for stacking tree construction over generated documents.

#![allow(clippy::needless_pass_by_value)]

use std::collections::HashMap;

use quickcheck_macros::quickcheck;
use strata_css::{
    ComputedStyle, DocumentStyles, LayerName, NodePainter, StackingContext, build_stacking_tree,
    paint_order,
};
use strata_dom::{DomTree, ElementData, NodeId};

/// Paints every node as a single primitive naming the node.
struct IdPainter;

impl NodePainter for IdPainter {
    type Primitive = NodeId;

    fn paint_element(
        &mut self,
        _tree: &DomTree,
        node: NodeId,
        _style: &ComputedStyle,
    ) -> Vec<NodeId> {
        vec![node]
    }

    fn paint_text(&mut self, _tree: &DomTree, node: NodeId) -> Vec<NodeId> {
        vec![node]
    }
}

/// Styles generated documents draw from. Every combination is classifiable.
const STYLES: [&[(&str, &str)]; 10] = [
    &[("display", "block")],
    &[("display", "inline")],
    &[("display", "block"), ("float", "left")],
    &[("display", "block"), ("position", "relative")],
    &[("display", "block"), ("position", "absolute"), ("z-index", "3")],
    &[("display", "block"), ("position", "relative"), ("z-index", "-2")],
    &[("display", "block"), ("opacity", "0.5")],
    &[("display", "flex")],
    &[("display", "block"), ("z-index", "1")],
    &[("display", "inline-block"), ("position", "fixed")],
];

fn build(tree: &DomTree) -> Option<StackingContext<NodeId>> {
    build_stacking_tree(tree, &DocumentStyles::new(tree), IdPainter).ok()
}

/// A document whose shape and styles come from `shape`: each pair picks a
/// parent among the elements created so far and a style from [`STYLES`].
fn generated_document(shape: &[(u8, u8)]) -> (DomTree, Vec<NodeId>) {
    let mut tree = DomTree::with_view(800.0, 600.0);
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html", &[("display", "block")]));
    let mut elements = vec![html];
    for &(parent, style) in shape {
        let parent = elements[usize::from(parent) % elements.len()];
        let style = STYLES[usize::from(style) % STYLES.len()];
        elements.push(tree.append_element(parent, ElementData::new("div", style)));
    }
    (tree, elements)
}

/// Position of every node in document order.
fn document_positions(tree: &DomTree) -> HashMap<NodeId, usize> {
    tree.preorder(tree.root())
        .enumerate()
        .map(|(position, node)| (node, position))
        .collect()
}

/// Whether `layer` holds non-decreasing stack levels with document order
/// among equal levels.
fn is_stably_sorted(
    context: &StackingContext<NodeId>,
    layer: LayerName,
    positions: &HashMap<NodeId, usize>,
) -> bool {
    let entries = context.layers.get(layer).entries();
    entries.windows(2).all(|pair| match (pair[0].sort_key, pair[1].sort_key) {
        (Some(a), Some(b)) => {
            a < b || (a == b && positions[&pair[0].node] < positions[&pair[1].node])
        }
        _ => false,
    })
}

fn all_contexts(context: &StackingContext<NodeId>) -> Vec<&StackingContext<NodeId>> {
    let mut contexts = vec![context];
    for child in context.child_contexts() {
        contexts.extend(all_contexts(child));
    }
    contexts
}

#[quickcheck]
fn prop_sorted_layers_are_stable(levels: Vec<(i8, bool)>) -> bool {
    let mut tree = DomTree::with_view(800.0, 600.0);
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html", &[("display", "block")]));
    for (level, absolute) in levels {
        let position = if absolute { "absolute" } else { "relative" };
        let z_index = (level % 5).to_string();
        let _ = tree.append_element(
            html,
            ElementData::new("div", &[("position", position), ("z-index", z_index.as_str())]),
        );
    }
    let Some(root) = build(&tree) else {
        return false;
    };
    let positions = document_positions(&tree);
    is_stably_sorted(&root, LayerName::NegativeStackLevels, &positions)
        && is_stably_sorted(&root, LayerName::PositiveStackLevels, &positions)
}

#[quickcheck]
fn prop_every_element_is_painted_once(shape: Vec<(u8, u8)>) -> bool {
    let (tree, mut elements) = generated_document(&shape);
    let Some(root) = build(&tree) else {
        return false;
    };
    let mut painted: Vec<NodeId> = paint_order(&root)
        .iter()
        .flat_map(|step| step.primitives.iter().copied())
        .collect();
    painted.sort_unstable();
    elements.sort_unstable();
    painted == elements
}

#[quickcheck]
fn prop_nested_sorted_layers_are_stable(shape: Vec<(u8, u8)>) -> bool {
    let (tree, _) = generated_document(&shape);
    let Some(root) = build(&tree) else {
        return false;
    };
    let positions = document_positions(&tree);
    all_contexts(&root).into_iter().all(|context| {
        is_stably_sorted(context, LayerName::NegativeStackLevels, &positions)
            && is_stably_sorted(context, LayerName::PositiveStackLevels, &positions)
    })
}

#[quickcheck]
fn prop_rebuild_is_identical(shape: Vec<(u8, u8)>) -> bool {
    let (tree, _) = generated_document(&shape);
    build(&tree) == build(&tree)
}
