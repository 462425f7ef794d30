//! The conversion pipeline: resolve, build, inline, serialize.

use strata_css::{DocumentStyles, StackingContext, StackingError, build_stacking_tree};
use strata_dom::DomTree;

use crate::error::ConvertError;
use crate::inline::inline_resources;
use crate::primitive::Primitive;
use crate::serialize::to_svg;
use crate::walker::SvgPainter;

/// Runtime options for [`convert`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Replace external image references with `data:` URLs.
    pub inline_resources: bool,
    /// Base for resolving relative image references while inlining.
    pub base_url: Option<String>,
}

/// Build the painted stacking tree of `tree`'s document element, inlining
/// images when `options` asks for it.
///
/// # Errors
///
/// Any [`StackingError`] raised while building.
pub fn build_layers(
    tree: &DomTree,
    options: &ConvertOptions,
) -> Result<StackingContext<Primitive>, ConvertError> {
    let resolver = DocumentStyles::new(tree);
    let root = build_stacking_tree(tree, &resolver, SvgPainter::new())?;
    if !options.inline_resources {
        return Ok(root);
    }
    let (root, _report) = inline_resources(root, options.base_url.as_deref());
    Ok(root)
}

/// Convert a snapshot tree into an SVG document.
///
/// # Errors
///
/// - [`StackingError::NoRenderingContext`] if the document has no view
/// - any other [`StackingError`] raised while building
/// - [`crate::SvgError`] if writing fails
pub fn convert(tree: &DomTree, options: &ConvertOptions) -> Result<String, ConvertError> {
    let viewport = tree.view().ok_or(StackingError::NoRenderingContext { node: tree.root() })?;
    let root = build_layers(tree, options)?;
    Ok(to_svg(&root, viewport, tree)?)
}
