//! The stacking tree builder.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! One activation per stacking context:
//! - **Enter**: create seven empty layers and paint the owner's own
//!   background and borders into layer 1.
//! - **Classify and place**: walk the owner's descendants in pre-order,
//!   source order, placing each element with [`classify`]. An element that
//!   starts a nested context is not descended into; it is built by a
//!   recursive activation and placed as one entry.
//! - **Finalize**: sort layers 2 and 7 by stack level.
//! - **Exit**: hand the finished context to the parent activation, or to
//!   the caller for the root.

#[cfg(feature = "stacking-trace")]
use std::cell::Cell;
use std::rc::Rc;

use strata_dom::{DomTree, NodeId, NodeKind};

use super::classify::{Placement, classify};
use super::layers::{LayerEntry, LayerName, PendingLayers, StackingContext};
use super::predicate::StackingContextReason;
use crate::StackingError;
use crate::style::{ComputedStyle, StyleResolver};

#[cfg(feature = "stacking-trace")]
thread_local! {
    static STACKING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Indents trace output for the lifetime of one activation.
#[cfg(feature = "stacking-trace")]
struct TraceDepth;

#[cfg(feature = "stacking-trace")]
impl TraceDepth {
    fn enter(owner: NodeId, tag_name: &str, reason: StackingContextReason) -> Self {
        let depth = STACKING_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        eprintln!(
            "[STACKING ENTER] {:indent$}<{tag_name}> {owner:?} reason={reason}",
            "",
            indent = depth * 2
        );
        Self
    }
}

#[cfg(feature = "stacking-trace")]
impl Drop for TraceDepth {
    fn drop(&mut self) {
        STACKING_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Converts nodes into drawing primitives as the builder places them.
///
/// The builder decides *where* a node is painted; the painter decides
/// *what* is painted. Primitives are opaque to the stacking core.
pub trait NodePainter {
    /// The drawing primitive type.
    type Primitive;

    /// Primitives for an element's own box (background, borders, replaced
    /// content). Descendants are painted separately.
    fn paint_element(
        &mut self,
        tree: &DomTree,
        node: NodeId,
        style: &ComputedStyle,
    ) -> Vec<Self::Primitive>;

    /// Primitives for a text node.
    fn paint_text(&mut self, tree: &DomTree, node: NodeId) -> Vec<Self::Primitive>;
}

/// Builds the stacking tree of one document.
///
/// Holds no state between calls beyond the painter, so building twice over
/// an unchanged tree gives identical results.
#[derive(Debug)]
pub struct StackingTreeBuilder<'a, R: ?Sized, P> {
    tree: &'a DomTree,
    resolver: &'a R,
    painter: P,
}

impl<'a, R, P> StackingTreeBuilder<'a, R, P>
where
    R: StyleResolver + ?Sized,
    P: NodePainter,
{
    /// Create a builder over `tree`, resolving styles through `resolver` and
    /// painting through `painter`.
    pub fn new(tree: &'a DomTree, resolver: &'a R, painter: P) -> Self {
        Self {
            tree,
            resolver,
            painter,
        }
    }

    /// Build the tree rooted at the document element.
    ///
    /// # Errors
    ///
    /// [`StackingError::NoDocumentElement`] if the document is empty, or
    /// any error raised while resolving or classifying a descendant.
    pub fn build(&mut self) -> Result<StackingContext<P::Primitive>, StackingError> {
        let root = self
            .tree
            .document_element()
            .ok_or(StackingError::NoDocumentElement)?;
        self.build_from(root)
    }

    /// Build the tree rooted at `root`, which is treated as the root
    /// element: it always establishes a context and is never classified.
    ///
    /// # Errors
    ///
    /// Any error raised while resolving or classifying a descendant.
    pub fn build_from(
        &mut self,
        root: NodeId,
    ) -> Result<StackingContext<P::Primitive>, StackingError> {
        let style = self.resolver.resolve(root)?;
        self.build_context(root, &style, StackingContextReason::Root)
    }

    /// Give the painter back.
    pub fn into_painter(self) -> P {
        self.painter
    }

    fn build_context(
        &mut self,
        owner: NodeId,
        style: &ComputedStyle,
        reason: StackingContextReason,
    ) -> Result<StackingContext<P::Primitive>, StackingError> {
        let tag_name = self
            .tree
            .as_element(owner)
            .map(|element| element.tag_name.clone())
            .ok_or(StackingError::NotAnElement { node: owner })?;

        #[cfg(feature = "stacking-trace")]
        let _depth = TraceDepth::enter(owner, &tag_name, reason);

        // STEP 1: Enter.
        // "the background and borders of the element forming the stacking
        // context."
        let mut pending = PendingLayers::new();
        if !style.display_none {
            let primitives = self.painter.paint_element(self.tree, owner, style);
            pending.push(LayerName::RootBackgroundAndBorders, LayerEntry::paint(owner, primitives));

            // STEP 2: Classify and place every descendant of this context.
            self.place_descendants(owner, style, &mut pending)?;
        }

        // STEP 3: Finalize.
        let layers = pending.finalize()?;

        #[cfg(feature = "stacking-trace")]
        eprintln!("[STACKING EXIT] <{tag_name}> {owner:?} entries={}", layers.len());

        Ok(StackingContext {
            owner,
            tag_name,
            reason,
            z_index: style.z_index,
            opacity: style.opacity,
            layers,
        })
    }

    /// Place every descendant of the context owner `owner` into `pending`,
    /// in pre-order and source order.
    ///
    /// Descent through flat boxes uses an explicit work stack, so deeply
    /// nested markup costs heap rather than native stack. Only nested
    /// contexts recurse.
    fn place_descendants(
        &mut self,
        owner: NodeId,
        owner_style: &ComputedStyle,
        pending: &mut PendingLayers<P::Primitive>,
    ) -> Result<(), StackingError> {
        let tree = self.tree;
        let mut work = Vec::new();
        push_children(
            &mut work,
            tree,
            owner,
            &Rc::new(owner_style.clone()),
            LayerName::InFlowInlines,
        );

        while let Some(item) = work.pop() {
            let Some(node) = tree.get(item.node) else {
                continue;
            };
            match &node.kind {
                NodeKind::Element(_) => {
                    if let Some((style, text_layer)) = self.place_element(&item, pending)? {
                        push_children(&mut work, tree, item.node, &style, text_layer);
                    }
                }
                NodeKind::Text(text) if !text.text.trim().is_empty() => {
                    let primitives = self.painter.paint_text(tree, item.node);
                    pending.push(item.text_layer, LayerEntry::paint(item.node, primitives));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Place one element. When its children still belong to the current
    /// context, returns the style their placement is judged against and the
    /// layer their text paints in. Returns `None` when they do not
    /// (`display: none`, or the element started a nested context).
    fn place_element(
        &mut self,
        item: &WorkItem,
        pending: &mut PendingLayers<P::Primitive>,
    ) -> Result<Option<(Rc<ComputedStyle>, LayerName)>, StackingError> {
        let node = item.node;
        let style = self.resolver.resolve(node)?;
        // [§ 2.6](https://www.w3.org/TR/css-display-3/#valdef-display-none)
        //
        // "The element and its descendants generate no boxes or text runs."
        if style.display_none {
            return Ok(None);
        }

        // [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#valdef-display-contents)
        //
        // "The element itself does not generate any boxes, but its children
        // and pseudo-elements still generate boxes and text runs as normal."
        // The element is neither classified nor painted; its children are
        // placed as children of its parent box.
        if style.display_contents {
            #[cfg(feature = "stacking-trace")]
            eprintln!("[STACKING PLACE] {node:?} -> contents");

            return Ok(Some((Rc::clone(&item.parent_style), item.text_layer)));
        }

        match classify(node, &style, Some(&item.parent_style))? {
            Placement::Nested {
                layer,
                stack_level,
                reason,
            } => {
                #[cfg(feature = "stacking-trace")]
                eprintln!("[STACKING PLACE] {node:?} -> {layer} (nested, z={stack_level})");

                let context = self.build_context(node, &style, reason)?;
                pending.push(layer, LayerEntry::context(context, stack_level));
                Ok(None)
            }
            Placement::Flat(layer) => {
                #[cfg(feature = "stacking-trace")]
                eprintln!("[STACKING PLACE] {node:?} -> {layer}");

                let primitives = self.painter.paint_element(self.tree, node, &style);
                pending.push(layer, LayerEntry::paint(node, primitives));

                // Inline content of a block box paints with the other inline
                // content (step 5); everywhere else it stays with its box.
                let text_layer = match layer {
                    LayerName::InFlowBlocks => LayerName::InFlowInlines,
                    other => other,
                };
                Ok(Some((Rc::new(style), text_layer)))
            }
        }
    }
}

/// One node waiting to be placed.
struct WorkItem {
    node: NodeId,
    /// Style of the node's parent element.
    parent_style: Rc<ComputedStyle>,
    /// Layer that text children of the parent paint in.
    text_layer: LayerName,
}

/// Queue the children of `parent` so they pop in source order.
fn push_children(
    work: &mut Vec<WorkItem>,
    tree: &DomTree,
    parent: NodeId,
    parent_style: &Rc<ComputedStyle>,
    text_layer: LayerName,
) {
    work.extend(tree.children(parent).iter().rev().map(|&node| WorkItem {
        node,
        parent_style: Rc::clone(parent_style),
        text_layer,
    }));
}

/// Build the stacking tree of `tree`'s document element.
///
/// # Errors
///
/// See [`StackingTreeBuilder::build`].
pub fn build_stacking_tree<R, P>(
    tree: &DomTree,
    resolver: &R,
    painter: P,
) -> Result<StackingContext<P::Primitive>, StackingError>
where
    R: StyleResolver + ?Sized,
    P: NodePainter,
{
    StackingTreeBuilder::new(tree, resolver, painter).build()
}
