//! The seven paint-order layers of a stacking context.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! A context's layers move through two states. [`PendingLayers`] accepts
//! entries while the builder walks the context's subtree; [`PendingLayers::finalize`]
//! sorts the z-index layers and hands back a [`LayerSet`], which has no
//! mutating API at all.

use serde::Serialize;
use strata_dom::NodeId;
use strum_macros::{AsRefStr, Display, EnumString};

use super::order::sort_by_stack_level;
use super::predicate::StackingContextReason;
use crate::StackingError;
use crate::style::ZIndex;

/// [§ Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
///
/// "Within each stacking context, the following layers are painted in
/// back-to-front order". Variants are declared in that order, so the derived
/// `Ord` is paint order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LayerName {
    /// "the background and borders of the element forming the stacking context."
    RootBackgroundAndBorders,
    /// "the child stacking contexts with negative stack levels (most negative
    /// first)."
    NegativeStackLevels,
    /// "the in-flow, non-inline-level, non-positioned descendants."
    InFlowBlocks,
    /// "the non-positioned floats."
    NonPositionedFloats,
    /// "the in-flow, inline-level, non-positioned descendants, including inline
    /// tables and inline blocks."
    InFlowInlines,
    /// "the child stacking contexts with stack level 0 and the positioned
    /// descendants with stack level 0."
    ZeroStackLevel,
    /// "the child stacking contexts with positive stack levels (least positive
    /// first)."
    PositiveStackLevels,
}

impl LayerName {
    /// Every layer, in paint order.
    pub const ALL: [Self; 7] = [
        Self::RootBackgroundAndBorders,
        Self::NegativeStackLevels,
        Self::InFlowBlocks,
        Self::NonPositionedFloats,
        Self::InFlowInlines,
        Self::ZeroStackLevel,
        Self::PositiveStackLevels,
    ];

    /// Zero-based position in paint order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The layer's number in Appendix E, 1 through 7.
    #[must_use]
    pub const fn number(self) -> usize {
        self.index() + 1
    }

    /// Whether entries of this layer are reordered by stack level when the
    /// layer set is finalized. Every other layer keeps traversal order.
    #[must_use]
    pub const fn is_sorted(self) -> bool {
        matches!(self, Self::NegativeStackLevels | Self::PositiveStackLevels)
    }
}

/// What an entry paints: the element's own primitives, or a whole nested
/// stacking context as one opaque unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EntryContent<P> {
    /// Primitives produced for a single node.
    Paint {
        /// Drawing primitives in emission order.
        primitives: Vec<P>,
    },
    /// A child stacking context.
    Context {
        /// The finalized child context.
        context: Box<StackingContext<P>>,
    },
}

/// One item of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerEntry<P> {
    /// The node the entry was produced for. For a nested context, this is the
    /// element that established it.
    pub node: NodeId,
    /// Stack level used to order layers 2 and 7.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<i32>,
    /// What the entry paints.
    #[serde(flatten)]
    pub content: EntryContent<P>,
}

impl<P> LayerEntry<P> {
    /// An entry holding a node's own primitives.
    #[must_use]
    pub fn paint(node: NodeId, primitives: Vec<P>) -> Self {
        Self {
            node,
            sort_key: None,
            content: EntryContent::Paint { primitives },
        }
    }

    /// An entry holding a finalized child context at `stack_level`.
    #[must_use]
    pub fn context(context: StackingContext<P>, stack_level: i32) -> Self {
        Self {
            node: context.owner,
            sort_key: Some(stack_level),
            content: EntryContent::Context {
                context: Box::new(context),
            },
        }
    }

    /// The nested context, if this entry is one.
    #[must_use]
    pub fn as_context(&self) -> Option<&StackingContext<P>> {
        match &self.content {
            EntryContent::Context { context } => Some(context),
            EntryContent::Paint { .. } => None,
        }
    }

    /// The node's own primitives; empty for a nested context.
    #[must_use]
    pub fn primitives(&self) -> &[P] {
        match &self.content {
            EntryContent::Paint { primitives } => primitives,
            EntryContent::Context { .. } => &[],
        }
    }

    fn map<Q>(self, f: &mut impl FnMut(P) -> Q) -> LayerEntry<Q> {
        let content = match self.content {
            EntryContent::Paint { primitives } => EntryContent::Paint {
                primitives: primitives.into_iter().map(&mut *f).collect(),
            },
            EntryContent::Context { context } => EntryContent::Context {
                context: Box::new((*context).map(&mut *f)),
            },
        };
        LayerEntry {
            node: self.node,
            sort_key: self.sort_key,
            content,
        }
    }
}

/// One named, ordered container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer<P> {
    name: LayerName,
    entries: Vec<LayerEntry<P>>,
}

impl<P> Layer<P> {
    const fn new(name: LayerName) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Which layer this is.
    #[must_use]
    pub const fn name(&self) -> LayerName {
        self.name
    }

    /// Entries in paint order.
    #[must_use]
    pub fn entries(&self) -> &[LayerEntry<P>] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layer has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes of the entries, in paint order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|entry| entry.node)
    }
}

/// The seven layers of a context that is still being populated.
#[derive(Debug)]
pub struct PendingLayers<P> {
    layers: [Layer<P>; 7],
}

impl<P> PendingLayers<P> {
    /// Seven empty layers in declaration order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: LayerName::ALL.map(Layer::new),
        }
    }

    /// Append an entry to the end of `layer`.
    pub fn push(&mut self, layer: LayerName, entry: LayerEntry<P>) {
        self.layers[layer.index()].entries.push(entry);
    }

    /// Stable-sort layers 2 and 7 by stack level and freeze the set.
    ///
    /// # Errors
    ///
    /// [`StackingError::MissingSortKey`] if an entry of a sorted layer has no
    /// stack level.
    pub fn finalize(mut self) -> Result<LayerSet<P>, StackingError> {
        for layer in &mut self.layers {
            if layer.name.is_sorted() {
                sort_by_stack_level(layer.name, &mut layer.entries)?;
            }
        }
        Ok(LayerSet {
            layers: self.layers,
        })
    }
}

impl<P> Default for PendingLayers<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// The finalized layers of one stacking context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LayerSet<P> {
    layers: [Layer<P>; 7],
}

impl<P> LayerSet<P> {
    /// The named layer.
    #[must_use]
    pub const fn get(&self, name: LayerName) -> &Layer<P> {
        &self.layers[name.index()]
    }

    /// All seven layers in paint order, empty ones included.
    pub fn layers(&self) -> impl Iterator<Item = &Layer<P>> {
        self.layers.iter()
    }

    /// Total number of entries across all layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// Whether every layer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Layer::is_empty)
    }

    /// The layer holding `node`'s entry, if `node` was placed directly in
    /// this set.
    #[must_use]
    pub fn layer_of(&self, node: NodeId) -> Option<LayerName> {
        self.layers
            .iter()
            .find(|layer| layer.entries.iter().any(|entry| entry.node == node))
            .map(|layer| layer.name)
    }

    fn map<Q>(self, f: &mut impl FnMut(P) -> Q) -> LayerSet<Q> {
        LayerSet {
            layers: self.layers.map(|layer| Layer {
                name: layer.name,
                entries: layer
                    .entries
                    .into_iter()
                    .map(|entry| entry.map(&mut *f))
                    .collect(),
            }),
        }
    }
}

/// [§ Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
///
/// "Each box belongs to one stacking context. Each positioned box in a given
/// stacking context has an integer stack level, which is its position on the
/// z-axis relative to other stack levels within the same stacking context."
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackingContext<P> {
    /// The element that establishes the context.
    pub owner: NodeId,
    /// The owner's tag name.
    pub tag_name: String,
    /// The first rule that made the owner establish a context.
    pub reason: StackingContextReason,
    /// The owner's computed `z-index`.
    pub z_index: ZIndex,
    /// The owner's computed `opacity`, applied to the context as a group.
    pub opacity: f32,
    /// The finalized layers.
    pub layers: LayerSet<P>,
}

impl<P> StackingContext<P> {
    /// Rebuild the tree with every primitive passed through `f`, in paint
    /// order. Structure and ordering are unchanged.
    #[must_use]
    pub fn map<Q>(self, f: &mut impl FnMut(P) -> Q) -> StackingContext<Q> {
        StackingContext {
            owner: self.owner,
            tag_name: self.tag_name,
            reason: self.reason,
            z_index: self.z_index,
            opacity: self.opacity,
            layers: self.layers.map(f),
        }
    }

    /// Nested contexts directly inside this one, in paint order.
    pub fn child_contexts(&self) -> impl Iterator<Item = &Self> {
        self.layers
            .layers()
            .flat_map(|layer| layer.entries.iter())
            .filter_map(LayerEntry::as_context)
    }

    /// Number of contexts in the tree, this one included.
    #[must_use]
    pub fn context_count(&self) -> usize {
        1 + self
            .child_contexts()
            .map(Self::context_count)
            .sum::<usize>()
    }

    /// Every primitive in the tree, in paint order.
    #[must_use]
    pub fn primitives(&self) -> Vec<&P> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    fn collect_primitives<'a>(&'a self, out: &mut Vec<&'a P>) {
        for entry in self.layers.layers().flat_map(|layer| layer.entries.iter()) {
            match &entry.content {
                EntryContent::Paint { primitives } => out.extend(primitives),
                EntryContent::Context { context } => context.collect_primitives(out),
            }
        }
    }
}
