//! Styled node tree for the Strata converter.
//!
//! A layout engine hands Strata a *snapshot*: every node of the rendered
//! document, with the computed style values and border-box geometry it had at
//! capture time. This crate stores that snapshot as an arena-based tree
//! following the [DOM Living Standard](https://dom.spec.whatwg.org/) node
//! model.
//!
//! # Design
//!
//! Nodes live in one vector and refer to each other by [`NodeId`]. Ownership
//! flows from the root to the children; the `parent` link is a lookup index
//! and never owns anything. Children are kept in source order, which is the
//! tie-break for every paint-order decision downstream.

mod snapshot;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use snapshot::{SnapshotError, load};

/// Map of CSS property names to computed values, e.g. `"z-index" => "auto"`.
pub type PropertyMap = HashMap<String, String>;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// An axis-aligned rectangle in CSS pixels (the border box reported by layout).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Whether the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The rendering surface a document was captured from.
///
/// A document without a view (a detached or never-displayed document) has no
/// computed style, so nothing in it can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Surface width in CSS pixels.
    pub width: f32,
    /// Surface height in CSS pixels.
    pub height: f32,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// One node of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub kind: NodeKind,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// Children in source order.
    pub children: Vec<NodeId>,
}

/// The kind of a node. Only elements take part in stacking.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document node; always [`NodeId::ROOT`].
    Document,
    /// An element with its computed style and geometry.
    Element(ElementData),
    /// A run of text with its geometry.
    Text(TextData),
    /// A comment or any other node that renders nothing.
    Other,
}

/// Element payload.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lowercase local name, e.g. `div`.
    pub tag_name: String,
    /// Content attributes (`src`, `id`, ...).
    pub attrs: AttributesMap,
    /// Computed values keyed by property name. Properties that are absent
    /// take their initial value.
    pub style: PropertyMap,
    /// Border box, if the element generated one.
    pub bounds: Option<Rect>,
}

impl ElementData {
    /// Create element data with the given tag and computed properties.
    #[must_use]
    pub fn new(tag_name: &str, style: &[(&str, &str)]) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            style: style
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Set the border box.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Add one attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// The computed value of `property`, if the snapshot recorded one.
    #[must_use]
    pub fn property(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// The element's `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }
}

/// Text payload.
#[derive(Debug, Clone, Default)]
pub struct TextData {
    /// The rendered text.
    pub text: String,
    /// Bounding box of the text run, if layout reported one.
    pub bounds: Option<Rect>,
}

/// Arena-based tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes, indexed by [`NodeId`]. The Document is at index 0.
    nodes: Vec<Node>,
    /// The surface the snapshot was captured from, if any.
    view: Option<Viewport>,
}

impl DomTree {
    /// Create a tree holding just the Document node, with no view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            view: None,
        }
    }

    /// Create an empty tree attached to a view of the given size.
    #[must_use]
    pub fn with_view(width: f32, height: f32) -> Self {
        let mut tree = Self::new();
        tree.view = Some(Viewport { width, height });
        tree
    }

    /// The Document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The view the document is displayed in, if any.
    #[must_use]
    pub const fn view(&self) -> Option<Viewport> {
        self.view
    }

    /// Attach or detach the view.
    pub fn set_view(&mut self, view: Option<Viewport>) {
        self.view = view;
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, the Document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a tree built with [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node and return its id.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either id was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(child.0 < self.nodes.len(), "append_child: unknown child {child:?}");
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate an element and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.alloc(NodeKind::Element(data));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text node and append it under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str, bounds: Option<Rect>) -> NodeId {
        let id = self.alloc(NodeKind::Text(TextData {
            text: text.to_string(),
            bounds,
        }));
        self.append_child(parent, id);
        id
    }

    /// The parent of a node; `None` for the Document.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Children of a node in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Element payload, if `id` is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|node| match &node.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element payload, if `id` is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(|node| match &mut node.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Text payload, if `id` is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&TextData> {
        self.get(id).and_then(|node| match &node.kind {
            NodeKind::Text(data) => Some(data),
            _ => None,
        })
    }

    /// Whether `id` is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.as_element(id).is_some()
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.is_element(id))
    }

    /// The nearest ancestor that is an element.
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&ancestor| self.is_element(ancestor))
    }

    /// Ancestors of a node, from parent to Document.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Every node under (and including) `id`, depth-first pre-order.
    #[must_use]
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Depth-first, pre-order iterator; children are visited in source order.
#[derive(Debug)]
pub struct Preorder<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}
