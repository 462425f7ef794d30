//! JSON snapshot loading.
//!
//! A snapshot is what a layout engine (or a browser extension calling
//! `getComputedStyle` and `getBoundingClientRect` on every node) writes out:
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "root": {
//!     "type": "element",
//!     "tag": "html",
//!     "style": { "display": "block" },
//!     "bounds": { "x": 0, "y": 0, "width": 800, "height": 600 },
//!     "children": [{ "type": "text", "text": "Hello" }]
//!   }
//! }
//! ```
//!
//! A missing or `null` viewport means the document had no view when it was
//! captured.
//!
//! Nodes are written into the arena while the JSON is read, so nesting depth
//! is bounded by memory rather than by the parser's recursion limit.

use std::fmt;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use thiserror::Error;

use crate::{AttributesMap, DomTree, ElementData, NodeId, NodeKind, PropertyMap, Rect, TextData};

/// Errors produced while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The input is not valid snapshot JSON.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level node must be the document element.
    #[error("snapshot root must be an element, found {0}")]
    RootNotElement(&'static str),
}

const NODE_TYPES: &[&str] = &["element", "text", "comment"];

/// Parse JSON straight into a tree. The root node becomes the document
/// element under an implicit Document node.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] for malformed input and
/// [`SnapshotError::RootNotElement`] if the root is not an element.
pub fn load(json: &str) -> Result<DomTree, SnapshotError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let tree = DocumentSeed.deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;

    let root = tree.children(NodeId::ROOT).first().and_then(|&id| tree.get(id));
    let found = match root.map(|node| &node.kind) {
        Some(NodeKind::Element(_)) => None,
        Some(NodeKind::Text(_)) => Some("text"),
        _ => Some("comment"),
    };
    match found {
        None => Ok(tree),
        Some(kind) => Err(SnapshotError::RootNotElement(kind)),
    }
}

/// `{ "viewport": ..., "root": ... }`
struct DocumentSeed;

impl<'de> DeserializeSeed<'de> for DocumentSeed {
    type Value = DomTree;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<DomTree, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for DocumentSeed {
    type Value = DomTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snapshot object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DomTree, A::Error> {
        let mut tree = DomTree::new();
        let mut has_root = false;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "viewport" => tree.set_view(map.next_value()?),
                "root" if has_root => return Err(de::Error::duplicate_field("root")),
                "root" => {
                    map.next_value_seed(NodeSeed {
                        tree: &mut tree,
                        parent: NodeId::ROOT,
                    })?;
                    has_root = true;
                }
                _ => {
                    let _: IgnoredAny = map.next_value()?;
                }
            }
        }
        if !has_root {
            return Err(de::Error::missing_field("root"));
        }
        Ok(tree)
    }
}

/// One captured node, appended under `parent` as soon as it opens so its
/// children can be attached while they are read.
struct NodeSeed<'a> {
    tree: &'a mut DomTree,
    parent: NodeId,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = ();

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snapshot node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let id = self.tree.alloc(NodeKind::Other);
        self.tree.append_child(self.parent, id);

        let mut node_type: Option<String> = None;
        let mut tag: Option<String> = None;
        let mut text: Option<String> = None;
        let mut attributes = AttributesMap::new();
        let mut style = PropertyMap::new();
        let mut bounds: Option<Rect> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "type" => node_type = Some(map.next_value()?),
                "tag" => tag = Some(map.next_value()?),
                "text" => text = Some(map.next_value()?),
                "attributes" => attributes = map.next_value()?,
                "style" => style = map.next_value()?,
                "bounds" => bounds = map.next_value()?,
                "children" => map.next_value_seed(ChildrenSeed {
                    tree: &mut *self.tree,
                    parent: id,
                })?,
                _ => {
                    let _: IgnoredAny = map.next_value()?;
                }
            }
        }

        let kind = match node_type.as_deref() {
            Some("element") => NodeKind::Element(ElementData {
                tag_name: tag
                    .ok_or_else(|| de::Error::missing_field("tag"))?
                    .to_ascii_lowercase(),
                attrs: attributes,
                style: style
                    .into_iter()
                    .map(|(name, value)| (name.to_ascii_lowercase(), value))
                    .collect(),
                bounds,
            }),
            Some("text") => NodeKind::Text(TextData {
                text: text.ok_or_else(|| de::Error::missing_field("text"))?,
                bounds,
            }),
            Some("comment") => NodeKind::Other,
            Some(other) => return Err(de::Error::unknown_variant(other, NODE_TYPES)),
            None => return Err(de::Error::missing_field("type")),
        };
        if !matches!(kind, NodeKind::Element(_)) && !self.tree.children(id).is_empty() {
            return Err(de::Error::custom("only element nodes may have children"));
        }
        if let Some(node) = self.tree.nodes.get_mut(id.0) {
            node.kind = kind;
        }
        Ok(())
    }
}

/// A `children` array, appended to `parent` in source order.
struct ChildrenSeed<'a> {
    tree: &'a mut DomTree,
    parent: NodeId,
}

impl<'de> DeserializeSeed<'de> for ChildrenSeed<'_> {
    type Value = ();

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for ChildrenSeed<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of snapshot nodes")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let parent = self.parent;
        while seq
            .next_element_seed(NodeSeed {
                tree: &mut *self.tree,
                parent,
            })?
            .is_some()
        {}
        Ok(())
    }
}
