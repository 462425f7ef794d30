//! Vector drawing primitives.
//!
//! Each primitive maps onto one SVG element. Coordinates are CSS pixels in
//! the document's initial containing block, the same space the snapshot's
//! border boxes are reported in.

use serde::Serialize;

/// One drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Primitive {
    /// A filled rectangle: backgrounds and border sides.
    Rect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color, as a CSS color string.
        fill: String,
    },
    /// A raster or vector image stretched over a box.
    Image {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Image reference: a URL, a path, or a `data:` URL once inlined.
        href: String,
    },
    /// A run of text, positioned by the top-left of its line box.
    Text {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// The text, with white space collapsed.
        text: String,
        /// Text color.
        fill: String,
        /// Font attributes copied from the parent element.
        font: FontAttributes,
    },
}

impl Primitive {
    /// The image reference, if this is an image.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Image { href, .. } => Some(href),
            Self::Rect { .. } | Self::Text { .. } => None,
        }
    }
}

/// Font properties carried onto a text primitive. `None` leaves the SVG
/// attribute unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontAttributes {
    /// `font-family`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// `font-size`, e.g. `16px`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// `font-weight`, e.g. `700`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// `font-style`, e.g. `italic`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}
