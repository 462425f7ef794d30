//! SVG output for the Strata converter.
//!
//! # Scope
//!
//! This crate implements:
//! - **Painting** - [`SvgPainter`] turns each placed node into vector
//!   [`Primitive`]s: backgrounds, borders, images, and text
//! - **Resource inlining** - [`inline_resources`] fetches images in parallel
//!   and embeds them as `data:` URLs
//! - **Serialization** - [`to_svg`] writes a stacking tree as nested groups
//!   in paint order
//! - **Pipeline** - [`convert`] runs all of the above on a snapshot
//!
//! # Not Implemented
//!
//! - Rounded corners, shadows, gradients, and non-solid border styles
//! - Clipping for `overflow`, `clip-path`, and masks (the context is still
//!   formed, but its content is not clipped)
//! - Transforms and filters on the emitted groups

mod convert;
mod error;
mod inline;
mod primitive;
mod serialize;
mod walker;

pub use convert::{ConvertOptions, build_layers, convert};
pub use error::{ConvertError, SvgError};
pub use inline::{InlineReport, inline_resources};
pub use primitive::{FontAttributes, Primitive};
pub use serialize::to_svg;
pub use walker::SvgPainter;
