//! SVG serialization of a stacking tree.
//!
//! [SVG 2 § 3.4 Painting order](https://www.w3.org/TR/SVG2/render.html#PaintersModel)
//!
//! "Elements in an SVG document fragment have an implicit drawing order,
//! with the first elements in the SVG document fragment getting 'painted'
//! first." The stacking tree is already in paint order, so it is written
//! out depth first with no reordering:
//!
//! ```text
//! <svg>
//!   <g data-stacking-context="html">          one per context
//!     <g data-stacking-layer="in-flow-blocks"> one per non-empty layer
//!       <g data-element="div"> ... </g>        one per painted element
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use strata_css::{EntryContent, LayerEntry, StackingContext};
use strata_dom::{DomTree, Viewport};

use crate::error::SvgError;
use crate::primitive::Primitive;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serialize `root` as a standalone SVG document sized to `viewport`.
///
/// `tree` supplies tag names and ids for element groups.
///
/// # Errors
///
/// Returns [`SvgError`] if the XML writer fails.
pub fn to_svg(
    root: &StackingContext<Primitive>,
    viewport: Viewport,
    tree: &DomTree,
) -> Result<String, SvgError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut svg = SvgWriter {
        writer: &mut writer,
        tree,
    };
    svg.write_document(root, viewport)?;
    String::from_utf8(writer.into_inner()).map_err(SvgError::from)
}

/// Format a coordinate without a trailing `.0`.
fn number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

struct SvgWriter<'w, 't> {
    writer: &'w mut Writer<Vec<u8>>,
    tree: &'t DomTree,
}

impl SvgWriter<'_, '_> {
    fn event(&mut self, event: Event<'_>) -> Result<(), SvgError> {
        self.writer
            .write_event(event)
            .map_err(|err| SvgError::Xml(err.to_string()))
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), SvgError> {
        self.event(Event::Start(element))
    }

    fn end(&mut self, name: &str) -> Result<(), SvgError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn write_document(
        &mut self,
        root: &StackingContext<Primitive>,
        viewport: Viewport,
    ) -> Result<(), SvgError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        // [SVG 2 § 8.2 The initial viewport](https://www.w3.org/TR/SVG2/coords.html#InitialViewport)
        let width = number(viewport.width);
        let height = number(viewport.height);
        let view_box = format!("0 0 {width} {height}");
        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", SVG_NAMESPACE));
        svg.push_attribute(("width", width.as_str()));
        svg.push_attribute(("height", height.as_str()));
        svg.push_attribute(("viewBox", view_box.as_str()));
        self.start(svg)?;

        self.write_context(root)?;

        self.end("svg")
    }

    fn write_context(&mut self, context: &StackingContext<Primitive>) -> Result<(), SvgError> {
        let mut group = BytesStart::new("g");
        group.push_attribute(("data-stacking-context", context.tag_name.as_str()));
        group.push_attribute(("data-stacking-reason", context.reason.as_ref()));
        if let Some(level) = context.z_index.integer() {
            group.push_attribute(("data-z-index", level.to_string().as_str()));
        }
        // [Compositing 1 § 3.1](https://www.w3.org/TR/compositing-1/#csscompositingrules_SVG)
        //
        // Group opacity applies to the context as a whole, after its
        // content is composited.
        if context.opacity < 1.0 {
            group.push_attribute(("opacity", number(context.opacity).as_str()));
        }
        self.start(group)?;

        for layer in context.layers.layers().filter(|layer| !layer.is_empty()) {
            let mut layer_group = BytesStart::new("g");
            layer_group.push_attribute(("data-stacking-layer", layer.name().as_ref()));
            self.start(layer_group)?;
            for entry in layer.entries() {
                self.write_entry(entry)?;
            }
            self.end("g")?;
        }

        self.end("g")
    }

    fn write_entry(&mut self, entry: &LayerEntry<Primitive>) -> Result<(), SvgError> {
        match &entry.content {
            EntryContent::Context { context } => self.write_context(context),
            EntryContent::Paint { primitives } if primitives.is_empty() => Ok(()),
            EntryContent::Paint { primitives } => match self.tree.as_element(entry.node) {
                Some(element) => {
                    let mut group = BytesStart::new("g");
                    group.push_attribute(("data-element", element.tag_name.as_str()));
                    if let Some(id) = element.id() {
                        group.push_attribute(("data-id", id));
                    }
                    self.start(group)?;
                    for primitive in primitives {
                        self.write_primitive(primitive)?;
                    }
                    self.end("g")
                }
                None => primitives
                    .iter()
                    .try_for_each(|primitive| self.write_primitive(primitive)),
            },
        }
    }

    fn write_primitive(&mut self, primitive: &Primitive) -> Result<(), SvgError> {
        match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                let mut rect = BytesStart::new("rect");
                push_box(&mut rect, *x, *y, *width, *height);
                rect.push_attribute(("fill", fill.as_str()));
                self.event(Event::Empty(rect))
            }
            Primitive::Image {
                x,
                y,
                width,
                height,
                href,
            } => {
                let mut image = BytesStart::new("image");
                push_box(&mut image, *x, *y, *width, *height);
                image.push_attribute(("href", href.as_str()));
                image.push_attribute(("preserveAspectRatio", "none"));
                self.event(Event::Empty(image))
            }
            Primitive::Text {
                x,
                y,
                text,
                fill,
                font,
            } => {
                let mut element = BytesStart::new("text");
                element.push_attribute(("x", number(*x).as_str()));
                element.push_attribute(("y", number(*y).as_str()));
                element.push_attribute(("fill", fill.as_str()));
                element.push_attribute(("dominant-baseline", "text-before-edge"));
                let fonts = [
                    ("font-family", &font.family),
                    ("font-size", &font.size),
                    ("font-weight", &font.weight),
                    ("font-style", &font.style),
                ];
                for (name, value) in fonts {
                    if let Some(value) = value {
                        element.push_attribute((name, value.as_str()));
                    }
                }
                if text.starts_with(' ') || text.ends_with(' ') {
                    element.push_attribute(("xml:space", "preserve"));
                }
                self.start(element)?;
                self.event(Event::Text(BytesText::new(text)))?;
                self.end("text")
            }
        }
    }
}

fn push_box(element: &mut BytesStart<'_>, x: f32, y: f32, width: f32, height: f32) {
    element.push_attribute(("x", number(x).as_str()));
    element.push_attribute(("y", number(y).as_str()));
    element.push_attribute(("width", number(width).as_str()));
    element.push_attribute(("height", number(height).as_str()));
}
