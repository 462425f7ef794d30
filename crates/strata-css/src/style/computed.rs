//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! A snapshot already holds computed values as strings. This module turns
//! the ones stacking depends on into typed fields; every other property in
//! the map is left for the painter to read directly.

use strata_common::warning::warn_once;
use strata_dom::PropertyMap;

use super::display::{DisplayValue, is_display_contents, is_display_none, parse_display_value};
use super::values::{
    Containment, Float, Isolation, MixBlendMode, OverflowScrolling, Position, ZIndex,
    parse_contain, parse_none_or_value, parse_opacity, parse_will_change,
};

/// The stacking-relevant computed values of one element.
///
/// Absent properties hold their initial value, so a default record is the
/// style of an element with nothing set.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    ///
    /// Ignored when [`Self::display_none`] or [`Self::display_contents`] is
    /// set.
    pub display: DisplayValue,

    /// [§ 2.6 display: none](https://www.w3.org/TR/css-display-3/#valdef-display-none)
    ///
    /// "The element and its descendants generate no boxes or text runs."
    pub display_none: bool,

    /// [§ 2.5 display: contents](https://www.w3.org/TR/css-display-3/#valdef-display-contents)
    ///
    /// The element generates no box of its own; its children are laid out
    /// and painted as children of its parent.
    pub display_contents: bool,

    /// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    pub position: Position,

    /// [§ 9.9.1 'z-index'](https://www.w3.org/TR/CSS2/visuren.html#z-index)
    pub z_index: ZIndex,

    /// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    pub float: Float,

    /// [§ 13.2 'opacity'](https://www.w3.org/TR/css-color-4/#transparency)
    ///
    /// Clamped to `[0, 1]`. Initial: 1.
    pub opacity: f32,

    /// [§ 3.2 'mix-blend-mode'](https://www.w3.org/TR/compositing-1/#mix-blend-mode)
    pub mix_blend_mode: MixBlendMode,

    /// [CSS Transforms 1 § 5 'transform'](https://www.w3.org/TR/css-transforms-1/#transform-property)
    ///
    /// `None` is `transform: none`; anything else is kept as written.
    pub transform: Option<String>,

    /// [Filter Effects 1 § 5 'filter'](https://www.w3.org/TR/filter-effects-1/#FilterProperty)
    pub filter: Option<String>,

    /// [CSS Transforms 2 § 8 'perspective'](https://www.w3.org/TR/css-transforms-2/#perspective-property)
    pub perspective: Option<String>,

    /// [CSS Masking 1 § 5.1 'clip-path'](https://www.w3.org/TR/css-masking-1/#the-clip-path)
    pub clip_path: Option<String>,

    /// [CSS Masking 1 § 7.10 'mask'](https://www.w3.org/TR/css-masking-1/#the-mask)
    pub mask: Option<String>,

    /// [CSS Masking 1 § 7.1 'mask-image'](https://www.w3.org/TR/css-masking-1/#the-mask-image)
    pub mask_image: Option<String>,

    /// [CSS Masking 1 § 8.7 'mask-border'](https://www.w3.org/TR/css-masking-1/#the-mask-border)
    pub mask_border: Option<String>,

    /// [§ 3.3 'isolation'](https://www.w3.org/TR/compositing-1/#isolation)
    pub isolation: Isolation,

    /// `-webkit-overflow-scrolling`
    pub overflow_scrolling: OverflowScrolling,

    /// [CSS Containment 2 § 3 'contain'](https://www.w3.org/TR/css-contain-2/#contain-property)
    ///
    /// Empty for `contain: none`.
    pub contain: Vec<Containment>,

    /// [CSS Will Change 1 § 2 'will-change'](https://www.w3.org/TR/css-will-change-1/#will-change)
    ///
    /// Lowercase property names; empty for `will-change: auto`.
    pub will_change: Vec<String>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: DisplayValue::default(),
            display_none: false,
            display_contents: false,
            position: Position::default(),
            z_index: ZIndex::default(),
            float: Float::default(),
            opacity: 1.0,
            mix_blend_mode: MixBlendMode::default(),
            transform: None,
            filter: None,
            perspective: None,
            clip_path: None,
            mask: None,
            mask_image: None,
            mask_border: None,
            isolation: Isolation::default(),
            overflow_scrolling: OverflowScrolling::default(),
            contain: Vec::new(),
            will_change: Vec::new(),
        }
    }
}

impl ComputedStyle {
    /// Build a record from a computed property map.
    ///
    /// Property names are matched case-insensitively. A value that cannot be
    /// parsed warns once and leaves the field at its initial value.
    #[must_use]
    pub fn from_properties(properties: &PropertyMap) -> Self {
        let mut style = Self::default();
        // Apply in a fixed order so prefixed aliases lose to the standard name
        // regardless of map iteration order.
        let mut entries: Vec<(&String, &String)> = properties.iter().collect();
        entries.sort_by_key(|(name, _)| (!name.starts_with('-'), name.as_str()));
        for (name, value) in entries {
            style.apply_property(&name.to_ascii_lowercase(), value);
        }
        style
    }

    /// Apply a single computed `name: value` pair. Unknown property names
    /// are ignored; the snapshot carries every property, not just these.
    pub fn apply_property(&mut self, name: &str, value: &str) {
        match name {
            // [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
            "display" => {
                if is_display_none(value) {
                    self.display_none = true;
                    self.display_contents = false;
                } else if is_display_contents(value) {
                    self.display_none = false;
                    self.display_contents = true;
                } else if let Some(display) = parse_display_value(value) {
                    self.display_none = false;
                    self.display_contents = false;
                    self.display = display;
                } else {
                    unsupported(name, value);
                }
            }
            // [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
            //
            // "Value: static | relative | absolute | fixed | inherit"
            "position" => match value.trim().parse() {
                Ok(position) => self.position = position,
                Err(_) => unsupported(name, value),
            },
            // [§ 9.9.1 'z-index'](https://www.w3.org/TR/CSS2/visuren.html#z-index)
            //
            // "Value: auto | <integer> | inherit"
            "z-index" => match ZIndex::parse(value) {
                Some(z_index) => self.z_index = z_index,
                None => unsupported(name, value),
            },
            // [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
            //
            // "Value: left | right | none | inherit"
            "float" => match value.trim().parse() {
                Ok(float) => self.float = float,
                Err(_) => unsupported(name, value),
            },
            "opacity" => match parse_opacity(value) {
                Some(opacity) => self.opacity = opacity,
                None => unsupported(name, value),
            },
            "mix-blend-mode" => match value.trim().parse() {
                Ok(mode) => self.mix_blend_mode = mode,
                Err(_) => unsupported(name, value),
            },
            "transform" | "-webkit-transform" => self.transform = parse_none_or_value(value),
            "filter" | "-webkit-filter" => self.filter = parse_none_or_value(value),
            "perspective" | "-webkit-perspective" => self.perspective = parse_none_or_value(value),
            "clip-path" | "-webkit-clip-path" => self.clip_path = parse_none_or_value(value),
            "mask" | "-webkit-mask" => self.mask = parse_none_or_value(value),
            "mask-image" | "-webkit-mask-image" => self.mask_image = parse_none_or_value(value),
            "mask-border" | "-webkit-mask-box-image" => {
                self.mask_border = parse_none_or_value(value);
            }
            "isolation" => match value.trim().parse() {
                Ok(isolation) => self.isolation = isolation,
                Err(_) => unsupported(name, value),
            },
            "-webkit-overflow-scrolling" | "overflow-scrolling" => match value.trim().parse() {
                Ok(scrolling) => self.overflow_scrolling = scrolling,
                Err(_) => unsupported(name, value),
            },
            "contain" => match parse_contain(value) {
                Some(contain) => self.contain = contain,
                None => unsupported(name, value),
            },
            "will-change" => self.will_change = parse_will_change(value),
            _ => {}
        }
    }

    /// [§ 9.3.1](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    ///
    /// "An element is said to be positioned if its 'position' property has a
    /// value other than 'static'."
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.position != Position::Static
    }
}

fn unsupported(property: &str, value: &str) {
    warn_once("CSS", &format!("unsupported {property} value '{}'", value.trim()));
}
