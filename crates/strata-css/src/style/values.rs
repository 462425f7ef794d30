//! Keyword and numeric value types for the stacking-relevant properties.
//!
//! - [CSS 2.1 § 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
//! - [CSS 2.1 § 9.9.1 'z-index'](https://www.w3.org/TR/CSS2/visuren.html#z-index)
//! - [CSS Color 4 § 13.2 'opacity'](https://www.w3.org/TR/css-color-4/#transparency)
//! - [Compositing and Blending 1](https://www.w3.org/TR/compositing-1/)
//! - [CSS Containment 2 § 3 'contain'](https://www.w3.org/TR/css-contain-2/#contain-property)
//! - [CSS Will Change 1 § 2 'will-change'](https://www.w3.org/TR/css-will-change-1/#will-change)

use std::fmt;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};

/// [§ 9.3.1 Choosing a positioning scheme: 'position' property](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "An element is said to be positioned if its 'position' property has a
/// value other than 'static'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but the box is fixed with respect to some reference."
    Fixed,
    /// [CSS Positioned Layout 3 § 3.4](https://www.w3.org/TR/css-position-3/#stickypos-insets)
    ///
    /// Offset relative to the nearest scrollport.
    #[strum(to_string = "sticky", serialize = "-webkit-sticky")]
    Sticky,
}

/// [§ 9.9.1 Specifying the stack level: the 'z-index' property](https://www.w3.org/TR/CSS2/visuren.html#z-index)
///
/// "<integer>: This integer is the stack level of the generated box in the
/// current stacking context. The box also establishes a new stacking context.
///
/// auto: The stack level of the generated box in the current stacking context
/// is 0. The box does not establish a new stacking context unless it is the
/// root element."
///
/// `Auto` is a distinct value, not an alias of `Integer(0)`: only the latter
/// establishes a stacking context on a positioned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZIndex {
    /// `auto`
    #[default]
    Auto,
    /// An explicit stack level.
    Integer(i32),
}

impl ZIndex {
    /// Parse a computed `z-index`: `auto` or an integer (a leading `+` is
    /// allowed, fractions are not).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        value.parse::<i32>().ok().map(Self::Integer)
    }

    /// The integer value, or `None` for `auto`.
    #[must_use]
    pub const fn integer(self) -> Option<i32> {
        match self {
            Self::Auto => None,
            Self::Integer(level) => Some(level),
        }
    }

    /// Whether the value is `auto`.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The stack level this value gives a box: `auto` counts as 0.
    #[must_use]
    pub const fn stack_level(self) -> i32 {
        match self {
            Self::Auto => 0,
            Self::Integer(level) => level,
        }
    }
}

/// Serializes as the CSS text: the string `"auto"` or a bare integer.
impl Serialize for ZIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Integer(level) => serializer.serialize_i32(*level),
        }
    }
}

impl fmt::Display for ZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Integer(level) => write!(f, "{level}"),
        }
    }
}

/// [§ 9.5.1 Positioning the float: the 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Float {
    /// "The box is not floated."
    #[default]
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "The element generates a block box that is floated to the right."
    Right,
    /// [CSS Logical 1 § 2.1](https://drafts.csswg.org/css-logical-1/#float-clear)
    InlineStart,
    /// [CSS Logical 1 § 2.1](https://drafts.csswg.org/css-logical-1/#float-clear)
    InlineEnd,
}

impl Float {
    /// Whether the box is floated at all.
    #[must_use]
    pub const fn is_floating(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// [Compositing and Blending 1 § 3.2 'mix-blend-mode'](https://www.w3.org/TR/compositing-1/#mix-blend-mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum MixBlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    PlusDarker,
    PlusLighter,
}

/// [Compositing and Blending 1 § 3.3 'isolation'](https://www.w3.org/TR/compositing-1/#isolation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Isolation {
    /// "Elements are not isolated unless an operation is applied that
    /// causes the creation of a stacking context."
    #[default]
    Auto,
    /// "In CSS, setting 'isolation' to 'isolate' will turn the element into
    /// a stacking context."
    Isolate,
}

/// The legacy `-webkit-overflow-scrolling` property. `touch` gave the box its
/// own compositing layer, and with it a stacking context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum OverflowScrolling {
    /// Ordinary scrolling.
    #[default]
    Auto,
    /// Momentum scrolling.
    Touch,
}

/// [CSS Containment 2 § 3](https://www.w3.org/TR/css-contain-2/#contain-property)
///
/// One keyword of a computed `contain` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Containment {
    /// "size containment"
    Size,
    /// "inline-size containment"
    InlineSize,
    /// "layout containment" - establishes a stacking context.
    Layout,
    /// "style containment"
    Style,
    /// "paint containment" - establishes a stacking context.
    Paint,
    /// "size layout paint style"
    Strict,
    /// "layout paint style"
    Content,
}

impl Containment {
    /// "Giving an element layout containment ... makes it establish an
    /// independent formatting context ... [and] establishes a stacking
    /// context." Paint containment has the same effect, and `strict` and
    /// `content` both include layout and paint.
    #[must_use]
    pub const fn establishes_stacking_context(self) -> bool {
        matches!(self, Self::Layout | Self::Paint | Self::Strict | Self::Content)
    }
}

/// Parse a computed `contain` value into its keywords. `none` is the empty
/// list; any unknown keyword rejects the whole value.
#[must_use]
pub fn parse_contain(value: &str) -> Option<Vec<Containment>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    value
        .split_ascii_whitespace()
        .map(|keyword| keyword.parse::<Containment>().ok())
        .collect()
}

/// [CSS Will Change 1 § 2](https://www.w3.org/TR/css-will-change-1/#will-change)
///
/// Parse a computed `will-change` value into lowercase property names.
/// `auto` is the empty list; `scroll-position` and `contents` are kept as
/// written.
#[must_use]
pub fn parse_will_change(value: &str) -> Vec<String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        return Vec::new();
    }
    value
        .split(',')
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// [CSS Color 4 § 13.2](https://www.w3.org/TR/css-color-4/#transparency)
///
/// Parse `opacity` as a number or percentage, clamped to `[0, 1]`.
#[must_use]
pub fn parse_opacity(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().ok()? / 100.0,
        None => value.parse::<f32>().ok()?,
    };
    number.is_finite().then(|| number.clamp(0.0, 1.0))
}

/// Parse a property whose initial value is `none` and whose other values
/// (transforms, filters, masks, clip paths, perspective lengths) are kept
/// verbatim. Returns `None` for `none`.
#[must_use]
pub fn parse_none_or_value(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_index_parse() {
        assert_eq!(ZIndex::parse("auto"), Some(ZIndex::Auto));
        assert_eq!(ZIndex::parse(" AUTO "), Some(ZIndex::Auto));
        assert_eq!(ZIndex::parse("-3"), Some(ZIndex::Integer(-3)));
        assert_eq!(ZIndex::parse("+2"), Some(ZIndex::Integer(2)));
        assert_eq!(ZIndex::parse("0"), Some(ZIndex::Integer(0)));
        assert_eq!(ZIndex::parse("1.5"), None);
        assert_eq!(ZIndex::parse("banana"), None);
    }

    #[test]
    fn test_z_index_auto_is_not_zero() {
        assert_ne!(ZIndex::Auto, ZIndex::Integer(0));
        assert_eq!(ZIndex::Auto.stack_level(), ZIndex::Integer(0).stack_level());
        assert_eq!(ZIndex::Auto.integer(), None);
    }

    #[test]
    fn test_opacity_parse() {
        assert_eq!(parse_opacity("0.5"), Some(0.5));
        assert_eq!(parse_opacity("50%"), Some(0.5));
        assert_eq!(parse_opacity("3"), Some(1.0));
        assert_eq!(parse_opacity("-1"), Some(0.0));
        assert_eq!(parse_opacity("NaN"), None);
        assert_eq!(parse_opacity("half"), None);
    }

    #[test]
    fn test_contain_parse() {
        assert_eq!(parse_contain("none"), Some(vec![]));
        assert_eq!(
            parse_contain("size layout"),
            Some(vec![Containment::Size, Containment::Layout])
        );
        assert_eq!(parse_contain("inline-size"), Some(vec![Containment::InlineSize]));
        assert_eq!(parse_contain("layout sideways"), None);
    }

    #[test]
    fn test_will_change_parse() {
        assert!(parse_will_change("auto").is_empty());
        assert_eq!(parse_will_change("Opacity, transform"), vec!["opacity", "transform"]);
    }

    #[test]
    fn test_sticky_aliases() {
        assert_eq!("-webkit-sticky".parse::<Position>(), Ok(Position::Sticky));
        assert_eq!(Position::Sticky.to_string(), "sticky");
    }
}
