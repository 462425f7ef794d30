//! CSS computed style representation and value parsing
//!
//! Only the properties that decide stacking and layer placement are typed:
//! - [CSS 2.1 § 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [Compositing and Blending Level 1](https://www.w3.org/TR/compositing-1/)
//! - [CSS Containment Module Level 2](https://www.w3.org/TR/css-contain-2/)
//! - [CSS Will Change Module Level 1](https://www.w3.org/TR/css-will-change-1/)

pub mod computed;
mod display;
mod resolve;
mod values;

pub use computed::ComputedStyle;
pub use display::{DisplayValue, InnerDisplayType, OuterDisplayType, parse_display_value};
pub use resolve::{DocumentStyles, StyleResolver};
pub use values::{
    Containment, Float, Isolation, MixBlendMode, OverflowScrolling, Position, ZIndex,
    parse_contain, parse_opacity, parse_will_change,
};
