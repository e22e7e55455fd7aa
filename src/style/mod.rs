//! Inline styles
//!
//! A [`Style`] is compared as a whole and serialized as a whole: the style
//! differ emits at most one `style` attribute per node. Serialization walks the
//! properties in a fixed declared order (not alphabetical), so two styles with
//! the same effective properties always produce the same string.
//!
//! ```
//! use tola_mount::style::{Display, Size, Style};
//!
//! let style = Style::new().display(Display::Flex).width(Size::px(100.0));
//! assert_eq!(style.to_css(), "display:flex;width:100.000000px;");
//! assert_eq!(style.to_css().parse::<Style>().unwrap(), style);
//! ```

mod value;

pub use value::{
    AlignItems, Border, BorderKind, BoxShadow, CssValue, Cursor, Display, FlexDirection, FlexWrap,
    JustifyContent, JustifySelf, Outline, OutlineKind, Overflow, Position, Stroke, StrokeKind,
    TextAlign, TextDecoration, Unit, Size,
};

use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;

use crate::error::StyleParseError;

/// Prefixes `user-select` is additionally emitted with.
const VENDOR_PREFIXES: [&str; 3] = ["-webkit-", "-moz-", "-ms-"];

const USER_SELECT: &str = "user-select";

style_properties! {
    align_items: AlignItems => "align-items",
    background: CompactString => "background",
    background_color: CompactString => "background-color",
    border: Border => "border",
    border_top: Border => "border-top",
    border_bottom: Border => "border-bottom",
    border_left: Border => "border-left",
    border_right: Border => "border-right",
    border_color: CompactString => "border-color",
    border_radius: Size => "border-radius",
    box_shadow: BoxShadow => "box-shadow",
    color: CompactString => "color",
    cursor: Cursor => "cursor",
    display: Display => "display",
    flex_direction: FlexDirection => "flex-direction",
    flex_grow: CompactString => "flex-grow",
    flex_basis: CompactString => "flex-basis",
    flex_shrink: CompactString => "flex-shrink",
    flex_wrap: FlexWrap => "flex-wrap",
    font_family: CompactString => "font-family",
    font_size: Size => "font-size",
    font_weight: CompactString => "font-weight",
    grid_area: CompactString => "grid-area",
    justify_content: JustifyContent => "justify-content",
    justify_self: JustifySelf => "justify-self",
    height: Size => "height",
    left: Size => "left",
    margin: Size => "margin",
    margin_bottom: Size => "margin-bottom",
    margin_left: Size => "margin-left",
    margin_right: Size => "margin-right",
    margin_top: Size => "margin-top",
    max_height: Size => "max-height",
    min_height: Size => "min-height",
    max_width: Size => "max-width",
    min_width: Size => "min-width",
    outline: Outline => "outline",
    overflow: Overflow => "overflow",
    padding: Size => "padding",
    padding_bottom: Size => "padding-bottom",
    padding_left: Size => "padding-left",
    padding_right: Size => "padding-right",
    padding_top: Size => "padding-top",
    position: Position => "position",
    text_align: TextAlign => "text-align",
    text_decoration: TextDecoration => "text-decoration",
    top: Size => "top",
    transform: CompactString => "transform",
    transition: CompactString => "transition",
    user_select: CompactString => "user-select",
    width: Size => "width",
}

impl Style {
    /// Create an empty (unset) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no property is set.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize as `property:value;` declarations in declared order.
    ///
    /// Returns an empty string for an unset style.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_declarations(&mut out);
        out
    }
}

fn write_declaration<T: CssValue>(out: &mut String, property: &str, value: &T) {
    let mut emit = |prefix: &str| {
        out.push_str(prefix);
        out.push_str(property);
        out.push(':');
        value.write_css(out);
        out.push(';');
    };

    emit("");
    if property == USER_SELECT {
        for prefix in VENDOR_PREFIXES {
            emit(prefix);
        }
    }
}

fn parse_value<T: CssValue>(property: &str, value: &str) -> Result<T, StyleParseError> {
    T::parse_css(value).ok_or_else(|| StyleParseError::InvalidValue {
        property: property.to_owned(),
        value: value.trim().to_owned(),
    })
}

/// Split on `;` outside parentheses and quoted strings.
fn split_declarations(s: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    let mut quote = None;
    s.split(move |c: char| {
        match (quote, c) {
            (Some(open), _) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') => return depth == 0,
            _ => {}
        }
        false
    })
}

/// Map a vendor-prefixed alias back to its property name.
fn unprefixed(property: &str) -> &str {
    VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| property.strip_prefix(*prefix))
        .filter(|rest| *rest == USER_SELECT)
        .unwrap_or(property)
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    /// Parse a serialized style (`property:value;...`).
    ///
    /// Later declarations of the same property win.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Style::new();
        for declaration in split_declarations(s).map(str::trim).filter(|d| !d.is_empty()) {
            let (property, value) = declaration
                .split_once(':')
                .ok_or_else(|| StyleParseError::Malformed(declaration.to_owned()))?;
            style.apply_declaration(unprefixed(property.trim()), value)?;
        }
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_style() -> Style {
        Style::new()
            .align_items(AlignItems::Center)
            .background("linear-gradient(red, blue)")
            .background_color("#fff")
            .border(Border::solid(1.0, "#ccc"))
            .border_top(Border::none())
            .border_radius(Size::px(4.0))
            .box_shadow(BoxShadow::px(0.0, 1.0, 2.0, 0.0, "#000"))
            .color("red")
            .cursor(Cursor::Pointer)
            .display(Display::Flex)
            .flex_direction(FlexDirection::Column)
            .flex_grow("1")
            .font_family("Inter, sans-serif")
            .font_size(Size::pt(12.0))
            .justify_content(JustifyContent::SpaceBetween)
            .height(Size::vh(100.0))
            .margin(Size::raw("calc(1em + 2px)"))
            .outline(Outline::none())
            .overflow(Overflow::Auto)
            .position(Position::Absolute)
            .text_align(TextAlign::Center)
            .text_decoration(TextDecoration::LineThrough)
            .transform("rotate(45deg)")
            .user_select("none")
            .width(Size::percent(50.0))
    }

    #[test]
    fn test_unset_serializes_empty() {
        assert!(Style::new().is_unset());
        assert_eq!(Style::new().to_css(), "");
        assert!(!Style::new().color("red").is_unset());
    }

    #[test]
    fn test_declared_order() {
        let style = Style::new().width(Size::px(10.0)).align_items(AlignItems::Center);
        assert_eq!(style.to_css(), "align-items:center;width:10.000000px;");
        assert_eq!(Style::PROPERTIES.first(), Some(&"align-items"));
        assert_eq!(Style::PROPERTIES.last(), Some(&"width"));
    }

    #[test]
    fn test_user_select_prefixes() {
        let css = Style::new().user_select("none").to_css();
        assert_eq!(
            css,
            "user-select:none;-webkit-user-select:none;-moz-user-select:none;-ms-user-select:none;"
        );
        assert_eq!(css.parse::<Style>(), Ok(Style::new().user_select("none")));
    }

    #[test]
    fn test_parse_reproduces_every_property() {
        let style = full_style();
        let parsed: Style = style.to_css().parse().unwrap();
        assert_eq!(parsed, style);
        assert_eq!(parsed.to_css(), style.to_css());

        let edge_cases = [
            Style::new().width(Size::raw("auto")),
            Style::new().background("url(data:image/png;base64,AAAA)"),
            Style::new().font_family("'Semi;Colon', serif"),
            Style::new().min_width(Size::raw("-webkit-fill-available")),
        ];
        for style in edge_cases {
            let css = style.to_css();
            assert_eq!(css.parse::<Style>(), Ok(style), "{css}");
        }

        let precise = Style::new().height(Size::px(0.1234567));
        let css = precise.to_css();
        assert_eq!(css, "height:0.123457px;");
        let parsed: Style = css.parse().unwrap();
        assert_eq!(parsed, Style::new().height(Size::px(0.123457)));
        assert_eq!(parsed.to_css(), css);
    }

    #[test]
    fn test_split_declarations() {
        let parts: Vec<_> =
            split_declarations("a:url(x;y);b:\"p;q\";c:(d;(e;f));g:h").collect();
        assert_eq!(parts, ["a:url(x;y)", "b:\"p;q\"", "c:(d;(e;f))", "g:h"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "color red".parse::<Style>(),
            Err(StyleParseError::Malformed("color red".into()))
        );
        assert_eq!(
            "float:left".parse::<Style>(),
            Err(StyleParseError::UnknownProperty("float".into()))
        );
        assert!(matches!(
            "display:table".parse::<Style>(),
            Err(StyleParseError::InvalidValue { property, .. }) if property == "display"
        ));
        assert_eq!(" ; ".parse::<Style>(), Ok(Style::new()));
    }
}
