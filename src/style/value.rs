//! Style value types
//!
//! Each type knows how to write itself as CSS and how to read itself back
//! ([`CssValue`]). Keyword properties are closed enums; free-form properties
//! (colors, font families, transforms) are plain strings.

use std::fmt::{self, Write as _};

use compact_str::CompactString;

/// A value that can appear on the right-hand side of a style declaration.
pub trait CssValue: Sized {
    /// Append the serialized value to `out`.
    fn write_css(&self, out: &mut String);

    /// Parse a serialized value, `None` if it is not a legal value.
    fn parse_css(input: &str) -> Option<Self>;
}

impl CssValue for CompactString {
    fn write_css(&self, out: &mut String) {
        out.push_str(self);
    }

    fn parse_css(input: &str) -> Option<Self> {
        let input = input.trim();
        (!input.is_empty()).then(|| CompactString::from(input))
    }
}

// =============================================================================
// Keywords
// =============================================================================

css_keywords! {
    /// `align-items`
    AlignItems {
        Center => "center",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Stretch => "stretch",
        Baseline => "baseline",
    }

    /// Line style of a border
    BorderKind {
        None => "none",
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
    }

    /// `cursor`
    Cursor {
        Default => "default",
        Pointer => "pointer",
        Move => "move",
        Text => "text",
        NotAllowed => "not-allowed",
        NwseResize => "nwse-resize",
        EwResize => "ew-resize",
    }

    /// `display`
    Display {
        None => "none",
        Block => "block",
        Inline => "inline",
        InlineBlock => "inline-block",
        Flex => "flex",
        Grid => "grid",
    }

    /// `flex-direction`
    FlexDirection {
        Row => "row",
        Column => "column",
        RowReverse => "row-reverse",
        ColumnReverse => "column-reverse",
    }

    /// `flex-wrap`
    FlexWrap {
        Wrap => "wrap",
        NoWrap => "nowrap",
        WrapReverse => "wrap-reverse",
    }

    /// `justify-content`
    JustifyContent {
        Center => "center",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
    }

    /// `justify-self`
    JustifySelf {
        Left => "left",
        Right => "right",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
    }

    /// Line style of an outline
    OutlineKind {
        None => "none",
        Solid => "solid",
    }

    /// `overflow`
    Overflow {
        Visible => "visible",
        Hidden => "hidden",
        Scroll => "scroll",
        Auto => "auto",
    }

    /// `position`
    Position {
        Relative => "relative",
        Absolute => "absolute",
        Fixed => "fixed",
        Sticky => "sticky",
    }

    /// `text-align`
    TextAlign {
        Left => "left",
        Right => "right",
        Center => "center",
        Justify => "justify",
    }

    /// `text-decoration`
    TextDecoration {
        None => "none",
        Underline => "underline",
        Overline => "overline",
        LineThrough => "line-through",
    }

    /// Length unit of a [`Size`]
    Unit {
        Bare => "",
        Em => "em",
        Pc => "pc",
        Percent => "%",
        Pt => "pt",
        Px => "px",
        Vh => "vh",
        Vw => "vw",
    }
}

// =============================================================================
// Size
// =============================================================================

/// A length: number plus unit, or a raw expression (`calc(...)`, `var(...)`).
///
/// Numbers always serialize with six decimals (`100.000000px`), so a parsed
/// size is the original rounded to the nearest millionth.
#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    pub value: f64,
    pub unit: Unit,
    /// Serialized verbatim instead of `value`/`unit` when present
    pub raw: Option<CompactString>,
}

impl Default for Size {
    fn default() -> Self {
        Self::new(0.0, Unit::Bare)
    }
}

impl Size {
    /// Create a size with a unit.
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit,
            raw: None,
        }
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub const fn em(value: f64) -> Self {
        Self::new(value, Unit::Em)
    }

    pub const fn pt(value: f64) -> Self {
        Self::new(value, Unit::Pt)
    }

    pub const fn pc(value: f64) -> Self {
        Self::new(value, Unit::Pc)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub const fn vh(value: f64) -> Self {
        Self::new(value, Unit::Vh)
    }

    pub const fn vw(value: f64) -> Self {
        Self::new(value, Unit::Vw)
    }

    /// A unitless number (`flex-grow`-style values, line heights).
    pub const fn number(value: f64) -> Self {
        Self::new(value, Unit::Bare)
    }

    /// A raw expression serialized verbatim.
    pub fn raw(expr: impl Into<CompactString>) -> Self {
        Self {
            raw: Some(expr.into()),
            ..Self::default()
        }
    }
}

impl CssValue for Size {
    fn write_css(&self, out: &mut String) {
        match &self.raw {
            Some(raw) => out.push_str(raw),
            None => {
                let _ = write!(out, "{:.6}{}", self.value, self.unit.as_css());
            }
        }
    }

    fn parse_css(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let split = input
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(input.len());
        let (number, unit) = input.split_at(split);

        // Keywords and functions (`auto`, `-webkit-fill-available`, `calc(..)`)
        if !number.contains(|c: char| c.is_ascii_digit()) {
            return Some(Self::raw(input));
        }
        let value = number.parse::<f64>().ok()?;
        Some(Self::new(value, Unit::parse_css(unit)?))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_css(&mut out);
        f.write_str(&out)
    }
}

// =============================================================================
// Stroke (border / outline)
// =============================================================================

/// Line style keyword of a [`Stroke`].
pub trait StrokeKind: CssValue + Copy + PartialEq {
    /// The keyword that suppresses the line entirely.
    const NONE: Self;
}

impl StrokeKind for BorderKind {
    const NONE: Self = BorderKind::None;
}

impl StrokeKind for OutlineKind {
    const NONE: Self = OutlineKind::None;
}

/// Width, line style and color: `1.000000px solid #ccc`, or `none`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke<K> {
    pub width: Size,
    pub kind: K,
    pub color: CompactString,
}

/// `border`, `border-top`, ...
pub type Border = Stroke<BorderKind>;

/// `outline`
pub type Outline = Stroke<OutlineKind>;

impl<K: StrokeKind> Stroke<K> {
    /// Create a stroke.
    pub fn new(width: Size, kind: K, color: impl Into<CompactString>) -> Self {
        Self {
            width,
            kind,
            color: color.into(),
        }
    }

    /// A stroke that serializes as `none`.
    pub fn none() -> Self {
        Self::new(Size::default(), K::NONE, "")
    }

    /// Check if the line is suppressed.
    pub fn is_none(&self) -> bool {
        self.kind == K::NONE
    }
}

impl Border {
    /// Solid border, width in pixels.
    pub fn solid(width_px: f64, color: impl Into<CompactString>) -> Self {
        Self::new(Size::px(width_px), BorderKind::Solid, color)
    }
}

impl<K: StrokeKind> CssValue for Stroke<K> {
    fn write_css(&self, out: &mut String) {
        if self.is_none() {
            K::NONE.write_css(out);
            return;
        }
        self.width.write_css(out);
        out.push(' ');
        self.kind.write_css(out);
        out.push(' ');
        out.push_str(&self.color);
    }

    fn parse_css(input: &str) -> Option<Self> {
        let input = input.trim();
        if K::parse_css(input).is_some_and(|kind| kind == K::NONE) {
            return Some(Self::none());
        }

        let mut parts = input.splitn(3, char::is_whitespace);
        let width = Size::parse_css(parts.next()?)?;
        let kind = K::parse_css(parts.next()?)?;
        let color = parts.next().unwrap_or_default().trim();
        Some(Self::new(width, kind, color))
    }
}

// =============================================================================
// BoxShadow
// =============================================================================

/// `box-shadow`: horizontal and vertical offsets, blur, spread and color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxShadow {
    pub h_offset: Size,
    pub v_offset: Size,
    pub blur: Size,
    pub spread: Size,
    pub color: CompactString,
}

impl BoxShadow {
    /// Shadow with pixel offsets, blur and spread.
    pub fn px(h: f64, v: f64, blur: f64, spread: f64, color: impl Into<CompactString>) -> Self {
        Self {
            h_offset: Size::px(h),
            v_offset: Size::px(v),
            blur: Size::px(blur),
            spread: Size::px(spread),
            color: color.into(),
        }
    }
}

impl CssValue for BoxShadow {
    fn write_css(&self, out: &mut String) {
        for size in [&self.h_offset, &self.v_offset, &self.blur, &self.spread] {
            size.write_css(out);
            out.push(' ');
        }
        out.push_str(&self.color);
    }

    fn parse_css(input: &str) -> Option<Self> {
        let mut parts = input.trim().splitn(5, char::is_whitespace);
        let mut size = || Size::parse_css(parts.next()?);
        let (h_offset, v_offset, blur, spread) = (size()?, size()?, size()?, size()?);
        let color = parts.next().unwrap_or_default().trim().into();
        Some(Self {
            h_offset,
            v_offset,
            blur,
            spread,
            color,
        })
    }
}
