//! Code generation macros
//!
//! These macros eliminate repetitive match and builder code for the node,
//! style and handler types. All of them use `paste` for identifier
//! concatenation where needed.

// =============================================================================
// Enum accessors
// =============================================================================

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with single-field variants
///
/// Uses paste's `:camel` modifier to convert the method name to the variant
/// name. The payload is coerced to the given type, so boxed variants hand out
/// plain references.
///
/// # Example
/// ```ignore
/// impl Node {
///     // element -> Element, text -> Text
///     impl_enum_accessors!(element: Element, text: Text);
/// }
/// ```
macro_rules! impl_enum_accessors {
    ($($variant:ident : $ty:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&$ty> {
                    match self {
                        Self::[<$variant:camel>](v) => {
                            let v: &$ty = v;
                            Some(v)
                        }
                        _ => None,
                    }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut $ty> {
                    match self {
                        Self::[<$variant:camel>](v) => {
                            let v: &mut $ty = v;
                            Some(v)
                        }
                        _ => None,
                    }
                }
            )*
        }
    };
}

// =============================================================================
// CSS keyword enums
// =============================================================================

/// Define a CSS keyword enum with its serialized names
///
/// # Generated items
/// - the enum itself (`Copy`, `Eq`, `Hash`)
/// - `ALL` and `as_css()`
/// - `Display` and [`CssValue`](crate::style::CssValue)
///
/// # Example
/// ```ignore
/// css_keywords! {
///     /// `display`
///     Display {
///         None => "none",
///         Flex => "flex",
///     }
/// }
/// ```
macro_rules! css_keywords {
    ($(
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $css:literal),* $(,)? }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $name {
                $(
                    #[doc = concat!("`", $css, "`")]
                    $variant,
                )*
            }

            impl $name {
                /// Every keyword of this property.
                pub const ALL: &'static [Self] = &[$(Self::$variant),*];

                /// The CSS keyword.
                pub const fn as_css(self) -> &'static str {
                    match self {
                        $(Self::$variant => $css,)*
                    }
                }
            }

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(self.as_css())
                }
            }

            impl $crate::style::CssValue for $name {
                fn write_css(&self, out: &mut String) {
                    out.push_str(self.as_css());
                }

                fn parse_css(input: &str) -> Option<Self> {
                    match input.trim() {
                        $($css => Some(Self::$variant),)*
                        _ => None,
                    }
                }
            }
        )*
    };
}

// =============================================================================
// Style record
// =============================================================================

/// Define the `Style` record from an ordered property table
///
/// The table order is the serialization order. Each entry becomes an
/// `Option<T>` field (`None` is the unset sentinel) and a chained setter of
/// the same name.
///
/// # Generated items
/// - `Style` struct with `Default` and structural `PartialEq`
/// - `Style::PROPERTIES` (CSS names, in order)
/// - one setter per property
/// - `write_declarations` and `apply_declaration` used by serialization
///   and parsing
macro_rules! style_properties {
    ($($field:ident : $ty:ty => $css:literal),* $(,)?) => {
        /// Sparse set of CSS-like properties.
        ///
        /// Every property is independently optional; `None` means unset and
        /// is never serialized. Equality is field-by-field.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct Style {
            $(
                #[doc = concat!("`", $css, "`")]
                pub $field: Option<$ty>,
            )*
        }

        impl Style {
            /// CSS property names, in serialization order.
            pub const PROPERTIES: &'static [&'static str] = &[$($css),*];

            $(
                #[doc = concat!("Set `", $css, "`.")]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            fn write_declarations(&self, out: &mut String) {
                $(
                    if let Some(value) = &self.$field {
                        write_declaration(out, $css, value);
                    }
                )*
            }

            fn apply_declaration(
                &mut self,
                property: &str,
                value: &str,
            ) -> Result<(), $crate::error::StyleParseError> {
                match property {
                    $(
                        $css => {
                            self.$field = Some(parse_value::<$ty>(property, value)?);
                            Ok(())
                        }
                    )*
                    _ => Err($crate::error::StyleParseError::UnknownProperty(property.to_owned())),
                }
            }
        }
    };
}

// =============================================================================
// Handler builders
// =============================================================================

/// Generate per-kind `on_xxx` / `on_xxx_cached` builders
///
/// The implementing type must provide `on(kind, f)` and
/// `on_cached(kind, key, f)`.
///
/// # Example
/// ```ignore
/// impl Element {
///     impl_handler_builders!(click => Click, dblclick => DoubleClick);
/// }
/// // element.on_click(|e| ...).on_dblclick_cached("row-3", |e| ...)
/// ```
macro_rules! impl_handler_builders {
    ($($name:ident => $kind:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Declare a `" $name "` handler."]
                pub fn [<on_ $name>](
                    self,
                    f: impl Fn(&$crate::event::Event) + Send + Sync + 'static,
                ) -> Self {
                    self.on($crate::event::EventKind::$kind, f)
                }

                #[doc = "Declare a `" $name "` handler with a cache key."]
                pub fn [<on_ $name _cached>](
                    self,
                    key: impl Into<::compact_str::CompactString>,
                    f: impl Fn(&$crate::event::Event) + Send + Sync + 'static,
                ) -> Self {
                    self.on_cached($crate::event::EventKind::$kind, key, f)
                }
            )*
        }
    };
}

/// Invoke `impl_handler_builders!` for the full event-kind table
macro_rules! impl_all_handler_builders {
    () => {
        impl_handler_builders!(
            click => Click,
            dblclick => DoubleClick,
            mouseover => MouseOver,
            mouseout => MouseOut,
            mousedown => MouseDown,
            mousemove => MouseMove,
            mouseup => MouseUp,
            mouseenter => MouseEnter,
            mouseleave => MouseLeave,
            input => Input,
            keyup => KeyUp,
            keydown => KeyDown,
            drop => Drop,
            dragover => DragOver,
        );
    };
}
