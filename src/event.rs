//! Interaction events
//!
//! The set of event kinds is closed. Each kind has a stable string id matching
//! the conventional DOM event name, which is what surface adapters register.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use compact_str::CompactString;

/// Callback invoked by the surface when an event fires on a node.
pub type Callback = Arc<dyn Fn(&Event) + Send + Sync>;

// =============================================================================
// EventKind
// =============================================================================

macro_rules! event_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Interaction event kinds a node can declare handlers for.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventKind {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl EventKind {
            /// Every kind, in the order the handler differ visits them.
            pub const ALL: &'static [EventKind] = &[$(EventKind::$variant),*];

            /// Number of event kinds.
            pub const COUNT: usize = Self::ALL.len();

            /// The surface event name (`"click"`, `"dblclick"`, ...).
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(EventKind::$variant => $name,)*
                }
            }
        }

        impl FromStr for EventKind {
            type Err = UnknownEventKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(EventKind::$variant),)*
                    _ => Err(UnknownEventKind(CompactString::from(s))),
                }
            }
        }
    };
}

event_kinds! {
    Click => "click",
    DoubleClick => "dblclick",
    MouseOver => "mouseover",
    MouseOut => "mouseout",
    MouseDown => "mousedown",
    MouseMove => "mousemove",
    MouseUp => "mouseup",
    MouseEnter => "mouseenter",
    MouseLeave => "mouseleave",
    Input => "input",
    KeyUp => "keyup",
    KeyDown => "keydown",
    Drop => "drop",
    DragOver => "dragover",
}

impl EventKind {
    /// Check if this is a pointer event (carries client coordinates).
    pub const fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::Click
                | Self::DoubleClick
                | Self::MouseOver
                | Self::MouseOut
                | Self::MouseDown
                | Self::MouseMove
                | Self::MouseUp
                | Self::MouseEnter
                | Self::MouseLeave
                | Self::Drop
                | Self::DragOver
        )
    }

    /// Check if this is a keyboard event.
    pub const fn is_keyboard(self) -> bool {
        matches!(self, Self::KeyUp | Self::KeyDown)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub CompactString);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {:?}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

// =============================================================================
// Event
// =============================================================================

/// Event payload delivered to callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Which kind fired
    pub kind: EventKind,
    /// Pointer position relative to the viewport
    pub client_x: i32,
    pub client_y: i32,
    /// Pointer movement since the previous move event
    pub movement_x: i32,
    pub movement_y: i32,
    /// Physical key code (`"KeyA"`, `"Enter"`), empty for non-keyboard events
    pub code: CompactString,
    /// Current value of the target control, for `input` events
    pub value: Option<String>,
}

impl Event {
    /// Create an empty event of the given kind.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            client_x: 0,
            client_y: 0,
            movement_x: 0,
            movement_y: 0,
            code: CompactString::default(),
            value: None,
        }
    }

    /// Set the pointer position.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.client_x = x;
        self.client_y = y;
        self
    }

    /// Set the pointer movement.
    pub fn moved(mut self, dx: i32, dy: i32) -> Self {
        self.movement_x = dx;
        self.movement_y = dy;
        self
    }

    /// Set the key code.
    pub fn with_code(mut self, code: impl Into<CompactString>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the target control's value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}
