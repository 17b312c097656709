//! Discrete sheet states
//!
//! Every enum here lives in a [`Register`](crate::register::Register), so each
//! one round-trips through a single byte via [`RegisterValue`]. Enums that
//! react to lifecycle events implement [`StateTransitions`]:
//!
//! ```rust
//! use glide_core::{event_types, GestureState, StateTransitions};
//!
//! let state = GestureState::Undetermined;
//! let state = state.on_event(event_types::GESTURE_START).unwrap();
//! assert_eq!(state, GestureState::Began);
//! ```

use std::hash::Hash;

use crate::events::{event_types, EventType};

// =========================================================================
// Traits
// =========================================================================

/// Map events to state transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Conversion between a register value and its byte encoding
pub trait RegisterValue: Copy + Send + Sync + 'static {
    fn to_bits(self) -> u8;

    /// Decode a byte. Unknown encodings fall back to the default variant.
    fn from_bits(bits: u8) -> Self;
}

macro_rules! register_enum {
    ($ty:ident { $($variant:ident = $bits:literal),+ $(,)? }) => {
        impl RegisterValue for $ty {
            fn to_bits(self) -> u8 {
                self as u8
            }

            fn from_bits(bits: u8) -> Self {
                match bits {
                    $($bits => $ty::$variant,)+
                    _ => $ty::default(),
                }
            }
        }
    };
}

// =========================================================================
// Gesture Source
// =========================================================================

/// Which input stream currently drives the sheet position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum GestureSource {
    /// Nobody holds the gesture token
    #[default]
    None = 0,
    /// The drag handle
    Handle = 1,
    /// The sheet content (including a nested scrollable)
    Content = 2,
}

register_enum!(GestureSource { None = 0, Handle = 1, Content = 2 });

// =========================================================================
// Gesture State
// =========================================================================

/// Per-source pan gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum GestureState {
    #[default]
    Undetermined = 0,
    Began = 1,
    Active = 2,
    Ended = 3,
}

register_enum!(GestureState {
    Undetermined = 0,
    Began = 1,
    Active = 2,
    Ended = 3,
});

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (GestureState::Undetermined | GestureState::Ended, GESTURE_START) => {
                Some(GestureState::Began)
            }
            (GestureState::Began, GESTURE_CHANGE) => Some(GestureState::Active),
            (GestureState::Began | GestureState::Active, GESTURE_END) => Some(GestureState::Ended),
            (GestureState::Undetermined, GESTURE_FINALIZE) => None,
            (_, GESTURE_FINALIZE) => Some(GestureState::Undetermined),
            _ => None,
        }
    }
}

impl GestureState {
    /// Whether the gesture is currently moving the sheet
    pub fn is_active(&self) -> bool {
        matches!(self, GestureState::Active)
    }
}

// =========================================================================
// Animation State
// =========================================================================

/// Lifecycle of the programmatic position animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AnimationState {
    #[default]
    Undetermined = 0,
    Running = 1,
    Stopped = 2,
}

register_enum!(AnimationState {
    Undetermined = 0,
    Running = 1,
    Stopped = 2,
});

impl StateTransitions for AnimationState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (_, ANIMATION_START) => Some(AnimationState::Running),
            (AnimationState::Running, ANIMATION_STOP | ANIMATION_SETTLE) => {
                Some(AnimationState::Stopped)
            }
            _ => None,
        }
    }
}

// =========================================================================
// Keyboard State
// =========================================================================

/// Software keyboard visibility as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum KeyboardState {
    #[default]
    Undetermined = 0,
    Shown = 1,
    Hidden = 2,
}

register_enum!(KeyboardState {
    Undetermined = 0,
    Shown = 1,
    Hidden = 2,
});

impl StateTransitions for KeyboardState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (KeyboardState::Shown, KEYBOARD_SHOW) => None,
            (_, KEYBOARD_SHOW) => Some(KeyboardState::Shown),
            (KeyboardState::Hidden, KEYBOARD_HIDE) => None,
            (_, KEYBOARD_HIDE) => Some(KeyboardState::Hidden),
            _ => None,
        }
    }
}

// =========================================================================
// Sheet State
// =========================================================================

/// Discrete classification of the sheet position.
///
/// Always derived from position; never assigned on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SheetState {
    #[default]
    Closed = 0,
    Collapsed = 1,
    Extended = 2,
    FillParent = 3,
}

register_enum!(SheetState {
    Closed = 0,
    Collapsed = 1,
    Extended = 2,
    FillParent = 3,
});

impl SheetState {
    /// Extended or filling the parent
    pub fn is_expanded(&self) -> bool {
        matches!(self, SheetState::Extended | SheetState::FillParent)
    }
}

// =========================================================================
// Scrollable
// =========================================================================

/// Whether the nested scrollable follows native physics or is pinned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollableState {
    #[default]
    Unlocked,
    Locked,
}

/// Kind of content mounted inside the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ScrollableType {
    #[default]
    Undetermined = 0,
    /// Plain, non-scrolling view
    View = 1,
    ScrollView = 2,
    FlatList = 3,
    SectionList = 4,
    VirtualizedList = 5,
}

register_enum!(ScrollableType {
    Undetermined = 0,
    View = 1,
    ScrollView = 2,
    FlatList = 3,
    SectionList = 4,
    VirtualizedList = 5,
});

impl ScrollableType {
    /// Content that scrolls on its own
    pub fn is_scrollable(&self) -> bool {
        !matches!(self, ScrollableType::Undetermined | ScrollableType::View)
    }
}
