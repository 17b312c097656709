//! Event vocabulary
//!
//! Event type constants shared by the gesture engine, the scroll-lock
//! coordinator and the animation executor, plus the payloads carried by
//! pan and scroll samples.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Pointer went down on a pan surface (not yet a drag)
    pub const GESTURE_BEGIN: EventType = 1;
    /// Pan activated; the source tries to claim the gesture token
    pub const GESTURE_START: EventType = 2;
    /// Pan moved
    pub const GESTURE_CHANGE: EventType = 3;
    /// Pan released
    pub const GESTURE_END: EventType = 4;
    /// Pan finished, after end or cancel
    pub const GESTURE_FINALIZE: EventType = 5;

    /// Scrollable offset sample
    pub const SCROLL: EventType = 10;
    /// Finger went down on the scrollable
    pub const SCROLL_BEGIN_DRAG: EventType = 11;
    /// Finger lifted from the scrollable
    pub const SCROLL_END_DRAG: EventType = 12;
    /// Native momentum started
    pub const SCROLL_MOMENTUM_BEGIN: EventType = 13;
    /// Native momentum came to rest
    pub const SCROLL_MOMENTUM_END: EventType = 14;

    // Animation lifecycle
    pub const ANIMATION_START: EventType = 20;
    pub const ANIMATION_STOP: EventType = 21;
    pub const ANIMATION_SETTLE: EventType = 22;

    // Keyboard feed
    pub const KEYBOARD_SHOW: EventType = 30;
    pub const KEYBOARD_HIDE: EventType = 31;
}

/// Payload of a pan gesture sample
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanSample {
    /// Vertical translation since the gesture started (positive = downward)
    pub translation_y: f32,
    /// Vertical velocity in pixels per second (positive = downward)
    pub velocity_y: f32,
    /// Absolute y of the pointer in window coordinates
    pub absolute_y: f32,
}

impl PanSample {
    /// Sample carrying only a translation
    pub fn translation(translation_y: f32) -> Self {
        Self {
            translation_y,
            ..Default::default()
        }
    }

    /// Release sample with translation and velocity
    pub fn release(translation_y: f32, velocity_y: f32) -> Self {
        Self {
            translation_y,
            velocity_y,
            absolute_y: 0.0,
        }
    }

    /// Set the absolute pointer position
    pub fn at(mut self, absolute_y: f32) -> Self {
        self.absolute_y = absolute_y;
        self
    }
}

/// Payload of a scrollable event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    /// Content offset reported by the scrollable (0 = top of content)
    pub offset_y: f32,
}

impl ScrollSample {
    pub fn new(offset_y: f32) -> Self {
        Self { offset_y }
    }
}
