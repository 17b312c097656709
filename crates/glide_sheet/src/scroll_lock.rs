//! Scroll-lock coordinator
//!
//! Keeps the nested scrollable and the sheet from both moving under one
//! finger. While the lock holds, every scroll sample forces the scrollable
//! back to a pinned offset so the sheet gesture gets the whole drag.
//!
//! The coordinator never writes position. It writes the scrollable's offset
//! (through [`ScrollableSlot`]) and the lock-request, scroll-ended and
//! content-offset registers the gesture engine reads.

use std::sync::Arc;

use glide_core::{
    event_types, EventType, GestureSource, ScrollSample, ScrollableState, SheetRegisters,
};

use crate::config::{Platform, SheetConfig};
use crate::scrollable::ScrollableSlot;

/// The part of [`SheetConfig`] the coordinator reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLockSettings {
    pub scroll_buffer: Option<f32>,
    pub preserve_scroll_momentum: bool,
    pub platform: Platform,
}

impl From<&SheetConfig> for ScrollLockSettings {
    fn from(config: &SheetConfig) -> Self {
        Self {
            scroll_buffer: config.scroll_buffer,
            preserve_scroll_momentum: config.preserve_scroll_momentum,
            platform: config.platform,
        }
    }
}

impl ScrollLockSettings {
    fn has_scroll_buffer(&self) -> bool {
        self.scroll_buffer.is_some_and(|buffer| buffer > 0.0)
    }
}

/// Scratch state of one drag of the scrollable
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollContext {
    pub initial_content_offset_y: f32,
    pub should_lock_initial_position: bool,
}

impl ScrollContext {
    /// Offset the scrollable is pinned to while locked
    pub fn lock_position(&self) -> f32 {
        if self.should_lock_initial_position {
            self.initial_content_offset_y
        } else {
            0.0
        }
    }
}

/// Coordinator for one scrollable, owned by the synchronous context
pub struct ScrollLockCoordinator {
    registers: Arc<SheetRegisters>,
    scrollable: Arc<ScrollableSlot>,
    settings: ScrollLockSettings,
    /// Created on begin-drag, dropped when momentum ends
    context: Option<ScrollContext>,
    awaiting_first_scroll: bool,
    /// Offset of this scrollable as last accepted or forced
    content_offset_y: f32,
}

impl ScrollLockCoordinator {
    pub fn new(
        registers: Arc<SheetRegisters>,
        scrollable: Arc<ScrollableSlot>,
        settings: ScrollLockSettings,
    ) -> Self {
        Self {
            registers,
            scrollable,
            settings,
            context: None,
            awaiting_first_scroll: false,
            content_offset_y: 0.0,
        }
    }

    pub fn settings(&self) -> &ScrollLockSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ScrollLockSettings) {
        self.settings = settings;
    }

    pub fn context(&self) -> Option<ScrollContext> {
        self.context
    }

    pub fn content_offset_y(&self) -> f32 {
        self.content_offset_y
    }

    pub fn is_locked(&self) -> bool {
        self.registers.scrollable_state() == ScrollableState::Locked
    }

    /// Dispatch one scrollable event
    pub fn handle(&mut self, event: EventType, sample: ScrollSample) {
        match event {
            event_types::SCROLL => self.on_scroll(sample.offset_y),
            event_types::SCROLL_BEGIN_DRAG => self.on_begin_drag(sample.offset_y),
            event_types::SCROLL_END_DRAG => self.on_end_drag(sample.offset_y),
            event_types::SCROLL_MOMENTUM_BEGIN => {
                tracing::trace!(offset_y = sample.offset_y, "scroll momentum began");
            }
            event_types::SCROLL_MOMENTUM_END => self.on_momentum_end(sample.offset_y),
            _ => tracing::trace!(event, "ignoring non-scroll event"),
        }
    }

    /// Finger went down on the scrollable
    pub fn on_begin_drag(&mut self, offset_y: f32) {
        let registers = &self.registers;
        self.content_offset_y = offset_y;
        registers.set_scrollable_content_offset_y(offset_y);
        self.awaiting_first_scroll = true;
        registers.set_scroll_ended(false);

        let expanded = registers.is_expanded();
        let preserve = self.settings.preserve_scroll_momentum;

        let lock = if self.settings.has_scroll_buffer() {
            offset_y <= 0.0 && expanded
        } else if preserve {
            // Without overscroll reporting no sample arrives when dragging
            // down from the top, so lock up front.
            self.settings.platform != Platform::Ios && offset_y <= 0.0
        } else {
            true
        };
        registers.set_scroll_lock_requested(lock);

        let context = ScrollContext {
            initial_content_offset_y: offset_y,
            should_lock_initial_position: (!expanded && offset_y > 0.0)
                || (preserve && offset_y <= 0.0),
        };
        self.context = Some(context);
        tracing::debug!(offset_y, lock, ?context, "scrollable drag began");
    }

    /// Offset sample from the scrollable
    pub fn on_scroll(&mut self, offset_y: f32) {
        let registers = Arc::clone(&self.registers);
        let preserve = self.settings.preserve_scroll_momentum;
        let deciding = (preserve || self.settings.has_scroll_buffer())
            && self.awaiting_first_scroll
            && !registers.is_scroll_lock_requested();
        let buffer = self.settings.scroll_buffer.unwrap_or(0.0);

        let context = self.context.get_or_insert_with(ScrollContext::default);

        if deciding {
            let toward_bottom = context.initial_content_offset_y < offset_y;
            let lock = context.should_lock_initial_position
                && if toward_bottom {
                    offset_y > buffer
                } else {
                    preserve && offset_y <= 0.0
                };
            if lock {
                registers.set_scroll_lock_requested(true);
                tracing::debug!(offset_y, toward_bottom, "scrollable locked on first sample");
            }
            self.awaiting_first_scroll = false;
        }

        if registers.is_expanded() {
            context.should_lock_initial_position = false;
        }

        if registers.gesture_state(GestureSource::Handle).is_active() {
            context.should_lock_initial_position = true;
            context.initial_content_offset_y = offset_y;
        }

        let lock_position = context.lock_position();
        if registers.scrollable_state() == ScrollableState::Locked {
            if !(preserve && registers.is_scroll_ended()) {
                self.pin(lock_position);
            }
            return;
        }
        self.content_offset_y = offset_y;
    }

    /// Finger lifted from the scrollable
    pub fn on_end_drag(&mut self, offset_y: f32) {
        self.awaiting_first_scroll = false;
        self.registers.set_scroll_ended(true);

        if self.is_locked() {
            let lock_position = self.lock_position();
            self.pin(lock_position);
            return;
        }
        self.propagate(offset_y);
    }

    /// Native momentum came to rest
    pub fn on_momentum_end(&mut self, offset_y: f32) {
        if self.is_locked() {
            let preserve = self.settings.preserve_scroll_momentum;
            if !(preserve && self.registers.is_scroll_ended()) {
                let lock_position = self.lock_position();
                self.pin(lock_position);
            }
        } else {
            self.propagate(offset_y);
        }
        self.context = None;
    }

    fn lock_position(&self) -> f32 {
        self.context.map(|c| c.lock_position()).unwrap_or(0.0)
    }

    fn pin(&mut self, lock_position: f32) {
        self.scrollable.force_offset(lock_position);
        self.content_offset_y = lock_position;
        tracing::trace!(lock_position, "scrollable pinned");
    }

    /// Publish the real offset, unless an animation is moving the sheet
    fn propagate(&mut self, offset_y: f32) {
        if self.registers.is_animating() {
            return;
        }
        self.content_offset_y = offset_y;
        self.registers.set_scrollable_content_offset_y(offset_y);
    }
}

impl std::fmt::Debug for ScrollLockCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockCoordinator")
            .field("settings", &self.settings)
            .field("context", &self.context)
            .field("awaiting_first_scroll", &self.awaiting_first_scroll)
            .field("content_offset_y", &self.content_offset_y)
            .finish_non_exhaustive()
    }
}
