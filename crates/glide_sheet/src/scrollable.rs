//! Nested scrollable host
//!
//! The sheet never owns the scrollable. It holds an optional handle to the
//! host and issues one imperative command, [`ScrollableHost::force_offset`],
//! from exactly one writer at a time.

use std::sync::{Arc, PoisonError, RwLock};

use glide_core::SheetRegisters;

/// Imperative access to the scrollable mounted in the sheet
pub trait ScrollableHost: Send + Sync {
    /// Jump to `offset_y` without animating
    fn force_offset(&self, offset_y: f32);
}

/// Optional, swappable reference to the current scrollable host.
///
/// Forcing an offset while nothing is attached is a logged no-op.
#[derive(Default)]
pub struct ScrollableSlot {
    host: RwLock<Option<Arc<dyn ScrollableHost>>>,
}

impl ScrollableSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a host, replacing any previous one
    pub fn attach(&self, host: Arc<dyn ScrollableHost>) {
        *self.host.write().unwrap_or_else(PoisonError::into_inner) = Some(host);
        tracing::debug!("scrollable host attached");
    }

    pub fn detach(&self) {
        *self.host.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("scrollable host detached");
    }

    pub fn is_attached(&self) -> bool {
        self.host
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Forward to the attached host. Returns whether a host received it.
    pub fn force_offset(&self, offset_y: f32) -> bool {
        let host = self
            .host
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match host {
            Some(host) => {
                tracing::trace!(offset_y, "forcing scrollable offset");
                host.force_offset(offset_y);
                true
            }
            None => {
                tracing::warn!(offset_y, "no scrollable attached, ignoring forced offset");
                false
            }
        }
    }
}

impl std::fmt::Debug for ScrollableSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollableSlot")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Properties the host applies to its scrollable every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollableProps {
    pub scroll_enabled: bool,
    pub bounces: bool,
    pub shows_vertical_indicator: bool,
}

impl ScrollableProps {
    /// Derive props from the registers and the host's own preferences.
    ///
    /// Scrolling is only enabled once the sheet is expanded. Bouncing is
    /// suppressed at the top while a finger is down so the sheet gets the
    /// drag instead.
    pub fn derive(registers: &SheetRegisters, scroll_enabled: bool, shows_indicator: bool) -> Self {
        let expanded = registers.is_expanded();
        let offset = registers.scrollable_content_offset_y();
        Self {
            scroll_enabled: scroll_enabled && expanded,
            bounces: offset > 0.0 || !registers.is_pan_gesture_moving(),
            shows_vertical_indicator: shows_indicator && expanded && offset > 1.0,
        }
    }
}
