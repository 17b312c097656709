//! Keyboard feed and requests to the control context
//!
//! The gesture callbacks run in the synchronous context and must never wait
//! on the control context. Anything that crosses over, like dismissing the
//! keyboard, is sent as a [`ControlRequest`] on an unbounded channel.

use glide_core::{floating_point_equals, KeyboardState};
use tokio::sync::mpsc;

use crate::config::KeyboardBehavior;

/// Work the synchronous context hands to the control context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// The user dragged the sheet down while the keyboard was up
    DismissKeyboard,
}

pub type ControlSender = mpsc::UnboundedSender<ControlRequest>;
pub type ControlReceiver = mpsc::UnboundedReceiver<ControlRequest>;

/// Create the channel between the two contexts
pub fn control_channel() -> (ControlSender, ControlReceiver) {
    mpsc::unbounded_channel()
}

/// Fire-and-forget send. A closed receiver is logged, never an error.
pub(crate) fn send_request(sender: &ControlSender, request: ControlRequest) {
    if sender.send(request).is_err() {
        tracing::debug!(?request, "control context gone, dropping request");
    } else {
        tracing::debug!(?request, "control request sent");
    }
}

/// One sample of the keyboard feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardEvent {
    pub state: KeyboardState,
    /// Keyboard height in pixels, 0 when hidden
    pub height: f32,
}

impl KeyboardEvent {
    pub fn shown(height: f32) -> Self {
        Self {
            state: KeyboardState::Shown,
            height,
        }
    }

    pub fn hidden() -> Self {
        Self {
            state: KeyboardState::Hidden,
            height: 0.0,
        }
    }
}

/// Position the sheet moves to when the keyboard appears.
///
/// Returns `None` when the sheet has no snap position to raise from.
pub fn keyboard_target_position(
    behavior: KeyboardBehavior,
    current_snap_position: Option<f32>,
    highest_snap_point: f32,
    keyboard_height: f32,
) -> Option<f32> {
    match behavior {
        KeyboardBehavior::Interactive => {
            current_snap_position.map(|position| (position - keyboard_height).max(0.0))
        }
        KeyboardBehavior::Extend => Some(highest_snap_point),
        KeyboardBehavior::FillParent => Some(0.0),
    }
}

/// Whether a keyboard-driven move would actually change the position
pub(crate) fn needs_move(current: f32, target: f32) -> bool {
    !floating_point_equals(current, target)
}
