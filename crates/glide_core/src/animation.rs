//! Animation boundary
//!
//! The sheet never runs curves itself. It hands a destination, a cause and an
//! initial velocity to an [`AnimationDriver`] and reads the result back out of
//! the registers. Drivers are expected to:
//!
//! - mark the animation `Running` when a transition starts,
//! - write every intermediate position through `SheetRegisters::set_position`,
//! - call `SheetRegisters::settle_at` with the exact destination and the
//!   transition's cause when done.

use std::sync::Arc;

/// Why a transition was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationCause {
    #[default]
    None,
    /// Release of a pan gesture
    Gesture,
    /// Programmatic command from the control context
    User,
    /// Keyboard appeared or disappeared
    Keyboard,
    /// Container was resized
    ContainerResize,
    /// Declared snap points changed
    SnapPointChange,
}

/// Executor for position transitions
pub trait AnimationDriver: Send + Sync {
    /// Start moving the sheet toward `destination`, replacing any running
    /// transition.
    fn animate_to_position(&self, destination: f32, cause: AnimationCause, initial_velocity: f32);

    /// Cancel the running transition, leaving the sheet where it is
    fn stop_animation(&self);
}

/// Driver shared between the gesture engine and the control context
pub type SharedAnimationDriver = Arc<dyn AnimationDriver>;
