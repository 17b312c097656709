//! Glide Core
//!
//! This crate provides the foundational primitives shared by every part of a
//! draggable sheet:
//!
//! - **Registers**: lock-free cells for position, snap layout, gesture
//!   ownership, keyboard and scrollable state
//! - **State Transitions**: small enums driven by event type constants
//! - **Sheet-State Resolution**: the pure mapping from position to
//!   `SheetState`, re-derived on every position write
//! - **Animation Boundary**: the contract to whatever executes transitions
//!
//! # Example
//!
//! ```rust
//! use glide_core::{SheetRegisters, SheetState, SnapPoints};
//!
//! // Positions measured from the top of an 800px container.
//! let snap_points = SnapPoints::new(vec![600.0, 300.0, 0.0]).unwrap();
//! let registers = SheetRegisters::new(snap_points, 800.0).unwrap();
//!
//! registers.set_position(300.0);
//! assert_eq!(registers.sheet_state(), SheetState::Collapsed);
//!
//! registers.set_position(0.0);
//! assert_eq!(registers.sheet_state(), SheetState::Extended);
//! ```

pub mod animation;
pub mod error;
pub mod events;
pub mod register;
pub mod snap;
pub mod state;

pub use animation::{AnimationCause, AnimationDriver, SharedAnimationDriver};
pub use error::{ConfigError, Result};
pub use events::{event_types, EventType, PanSample, ScrollSample};
pub use register::{AtomicF32, GestureToken, PositionCell, Register, SheetRegisters};
pub use snap::{
    animated_index, floating_point_equals, resolve_sheet_state, round_to_nearest_pixel,
    SnapPoints, POSITION_EPSILON,
};
pub use state::{
    AnimationState, GestureSource, GestureState, KeyboardState, RegisterValue, ScrollableState,
    ScrollableType, SheetState, StateTransitions,
};
