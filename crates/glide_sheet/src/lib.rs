//! Glide Sheet
//!
//! Gesture arbitration and position engine for a draggable bottom sheet.
//!
//! # Features
//!
//! - **Gesture Engine**: drag handle and content pans share one position,
//!   arbitrated by a first-claimant-wins token, with over-drag resistance
//!   and velocity projection onto snap points
//! - **Scroll Lock**: pins a nested scrollable while the sheet is not
//!   expanded, with an optional direction-aware scroll buffer
//! - **Keyboard Handling**: raises the sheet into a temporary position and
//!   restores it on blur
//! - **Control Context**: programmatic snap, expand, collapse and close,
//!   plus re-layout on container or snap point changes
//! - **Configuration**: snap points in pixels or percent, loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use glide_animation::AnimationScheduler;
//! use glide_core::{GestureSource, PanSample, SheetState};
//! use glide_sheet::{SheetConfig, SheetController};
//!
//! let config = SheetConfig::from_toml_str(r#"
//!     snap_points = [200, "50%", "90%"]
//!     index = 1
//! "#).unwrap();
//!
//! let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
//! let controller = SheetController::with_scheduler(config, 800.0, &scheduler).unwrap();
//! assert_eq!(controller.registers().sheet_state(), SheetState::Collapsed);
//!
//! let mut gestures = controller.gesture_engine();
//! gestures.begin(GestureSource::Handle);
//! assert!(gestures.start(GestureSource::Handle));
//! gestures.change(GestureSource::Handle, PanSample::translation(-120.0));
//! gestures.end(GestureSource::Handle, PanSample::release(-120.0, -900.0));
//! gestures.finalize(GestureSource::Handle);
//!
//! // Run frames until the sheet settles on the highest snap point.
//! for _ in 0..600 {
//!     scheduler.lock().unwrap().tick(1.0 / 60.0);
//! }
//! assert_eq!(controller.registers().sheet_state(), SheetState::Extended);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod keyboard;
pub mod projection;
pub mod scroll_lock;
pub mod scrollable;

pub use config::{
    AnimationSettings, CurveKind, KeyboardBehavior, KeyboardBlurBehavior, Platform, SheetConfig,
    SnapPointSpec,
};
pub use controller::SheetController;
pub use error::{Result, SheetError};
pub use gesture::{resisted_overshoot, GestureContext, GestureEngine, GestureSettings};
pub use keyboard::{
    control_channel, keyboard_target_position, ControlReceiver, ControlRequest, ControlSender,
    KeyboardEvent,
};
pub use projection::{project, project_destination, PROJECTION_DECELERATION};
pub use scroll_lock::{ScrollContext, ScrollLockCoordinator, ScrollLockSettings};
pub use scrollable::{ScrollableHost, ScrollableProps, ScrollableSlot};
