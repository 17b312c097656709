//! Control context
//!
//! [`SheetController`] owns the sheet's configuration and issues programmatic
//! commands (snap, expand, close), re-layout and keyboard reactions. It builds
//! the [`GestureEngine`] and [`ScrollLockCoordinator`] that run in the
//! synchronous context; all of them share one register set.

use std::sync::{Arc, Mutex};

use glide_animation::{AnimationScheduler, SettledTransition, SheetAnimator};
use glide_core::{
    floating_point_equals, round_to_nearest_pixel, AnimationCause, ConfigError, GestureSource,
    KeyboardState, ScrollableType, SharedAnimationDriver, SheetRegisters, SnapPoints,
};

use crate::config::{KeyboardBlurBehavior, SheetConfig, SnapPointSpec};
use crate::error::{Result, SheetError};
use crate::gesture::{GestureEngine, GestureSettings};
use crate::keyboard::{
    control_channel, keyboard_target_position, needs_move, ControlReceiver, ControlSender,
    KeyboardEvent,
};
use crate::scroll_lock::{ScrollLockCoordinator, ScrollLockSettings};
use crate::scrollable::{ScrollableHost, ScrollableSlot};

/// Programmatic access to one sheet
pub struct SheetController {
    config: SheetConfig,
    registers: Arc<SheetRegisters>,
    animator: SharedAnimationDriver,
    scrollable: Arc<ScrollableSlot>,
    control_sender: ControlSender,
    control_receiver: Option<ControlReceiver>,
}

impl SheetController {
    /// Build a sheet inside a container and seat it at the configured index.
    ///
    /// `make_driver` receives the new registers and returns the animation
    /// driver that will move them.
    pub fn new(
        config: SheetConfig,
        container_height: f32,
        make_driver: impl FnOnce(Arc<SheetRegisters>) -> SharedAnimationDriver,
    ) -> Result<Self> {
        config.validate()?;
        let snap_points = config.normalize_snap_points(container_height, 1.0)?;
        check_index(config.index, &snap_points)?;

        let registers = Arc::new(SheetRegisters::new(snap_points, container_height)?);
        if let Some(position) = snap_position(&registers, config.index) {
            registers.set_position(position);
        }
        registers.set_current_index(config.index);

        let animator = make_driver(Arc::clone(&registers));
        let (control_sender, control_receiver) = control_channel();

        tracing::debug!(
            container_height,
            index = config.index,
            position = registers.position(),
            "sheet created"
        );

        Ok(Self {
            config,
            registers,
            animator,
            scrollable: Arc::new(ScrollableSlot::new()),
            control_sender,
            control_receiver: Some(control_receiver),
        })
    }

    /// Build a sheet driven by a shared animation scheduler, using the
    /// curve from the config's `[animation]` table.
    pub fn with_scheduler(
        config: SheetConfig,
        container_height: f32,
        scheduler: &Arc<Mutex<AnimationScheduler>>,
    ) -> Result<Self> {
        let curve = config.animation.to_animation_config();
        Self::new(config, container_height, |registers| {
            Arc::new(SheetAnimator::new(scheduler, registers, curve)) as SharedAnimationDriver
        })
    }

    // =====================================================================
    // Wiring
    // =====================================================================

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn registers(&self) -> &Arc<SheetRegisters> {
        &self.registers
    }

    pub fn animator(&self) -> &SharedAnimationDriver {
        &self.animator
    }

    /// Gesture engine for the synchronous context
    pub fn gesture_engine(&self) -> GestureEngine {
        GestureEngine::new(
            Arc::clone(&self.registers),
            Arc::clone(&self.animator),
            Arc::clone(&self.scrollable),
            self.control_sender.clone(),
            GestureSettings::from(&self.config),
        )
    }

    /// Scroll-lock coordinator for the synchronous context
    pub fn scroll_lock(&self) -> ScrollLockCoordinator {
        ScrollLockCoordinator::new(
            Arc::clone(&self.registers),
            Arc::clone(&self.scrollable),
            ScrollLockSettings::from(&self.config),
        )
    }

    /// Receiver for requests raised by gestures. Can be taken once.
    pub fn take_control_requests(&mut self) -> Option<ControlReceiver> {
        self.control_receiver.take()
    }

    /// Mount a scrollable in the sheet
    pub fn attach_scrollable(
        &self,
        host: Arc<dyn ScrollableHost>,
        scrollable_type: ScrollableType,
        refreshable: bool,
    ) {
        self.scrollable.attach(host);
        self.registers.set_scrollable(scrollable_type, refreshable);
    }

    pub fn detach_scrollable(&self) {
        self.scrollable.detach();
        self.registers
            .set_scrollable(ScrollableType::Undetermined, false);
    }

    // =====================================================================
    // Commands
    // =====================================================================

    /// Animate to the snap point at `index`
    pub fn snap_to_index(&self, index: i32) -> Result<()> {
        let len = self.registers.with_snap_points(|points| points.len());
        let position = usize::try_from(index)
            .ok()
            .and_then(|i| self.registers.with_snap_points(|points| points.get(i)));
        let Some(position) = position else {
            tracing::warn!(index, len, "snap index out of range");
            return Err(SheetError::InvalidSnapIndex { index, len });
        };
        self.animate_user(position);
        Ok(())
    }

    /// Animate to an arbitrary position, rounded to the device pixel
    pub fn snap_to_position(&self, position: f32) {
        let position = round_to_nearest_pixel(position, self.registers.pixel_density());
        self.animate_user(position);
    }

    /// Animate to the highest snap point
    pub fn expand(&self) {
        self.animate_user(self.registers.highest_snap_point());
    }

    /// Animate to the lowest snap point
    pub fn collapse(&self) {
        let lowest = self.registers.with_snap_points(|points| points.lowest());
        self.animate_user(lowest);
    }

    /// Animate to the closed position
    pub fn close(&self) {
        self.animate_user(self.registers.closed_position());
    }

    /// Close even while a gesture holds the sheet
    pub fn force_close(&self) {
        let holder = self.registers.gesture_source();
        if holder != GestureSource::None {
            tracing::debug!(?holder, "force closing over active gesture");
        }
        self.registers.set_in_temporary_position(false);
        self.animator.animate_to_position(
            self.registers.closed_position(),
            AnimationCause::User,
            0.0,
        );
    }

    /// Programmatic move. Ignored while a gesture holds the sheet.
    fn animate_user(&self, destination: f32) {
        let holder = self.registers.gesture_source();
        if holder != GestureSource::None {
            tracing::debug!(?holder, destination, "command ignored during gesture");
            return;
        }
        self.registers.set_in_temporary_position(false);
        tracing::debug!(destination, "user command");
        self.animator
            .animate_to_position(destination, AnimationCause::User, 0.0);
    }

    // =====================================================================
    // Layout
    // =====================================================================

    /// The container was resized
    pub fn set_container_height(&self, container_height: f32) -> Result<()> {
        let snap_points = self
            .config
            .normalize_snap_points(container_height, self.registers.pixel_density())?;
        self.relayout(snap_points, container_height, AnimationCause::ContainerResize)
    }

    /// Replace the declared snap points
    pub fn set_snap_points(&mut self, snap_points: Vec<SnapPointSpec>) -> Result<()> {
        let mut config = self.config.clone();
        config.snap_points = snap_points;
        config.validate()?;

        let container_height = self.registers.container_height();
        let normalized =
            config.normalize_snap_points(container_height, self.registers.pixel_density())?;
        self.config = config;
        self.relayout(normalized, container_height, AnimationCause::SnapPointChange)
    }

    /// Height of the window hosting the container, used to locate the
    /// keyboard's top edge
    pub fn set_window_height(&self, window_height: f32) {
        self.registers.set_window_height(window_height);
    }

    /// Device pixel density for rounding snap positions
    pub fn set_pixel_density(&self, pixel_density: f32) -> Result<()> {
        if !pixel_density.is_finite() || pixel_density <= 0.0 {
            return Err(ConfigError::InvalidPixelDensity(pixel_density).into());
        }
        let container_height = self.registers.container_height();
        let snap_points = self
            .config
            .normalize_snap_points(container_height, pixel_density)?;
        self.registers.set_pixel_density(pixel_density);
        self.relayout(snap_points, container_height, AnimationCause::ContainerResize)
    }

    fn relayout(
        &self,
        snap_points: SnapPoints,
        container_height: f32,
        cause: AnimationCause,
    ) -> Result<()> {
        let last_index = snap_points.len() as i32 - 1;
        self.registers.set_layout(snap_points, container_height)?;

        let mut index = self.registers.current_index();
        if index > last_index {
            index = last_index;
            self.registers.set_current_index(index);
        }

        let idle = self.registers.gesture_token().is_free() && !self.registers.is_animating();
        if !idle || self.registers.is_in_temporary_position() {
            return Ok(());
        }

        let destination = match snap_position(&self.registers, index) {
            Some(position) => position,
            None => self.registers.closed_position(),
        };
        if !floating_point_equals(destination, self.registers.position()) {
            tracing::debug!(destination, index, ?cause, "re-seating sheet after layout change");
            self.animator.animate_to_position(destination, cause, 0.0);
        }
        Ok(())
    }

    // =====================================================================
    // Keyboard
    // =====================================================================

    /// Feed a keyboard visibility change
    pub fn handle_keyboard(&self, event: KeyboardEvent) {
        self.registers.set_keyboard(event.state, event.height);

        match event.state {
            KeyboardState::Shown => {
                if !self.registers.gesture_token().is_free() {
                    return;
                }
                let current = snap_position(&self.registers, self.registers.current_index());
                let Some(target) = keyboard_target_position(
                    self.config.keyboard_behavior,
                    current,
                    self.registers.highest_snap_point(),
                    event.height,
                ) else {
                    return;
                };
                self.registers.set_in_temporary_position(true);
                if needs_move(self.registers.position(), target) {
                    tracing::debug!(target, height = event.height, "raising sheet for keyboard");
                    self.animator
                        .animate_to_position(target, AnimationCause::Keyboard, 0.0);
                }
            }
            KeyboardState::Hidden => {
                if !self.registers.is_in_temporary_position()
                    || self.config.keyboard_blur_behavior != KeyboardBlurBehavior::Restore
                {
                    return;
                }
                self.registers.set_in_temporary_position(false);
                let destination = snap_position(&self.registers, self.registers.current_index())
                    .unwrap_or_else(|| self.registers.closed_position());
                tracing::debug!(destination, "restoring sheet after keyboard");
                self.animator
                    .animate_to_position(destination, AnimationCause::Keyboard, 0.0);
            }
            KeyboardState::Undetermined => {}
        }
    }

    // =====================================================================
    // Settle
    // =====================================================================

    /// Record where a transition landed.
    ///
    /// Returns the snap index the sheet is now at, `-1` when closed. The
    /// executor has already recorded it; keyboard transitions keep the index
    /// the sheet held before the keyboard.
    pub fn on_animation_settled(&self, settled: &SettledTransition) -> i32 {
        let index = self.registers.current_index();
        tracing::debug!(
            index,
            destination = settled.destination,
            cause = ?settled.cause,
            temporary = self.registers.is_in_temporary_position(),
            "sheet animation settled"
        );
        index
    }

    /// Continuous index for interpolating dependent visuals
    pub fn animated_index(&self) -> f32 {
        self.registers.animated_index()
    }

    pub fn current_index(&self) -> i32 {
        self.registers.current_index()
    }
}

impl std::fmt::Debug for SheetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetController")
            .field("registers", &self.registers)
            .field("scrollable", &self.scrollable)
            .finish_non_exhaustive()
    }
}

fn check_index(index: i32, snap_points: &SnapPoints) -> Result<()> {
    if index < -1 || index >= snap_points.len() as i32 {
        return Err(SheetError::InvalidSnapIndex {
            index,
            len: snap_points.len(),
        });
    }
    Ok(())
}

/// Position of snap `index`, `None` for `-1` or out of range
fn snap_position(registers: &SheetRegisters, index: i32) -> Option<f32> {
    let index = usize::try_from(index).ok()?;
    registers.with_snap_points(|points| points.get(index))
}
