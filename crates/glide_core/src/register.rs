//! Shared sheet registers
//!
//! The single source of truth read and written by the gesture engine, the
//! scroll-lock coordinator, the animation executor and the control context.
//! Every register is a lock-free atomic except the snap point list, which is
//! only replaced on re-layout.
//!
//! Write ownership is by convention: the holder of the [`GestureToken`] writes
//! position from gesture input, the animation executor writes it during
//! programmatic transitions. Position and its derived [`SheetState`] share
//! one atomic word so a reader never sees one without the other.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::animation::AnimationCause;
use crate::error::Result;
use crate::events::{event_types, EventType};
use crate::snap::{self, SnapPoints};
use crate::state::{
    AnimationState, GestureSource, GestureState, KeyboardState, RegisterValue, ScrollableState,
    ScrollableType, SheetState, StateTransitions,
};

// =========================================================================
// Primitive Cells
// =========================================================================

/// An `f32` stored in an `AtomicU32`
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for AtomicF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF32").field(&self.load()).finish()
    }
}

/// A single-byte register holding an enum value
pub struct Register<T: RegisterValue> {
    bits: AtomicU8,
    _marker: PhantomData<fn() -> T>,
}

impl<T: RegisterValue> Register<T> {
    pub fn new(value: T) -> Self {
        Self {
            bits: AtomicU8::new(value.to_bits()),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn load(&self) -> T {
        T::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, value: T) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Store `new` only if the register currently holds `current`.
    ///
    /// Returns the previous value in either case, as `Ok` on success.
    pub fn compare_exchange(&self, current: T, new: T) -> std::result::Result<T, T> {
        self.bits
            .compare_exchange(
                current.to_bits(),
                new.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(T::from_bits)
            .map_err(T::from_bits)
    }
}

impl<T: RegisterValue + StateTransitions> Register<T> {
    /// Feed an event through the value's transition table.
    ///
    /// Returns the new value if a transition happened.
    pub fn transition(&self, event: EventType) -> Option<T> {
        let current = self.load();
        let next = current.on_event(event)?;
        match self.compare_exchange(current, next) {
            Ok(_) => Some(next),
            // Lost a race with another writer; their value stands.
            Err(_) => None,
        }
    }
}

impl<T: RegisterValue + Default> Default for Register<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: RegisterValue + fmt::Debug> fmt::Debug for Register<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Register").field(&self.load()).finish()
    }
}

// =========================================================================
// Position
// =========================================================================

/// Position and its derived sheet state packed into one atomic word.
///
/// Low 32 bits hold the `f32` position, the next 8 bits the state.
pub struct PositionCell {
    word: AtomicU64,
}

impl PositionCell {
    pub fn new(position: f32, state: SheetState) -> Self {
        Self {
            word: AtomicU64::new(Self::pack(position, state)),
        }
    }

    fn pack(position: f32, state: SheetState) -> u64 {
        ((state.to_bits() as u64) << 32) | position.to_bits() as u64
    }

    fn unpack(word: u64) -> (f32, SheetState) {
        let position = f32::from_bits((word & 0xFFFF_FFFF) as u32);
        let state = SheetState::from_bits(((word >> 32) & 0xFF) as u8);
        (position, state)
    }

    #[inline]
    pub fn load(&self) -> (f32, SheetState) {
        Self::unpack(self.word.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, position: f32, state: SheetState) {
        self.word
            .store(Self::pack(position, state), Ordering::Release);
    }
}

impl fmt::Debug for PositionCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (position, state) = self.load();
        f.debug_struct("PositionCell")
            .field("position", &position)
            .field("state", &state)
            .finish()
    }
}

// =========================================================================
// Gesture Token
// =========================================================================

/// Non-blocking mutual exclusion between gesture sources.
///
/// The first source to claim wins; later claims fail without waiting.
#[derive(Debug, Default)]
pub struct GestureToken {
    holder: Register<GestureSource>,
}

impl GestureToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the token for `source`.
    ///
    /// Succeeds if the token is free or already held by `source`.
    pub fn claim(&self, source: GestureSource) -> bool {
        if source == GestureSource::None {
            return false;
        }
        match self.holder.compare_exchange(GestureSource::None, source) {
            Ok(_) => true,
            Err(current) => current == source,
        }
    }

    /// Give the token back. Only the holder can release it.
    pub fn release(&self, source: GestureSource) -> bool {
        source != GestureSource::None
            && self
                .holder
                .compare_exchange(source, GestureSource::None)
                .is_ok()
    }

    pub fn holder(&self) -> GestureSource {
        self.holder.load()
    }

    pub fn is_held_by(&self, source: GestureSource) -> bool {
        source != GestureSource::None && self.holder() == source
    }

    pub fn is_free(&self) -> bool {
        self.holder() == GestureSource::None
    }
}

// =========================================================================
// Sheet Registers
// =========================================================================

/// All shared state of one sheet
pub struct SheetRegisters {
    position: PositionCell,

    // Layout
    snap_points: RwLock<SnapPoints>,
    highest_snap_point: AtomicF32,
    closed_position: AtomicF32,
    container_height: AtomicF32,
    window_height: AtomicF32,
    pixel_density: AtomicF32,
    current_index: AtomicI32,

    // Gestures
    gesture_token: GestureToken,
    handle_gesture_state: Register<GestureState>,
    content_gesture_state: Register<GestureState>,
    pan_gesture_moving: AtomicBool,
    pan_gesture_moved_y: AtomicF32,
    in_temporary_position: AtomicBool,

    // Animation
    animation_state: Register<AnimationState>,

    // Keyboard
    keyboard_state: Register<KeyboardState>,
    keyboard_height: AtomicF32,

    // Scrollable
    scrollable_type: Register<ScrollableType>,
    scrollable_refreshable: AtomicBool,
    scrollable_content_offset_y: AtomicF32,
    scroll_lock_requested: AtomicBool,
    scroll_ended: AtomicBool,
}

impl SheetRegisters {
    /// Create registers for a sheet that starts closed.
    ///
    /// The closed position is the container's bottom edge.
    pub fn new(snap_points: SnapPoints, container_height: f32) -> Result<Self> {
        snap_points.validate_within(container_height)?;

        let highest = snap_points.highest();
        Ok(Self {
            position: PositionCell::new(container_height, SheetState::Closed),
            snap_points: RwLock::new(snap_points),
            highest_snap_point: AtomicF32::new(highest),
            closed_position: AtomicF32::new(container_height),
            container_height: AtomicF32::new(container_height),
            window_height: AtomicF32::new(container_height),
            pixel_density: AtomicF32::new(1.0),
            current_index: AtomicI32::new(-1),
            gesture_token: GestureToken::new(),
            handle_gesture_state: Register::default(),
            content_gesture_state: Register::default(),
            pan_gesture_moving: AtomicBool::new(false),
            pan_gesture_moved_y: AtomicF32::default(),
            in_temporary_position: AtomicBool::new(false),
            animation_state: Register::default(),
            keyboard_state: Register::default(),
            keyboard_height: AtomicF32::default(),
            scrollable_type: Register::default(),
            scrollable_refreshable: AtomicBool::new(false),
            scrollable_content_offset_y: AtomicF32::default(),
            scroll_lock_requested: AtomicBool::new(false),
            scroll_ended: AtomicBool::new(true),
        })
    }

    // =====================================================================
    // Layout
    // =====================================================================

    /// Replace the snap layout, re-deriving the sheet state of the current
    /// position against it.
    pub fn set_layout(&self, snap_points: SnapPoints, container_height: f32) -> Result<()> {
        snap_points.validate_within(container_height)?;

        let highest = snap_points.highest();
        {
            let mut guard = self
                .snap_points
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = snap_points;
        }
        self.highest_snap_point.store(highest);
        self.closed_position.store(container_height);
        self.container_height.store(container_height);

        let (position, _) = self.position.load();
        let state = self.set_position(position);
        tracing::debug!(
            highest,
            container_height,
            ?state,
            "sheet layout replaced"
        );
        Ok(())
    }

    /// Copy of the declared snap points
    pub fn snap_points(&self) -> SnapPoints {
        self.snap_points
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `f` against the declared snap points without cloning them
    pub fn with_snap_points<R>(&self, f: impl FnOnce(&SnapPoints) -> R) -> R {
        let guard = self
            .snap_points
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn highest_snap_point(&self) -> f32 {
        self.highest_snap_point.load()
    }

    pub fn closed_position(&self) -> f32 {
        self.closed_position.load()
    }

    pub fn container_height(&self) -> f32 {
        self.container_height.load()
    }

    pub fn window_height(&self) -> f32 {
        self.window_height.load()
    }

    pub fn set_window_height(&self, height: f32) {
        self.window_height.store(height);
    }

    pub fn pixel_density(&self) -> f32 {
        self.pixel_density.load()
    }

    pub fn set_pixel_density(&self, density: f32) {
        self.pixel_density.store(density);
    }

    /// Snap index the sheet last settled at, `-1` when closed
    pub fn current_index(&self) -> i32 {
        self.current_index.load(Ordering::Acquire)
    }

    pub fn set_current_index(&self, index: i32) {
        self.current_index.store(index, Ordering::Release);
    }

    // =====================================================================
    // Position
    // =====================================================================

    pub fn position(&self) -> f32 {
        self.position.load().0
    }

    pub fn sheet_state(&self) -> SheetState {
        self.position.load().1
    }

    /// Position and the state derived from it, read together
    pub fn position_and_state(&self) -> (f32, SheetState) {
        self.position.load()
    }

    /// Write position and re-derive sheet state in the same store
    pub fn set_position(&self, position: f32) -> SheetState {
        let state = snap::resolve_sheet_state(
            position,
            self.highest_snap_point.load(),
            self.closed_position.load(),
        );
        self.position.store(position, state);
        state
    }

    /// Continuous index of the current position
    pub fn animated_index(&self) -> f32 {
        let position = self.position();
        let closed = self.closed_position();
        self.with_snap_points(|points| snap::animated_index(position, points, closed))
    }

    pub fn is_expanded(&self) -> bool {
        self.sheet_state().is_expanded()
    }

    /// Land exactly on `destination` and mark the animation finished.
    ///
    /// Keyboard transitions leave the current snap index alone so a restore
    /// returns to the snap point the sheet held before the keyboard.
    pub fn settle_at(&self, destination: f32, cause: AnimationCause) -> SheetState {
        let state = self.set_position(destination);
        let index = if cause == AnimationCause::Keyboard {
            self.current_index()
        } else {
            self.record_snap_index(destination)
        };
        self.animation_state.transition(event_types::ANIMATION_SETTLE);
        tracing::debug!(destination, index, ?cause, ?state, "sheet settled");
        state
    }

    /// Record the snap index of a resting `position` and return the index.
    ///
    /// `-1` at the closed position. Positions off the snap set, and any
    /// position while the sheet is temporary, keep the previous index.
    pub fn record_snap_index(&self, position: f32) -> i32 {
        if self.is_in_temporary_position() {
            return self.current_index();
        }
        let index = if snap::floating_point_equals(position, self.closed_position()) {
            Some(-1)
        } else {
            self.with_snap_points(|points| points.index_of(position))
                .map(|i| i as i32)
        };
        match index {
            Some(index) => {
                self.set_current_index(index);
                index
            }
            None => self.current_index(),
        }
    }

    // =====================================================================
    // Gestures
    // =====================================================================

    pub fn gesture_token(&self) -> &GestureToken {
        &self.gesture_token
    }

    pub fn gesture_source(&self) -> GestureSource {
        self.gesture_token.holder()
    }

    pub fn gesture_state(&self, source: GestureSource) -> GestureState {
        match source {
            GestureSource::Handle => self.handle_gesture_state.load(),
            GestureSource::Content => self.content_gesture_state.load(),
            GestureSource::None => GestureState::Undetermined,
        }
    }

    /// Advance the lifecycle of one source's gesture
    pub fn transition_gesture_state(
        &self,
        source: GestureSource,
        event: EventType,
    ) -> Option<GestureState> {
        match source {
            GestureSource::Handle => self.handle_gesture_state.transition(event),
            GestureSource::Content => self.content_gesture_state.transition(event),
            GestureSource::None => None,
        }
    }

    pub fn is_pan_gesture_moving(&self) -> bool {
        self.pan_gesture_moving.load(Ordering::Acquire)
    }

    pub fn set_pan_gesture_moving(&self, moving: bool) {
        self.pan_gesture_moving.store(moving, Ordering::Release);
    }

    /// Translation captured while the content scrolled instead of the sheet
    pub fn pan_gesture_moved_y(&self) -> f32 {
        self.pan_gesture_moved_y.load()
    }

    pub fn set_pan_gesture_moved_y(&self, moved: f32) {
        self.pan_gesture_moved_y.store(moved);
    }

    pub fn is_in_temporary_position(&self) -> bool {
        self.in_temporary_position.load(Ordering::Acquire)
    }

    pub fn set_in_temporary_position(&self, temporary: bool) {
        self.in_temporary_position.store(temporary, Ordering::Release);
    }

    // =====================================================================
    // Animation
    // =====================================================================

    pub fn animation_state(&self) -> AnimationState {
        self.animation_state.load()
    }

    pub fn is_animating(&self) -> bool {
        self.animation_state() == AnimationState::Running
    }

    /// Advance the animation lifecycle (start, stop, settle)
    pub fn transition_animation(&self, event: EventType) -> Option<AnimationState> {
        self.animation_state.transition(event)
    }

    // =====================================================================
    // Keyboard
    // =====================================================================

    pub fn keyboard_state(&self) -> KeyboardState {
        self.keyboard_state.load()
    }

    pub fn keyboard_height(&self) -> f32 {
        self.keyboard_height.load()
    }

    /// Feed a keyboard visibility sample through the keyboard transitions
    pub fn set_keyboard(&self, state: KeyboardState, height: f32) {
        self.keyboard_height.store(height);
        let event = match state {
            KeyboardState::Shown => event_types::KEYBOARD_SHOW,
            KeyboardState::Hidden => event_types::KEYBOARD_HIDE,
            KeyboardState::Undetermined => {
                self.keyboard_state.store(KeyboardState::Undetermined);
                return;
            }
        };
        self.keyboard_state.transition(event);
    }

    // =====================================================================
    // Scrollable
    // =====================================================================

    pub fn scrollable_type(&self) -> ScrollableType {
        self.scrollable_type.load()
    }

    pub fn is_scrollable_refreshable(&self) -> bool {
        self.scrollable_refreshable.load(Ordering::Acquire)
    }

    /// Register the content mounted in the sheet
    pub fn set_scrollable(&self, scrollable_type: ScrollableType, refreshable: bool) {
        self.scrollable_type.store(scrollable_type);
        self.scrollable_refreshable
            .store(refreshable, Ordering::Release);
    }

    /// Last content offset propagated by the scroll-lock coordinator
    pub fn scrollable_content_offset_y(&self) -> f32 {
        self.scrollable_content_offset_y.load()
    }

    pub fn set_scrollable_content_offset_y(&self, offset: f32) {
        self.scrollable_content_offset_y.store(offset);
    }

    pub fn is_scroll_lock_requested(&self) -> bool {
        self.scroll_lock_requested.load(Ordering::Acquire)
    }

    pub fn set_scroll_lock_requested(&self, locked: bool) {
        self.scroll_lock_requested.store(locked, Ordering::Release);
    }

    /// Whether the finger has lifted off the scrollable
    pub fn is_scroll_ended(&self) -> bool {
        self.scroll_ended.load(Ordering::Acquire)
    }

    pub fn set_scroll_ended(&self, ended: bool) {
        self.scroll_ended.store(ended, Ordering::Release);
    }

    /// Derived lock state of the nested scrollable.
    ///
    /// A requested lock is lifted while the sheet is fully open, and while
    /// a keyboard-driven animation is running so the scroll offset survives.
    pub fn scrollable_state(&self) -> ScrollableState {
        if !self.is_scroll_lock_requested() {
            return ScrollableState::Unlocked;
        }
        if self.sheet_state().is_expanded() {
            return ScrollableState::Unlocked;
        }
        if self.keyboard_state() == KeyboardState::Shown && self.is_animating() {
            return ScrollableState::Unlocked;
        }
        ScrollableState::Locked
    }
}

impl fmt::Debug for SheetRegisters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (position, state) = self.position.load();
        f.debug_struct("SheetRegisters")
            .field("position", &position)
            .field("state", &state)
            .field("gesture_source", &self.gesture_source())
            .field("animation_state", &self.animation_state())
            .field("scrollable_state", &self.scrollable_state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn registers() -> SheetRegisters {
        let points = SnapPoints::new(vec![600.0, 300.0, 100.0]).unwrap();
        SheetRegisters::new(points, 800.0).unwrap()
    }

    #[test]
    fn test_position_cell_roundtrip() {
        let cell = PositionCell::new(-12.5, SheetState::FillParent);
        assert_eq!(cell.load(), (-12.5, SheetState::FillParent));

        cell.store(f32::MAX, SheetState::Collapsed);
        assert_eq!(cell.load(), (f32::MAX, SheetState::Collapsed));
    }

    #[test]
    fn test_initial_registers() {
        let registers = registers();
        assert_eq!(registers.position(), 800.0);
        assert_eq!(registers.sheet_state(), SheetState::Closed);
        assert_eq!(registers.highest_snap_point(), 100.0);
        assert_eq!(registers.current_index(), -1);
        assert_eq!(registers.gesture_source(), GestureSource::None);
        assert_eq!(registers.scrollable_state(), ScrollableState::Unlocked);
    }

    #[test]
    fn test_set_position_derives_state() {
        let registers = registers();
        assert_eq!(registers.set_position(300.0), SheetState::Collapsed);
        assert_eq!(registers.set_position(100.0), SheetState::Extended);
        assert_eq!(registers.position_and_state(), (100.0, SheetState::Extended));
        assert!(registers.is_expanded());
    }

    #[test]
    fn test_set_layout_rederives_state() {
        let registers = registers();
        registers.set_position(300.0);
        assert_eq!(registers.sheet_state(), SheetState::Collapsed);

        let points = SnapPoints::new(vec![600.0, 300.0]).unwrap();
        registers.set_layout(points, 800.0).unwrap();
        assert_eq!(registers.sheet_state(), SheetState::Extended);
        assert_eq!(registers.highest_snap_point(), 300.0);
    }

    #[test]
    fn test_set_layout_rejects_oversized_points() {
        let registers = registers();
        let points = SnapPoints::new(vec![900.0, 300.0]).unwrap();
        assert!(registers.set_layout(points, 800.0).is_err());
        assert_eq!(registers.highest_snap_point(), 100.0);
    }

    #[test]
    fn test_token_first_claimant_wins() {
        let token = GestureToken::new();
        assert!(token.claim(GestureSource::Handle));
        assert!(!token.claim(GestureSource::Content));
        assert!(token.claim(GestureSource::Handle));
        assert_eq!(token.holder(), GestureSource::Handle);

        assert!(!token.release(GestureSource::Content));
        assert!(token.release(GestureSource::Handle));
        assert!(!token.release(GestureSource::Handle));
        assert!(token.is_free());
    }

    #[test]
    fn test_token_concurrent_claims() {
        for _ in 0..50 {
            let token = Arc::new(GestureToken::new());
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = [GestureSource::Handle, GestureSource::Content]
                .into_iter()
                .map(|source| {
                    let token = Arc::clone(&token);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        token.claim(source)
                    })
                })
                .collect();

            let wins = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|won| *won)
                .count();
            assert_eq!(wins, 1);
            assert!(!token.is_free());
        }
    }

    #[test]
    fn test_settle_at_records_index() {
        let registers = registers();
        registers.transition_animation(event_types::ANIMATION_START);
        assert!(registers.is_animating());

        registers.settle_at(300.004, AnimationCause::Gesture);
        assert_eq!(registers.current_index(), 1);
        assert_eq!(registers.animation_state(), AnimationState::Stopped);

        registers.settle_at(800.0, AnimationCause::User);
        assert_eq!(registers.current_index(), -1);
    }

    #[test]
    fn test_keyboard_settle_keeps_index() {
        let registers = registers();
        registers.settle_at(300.0, AnimationCause::User);
        assert_eq!(registers.current_index(), 1);

        registers.set_in_temporary_position(true);
        registers.settle_at(100.0, AnimationCause::Keyboard);
        assert_eq!(registers.current_index(), 1);
        assert_eq!(registers.sheet_state(), SheetState::Extended);

        // Still temporary: a gesture snap back keeps the index too
        assert_eq!(registers.record_snap_index(100.0), 1);

        registers.set_in_temporary_position(false);
        assert_eq!(registers.record_snap_index(100.0), 2);
        assert_eq!(registers.record_snap_index(250.0), 2);
    }

    #[test]
    fn test_keyboard_feed_uses_transitions() {
        let registers = registers();
        registers.set_keyboard(KeyboardState::Shown, 320.0);
        assert_eq!(registers.keyboard_state(), KeyboardState::Shown);
        assert_eq!(registers.keyboard_height(), 320.0);

        registers.set_keyboard(KeyboardState::Shown, 280.0);
        assert_eq!(registers.keyboard_state(), KeyboardState::Shown);
        assert_eq!(registers.keyboard_height(), 280.0);

        registers.set_keyboard(KeyboardState::Hidden, 0.0);
        assert_eq!(registers.keyboard_state(), KeyboardState::Hidden);

        registers.set_keyboard(KeyboardState::Undetermined, 0.0);
        assert_eq!(registers.keyboard_state(), KeyboardState::Undetermined);
    }

    #[test]
    fn test_scrollable_state_derivation() {
        let registers = registers();
        registers.set_position(300.0);
        registers.set_scroll_lock_requested(true);
        assert_eq!(registers.scrollable_state(), ScrollableState::Locked);

        registers.set_keyboard(KeyboardState::Shown, 300.0);
        registers.transition_animation(event_types::ANIMATION_START);
        assert_eq!(registers.scrollable_state(), ScrollableState::Unlocked);
        registers.transition_animation(event_types::ANIMATION_STOP);
        assert_eq!(registers.scrollable_state(), ScrollableState::Locked);

        registers.set_position(100.0);
        assert_eq!(registers.scrollable_state(), ScrollableState::Unlocked);
    }

    #[test]
    fn test_gesture_state_per_source() {
        let registers = registers();
        registers.transition_gesture_state(GestureSource::Handle, event_types::GESTURE_START);
        registers.transition_gesture_state(GestureSource::Handle, event_types::GESTURE_CHANGE);
        assert!(registers.gesture_state(GestureSource::Handle).is_active());
        assert_eq!(
            registers.gesture_state(GestureSource::Content),
            GestureState::Undetermined
        );
    }
}
