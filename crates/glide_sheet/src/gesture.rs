//! Gesture arbitration and position engine
//!
//! Turns pan samples from the drag handle and the sheet content into sheet
//! positions. Both sources feed the same engine; the [`GestureToken`] in the
//! registers decides which one drives position, first claimant wins.
//!
//! Lifecycle per source:
//!
//! ```text
//! BEGIN ──► START ──► CHANGE* ──► END ──► FINALIZE
//!  │          │                             │
//!  pointer    claim token,                  reset context,
//!  down       stop animation                release token
//! ```
//!
//! The token is held until FINALIZE, which always follows END or a cancel.
//!
//! [`GestureToken`]: glide_core::GestureToken

use std::sync::Arc;

use glide_core::{
    event_types, floating_point_equals, AnimationCause, EventType, GestureSource, KeyboardState,
    PanSample, ScrollableType, SharedAnimationDriver, SheetRegisters,
};
use smallvec::SmallVec;

use crate::config::{Platform, SheetConfig};
use crate::keyboard::{send_request, ControlRequest, ControlSender};
use crate::projection::project_destination;
use crate::scrollable::ScrollableSlot;

/// Distance past a bound after applying over-drag resistance.
///
/// `overshoot` is the unresisted distance past the bound. The result grows
/// with its square root.
#[inline]
pub fn resisted_overshoot(overshoot: f32, resistance_factor: f32) -> f32 {
    (1.0 + overshoot.abs()).sqrt() * resistance_factor
}

// =========================================================================
// Settings
// =========================================================================

/// The part of [`SheetConfig`] the engine reads on every sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub enable_pan_down_to_close: bool,
    pub enable_over_drag: bool,
    pub over_drag_resistance_factor: f32,
    pub enable_content_panning_gesture: bool,
    pub enable_handle_panning_gesture: bool,
    pub platform: Platform,
}

impl From<&SheetConfig> for GestureSettings {
    fn from(config: &SheetConfig) -> Self {
        Self {
            enable_pan_down_to_close: config.enable_pan_down_to_close,
            enable_over_drag: config.enable_over_drag,
            over_drag_resistance_factor: config.over_drag_resistance_factor,
            enable_content_panning_gesture: config.enable_content_panning_gesture,
            enable_handle_panning_gesture: config.enable_handle_panning_gesture,
            platform: config.platform,
        }
    }
}

impl GestureSettings {
    fn is_source_enabled(&self, source: GestureSource) -> bool {
        match source {
            GestureSource::Handle => self.enable_handle_panning_gesture,
            GestureSource::Content => self.enable_content_panning_gesture,
            GestureSource::None => false,
        }
    }
}

// =========================================================================
// Gesture Context
// =========================================================================

/// Snapshot taken when a gesture claims the token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub initial_position: f32,
    pub initial_keyboard_state: KeyboardState,
}

// =========================================================================
// Engine
// =========================================================================

/// Gesture engine for one sheet, owned by the synchronous context
pub struct GestureEngine {
    registers: Arc<SheetRegisters>,
    animator: SharedAnimationDriver,
    scrollable: Arc<ScrollableSlot>,
    control: ControlSender,
    settings: GestureSettings,
    /// Present only between START and FINALIZE of the token holder
    context: Option<GestureContext>,
}

impl GestureEngine {
    pub fn new(
        registers: Arc<SheetRegisters>,
        animator: SharedAnimationDriver,
        scrollable: Arc<ScrollableSlot>,
        control: ControlSender,
        settings: GestureSettings,
    ) -> Self {
        Self {
            registers,
            animator,
            scrollable,
            control,
            settings,
            context: None,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GestureSettings) {
        self.settings = settings;
    }

    /// Context of the gesture in flight, `None` when idle
    pub fn context(&self) -> Option<GestureContext> {
        self.context
    }

    pub fn registers(&self) -> &Arc<SheetRegisters> {
        &self.registers
    }

    /// Dispatch one pan event from `source`
    pub fn handle(&mut self, event: EventType, source: GestureSource, sample: PanSample) {
        match event {
            event_types::GESTURE_BEGIN => self.begin(source),
            event_types::GESTURE_START => {
                self.start(source);
            }
            event_types::GESTURE_CHANGE => self.change(source, sample),
            event_types::GESTURE_END => self.end(source, sample),
            event_types::GESTURE_FINALIZE => self.finalize(source),
            _ => tracing::trace!(event, "ignoring non-gesture event"),
        }
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    /// Pointer went down. Does not claim the token.
    pub fn begin(&mut self, source: GestureSource) {
        if !self.settings.is_source_enabled(source) {
            return;
        }
        self.registers.set_pan_gesture_moving(true);
    }

    /// Try to take over the sheet.
    ///
    /// Returns whether `source` now drives position. A start while the other
    /// source holds the token is rejected.
    pub fn start(&mut self, source: GestureSource) -> bool {
        if !self.settings.is_source_enabled(source) {
            return false;
        }

        let token = self.registers.gesture_token();
        if token.is_held_by(source) && self.context.is_some() {
            return true;
        }
        if !token.claim(source) {
            tracing::debug!(
                ?source,
                holder = ?token.holder(),
                "gesture start rejected, token held"
            );
            return false;
        }

        self.registers
            .transition_gesture_state(source, event_types::GESTURE_START);
        self.animator.stop_animation();

        let context = GestureContext {
            initial_position: self.registers.position(),
            initial_keyboard_state: self.registers.keyboard_state(),
        };
        self.context = Some(context);
        tracing::debug!(
            ?source,
            initial_position = context.initial_position,
            "gesture token claimed"
        );
        true
    }

    /// Move the sheet with the drag
    pub fn change(&mut self, source: GestureSource, sample: PanSample) {
        if !self.registers.gesture_token().is_held_by(source) {
            return;
        }
        let Some(context) = self.context else {
            return;
        };
        self.registers
            .transition_gesture_state(source, event_types::GESTURE_CHANGE);

        let registers = &self.registers;
        let highest = self.effective_highest_snap_point(&context);
        let lowest = if self.settings.enable_pan_down_to_close {
            registers.container_height()
        } else {
            registers.with_snap_points(|points| points.lowest())
        };

        if self.is_refresh_gesture(source, highest) {
            return;
        }

        let mut dragged = context.initial_position + sample.translation_y;

        if source == GestureSource::Content {
            let at_content_top =
                floating_point_equals(registers.scrollable_content_offset_y(), 0.0);
            if at_content_top || !registers.is_expanded() {
                dragged -= registers.pan_gesture_moved_y();
            } else {
                // Content is scrolling; remember how far so the sheet picks
                // up from here once the content reaches its top.
                registers.set_pan_gesture_moved_y(sample.translation_y);
                tracing::trace!(
                    translation_y = sample.translation_y,
                    "drag consumed by scrollable"
                );
                return;
            }

            if !floating_point_equals(context.initial_position, highest) && dragged < highest {
                self.scrollable.force_offset(highest - dragged);
            }
        }

        let clamped = dragged.max(highest).min(lowest);

        if self.settings.enable_over_drag {
            let factor = self.settings.over_drag_resistance_factor;
            let past_top = dragged < highest
                && (source == GestureSource::Handle
                    || registers.scrollable_type() == ScrollableType::View);

            if past_top {
                let resisted = highest - resisted_overshoot(highest - dragged, factor);
                registers.set_position(resisted);
                tracing::trace!(dragged, resisted, "over-drag past highest point");
                return;
            }
            if dragged > lowest {
                let resisted = lowest + resisted_overshoot(dragged - lowest, factor);
                registers.set_position(resisted);
                tracing::trace!(dragged, resisted, "over-drag past lowest point");
                return;
            }
        }

        let state = registers.set_position(clamped);
        tracing::trace!(?source, dragged, clamped, ?state, "gesture moved sheet");
    }

    /// Release: choose a destination and hand it to the animator
    pub fn end(&mut self, source: GestureSource, sample: PanSample) {
        if !self.registers.gesture_token().is_held_by(source) {
            return;
        }
        let Some(context) = self.context else {
            return;
        };
        self.registers
            .transition_gesture_state(source, event_types::GESTURE_END);

        let registers = &self.registers;
        let position = registers.position();
        let highest = registers.highest_snap_point();
        let at_highest = floating_point_equals(position, highest);

        if self.is_refresh_gesture(source, highest) {
            return;
        }

        let initial = context.initial_position;
        if registers.is_in_temporary_position() && initial >= position {
            if initial > position {
                tracing::debug!(initial, position, "returning to temporary position");
                self.animator
                    .animate_to_position(initial, AnimationCause::Gesture, sample.velocity_y / 2.0);
            }
            return;
        }

        if context.initial_keyboard_state == KeyboardState::Shown && position > initial {
            let keyboard_top = registers.window_height() - registers.keyboard_height();
            let system_dismisses = self.settings.platform == Platform::Ios
                && registers.scrollable_type().is_scrollable()
                && sample.absolute_y > keyboard_top;
            if !system_dismisses {
                send_request(&self.control, ControlRequest::DismissKeyboard);
            }
        }

        if registers.is_in_temporary_position() {
            registers.set_in_temporary_position(false);
        }

        let candidates = self.destination_candidates();
        let destination = project_destination(
            initial + sample.translation_y,
            sample.velocity_y,
            &candidates,
        );

        if floating_point_equals(destination, position) {
            let index = registers.record_snap_index(destination);
            tracing::debug!(destination, index, "released on destination");
            return;
        }

        let handled_by_scrollable =
            source == GestureSource::Content && registers.scrollable_content_offset_y() > 0.0;
        if handled_by_scrollable && at_highest {
            tracing::debug!("release consumed by scrollable, not snapping");
            return;
        }

        tracing::debug!(
            ?source,
            destination,
            velocity = sample.velocity_y,
            "gesture destination chosen"
        );
        self.animator.animate_to_position(
            destination,
            AnimationCause::Gesture,
            sample.velocity_y / 2.0,
        );
    }

    /// Clean up after end or cancel.
    ///
    /// Idempotent. A finalize from a source that does not hold the token
    /// while the other source does leaves the holder's gesture alone.
    pub fn finalize(&mut self, source: GestureSource) {
        let token = self.registers.gesture_token();
        let holder = token.holder();
        if holder != GestureSource::None && holder != source {
            return;
        }

        self.registers
            .transition_gesture_state(source, event_types::GESTURE_FINALIZE);
        self.context = None;
        self.registers.set_pan_gesture_moving(false);
        self.registers.set_pan_gesture_moved_y(0.0);

        if token.release(source) {
            tracing::debug!(?source, "gesture token released");
        }
    }

    // =====================================================================
    // Helpers
    // =====================================================================

    /// Upper drag bound, lowered while a keyboard holds the sheet up
    fn effective_highest_snap_point(&self, context: &GestureContext) -> f32 {
        let mut highest = self.registers.highest_snap_point();
        if !self.registers.is_in_temporary_position() {
            return highest;
        }
        if context.initial_keyboard_state == KeyboardState::Shown {
            highest = context.initial_position;
        }
        if context.initial_position < highest {
            highest = context.initial_position;
        }
        highest
    }

    /// Content drags on a refreshable scrollable at the top belong to the
    /// refresh control, not the sheet.
    fn is_refresh_gesture(&self, source: GestureSource, highest: f32) -> bool {
        source == GestureSource::Content
            && self.registers.is_scrollable_refreshable()
            && floating_point_equals(self.registers.position(), highest)
    }

    /// Snap points a release may land on, closed position first if enabled
    fn destination_candidates(&self) -> SmallVec<[f32; 5]> {
        let mut candidates = SmallVec::new();
        if self.settings.enable_pan_down_to_close {
            candidates.push(self.registers.closed_position());
        }
        self.registers
            .with_snap_points(|points| candidates.extend(points.iter()));
        candidates
    }
}

impl std::fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEngine")
            .field("settings", &self.settings)
            .field("context", &self.context)
            .field("holder", &self.registers.gesture_source())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapPointSpec;
    use crate::keyboard::{control_channel, ControlReceiver};
    use crate::scrollable::ScrollableHost;
    use glide_core::{AnimationDriver, GestureState, SnapPoints};
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Animate(f32, AnimationCause, f32),
        Stop,
    }

    #[derive(Default)]
    struct RecordingDriver {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingDriver {
        fn animations(&self) -> Vec<(f32, f32)> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|call| match call {
                    Call::Animate(destination, _, velocity) => Some((*destination, *velocity)),
                    Call::Stop => None,
                })
                .collect()
        }
    }

    impl AnimationDriver for RecordingDriver {
        fn animate_to_position(&self, destination: f32, cause: AnimationCause, velocity: f32) {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Animate(destination, cause, velocity));
        }

        fn stop_animation(&self) {
            self.calls.lock().unwrap().push(Call::Stop);
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        offsets: Mutex<Vec<f32>>,
    }

    impl ScrollableHost for RecordingHost {
        fn force_offset(&self, offset_y: f32) {
            self.offsets.lock().unwrap().push(offset_y);
        }
    }

    struct Fixture {
        engine: GestureEngine,
        registers: Arc<SheetRegisters>,
        driver: Arc<RecordingDriver>,
        scrollable: Arc<ScrollableSlot>,
        control: ControlReceiver,
    }

    fn fixture(configure: impl FnOnce(&mut SheetConfig)) -> Fixture {
        let mut config = SheetConfig::new([
            SnapPointSpec::Pixels(200.0),
            SnapPointSpec::Pixels(500.0),
            SnapPointSpec::Pixels(800.0),
        ]);
        configure(&mut config);

        // Positions 600, 300, 0 in an 800px container
        let points = SnapPoints::new(vec![600.0, 300.0, 0.0]).unwrap();
        let registers = Arc::new(SheetRegisters::new(points, 800.0).unwrap());
        registers.set_position(300.0);

        let driver = Arc::new(RecordingDriver::default());
        let scrollable = Arc::new(ScrollableSlot::new());
        let (sender, control) = control_channel();
        let engine = GestureEngine::new(
            Arc::clone(&registers),
            driver.clone(),
            Arc::clone(&scrollable),
            sender,
            GestureSettings::from(&config),
        );
        Fixture {
            engine,
            registers,
            driver,
            scrollable,
            control,
        }
    }

    fn drag(engine: &mut GestureEngine, source: GestureSource, translations: &[f32]) {
        engine.begin(source);
        engine.start(source);
        for &t in translations {
            engine.change(source, PanSample::translation(t));
        }
    }

    #[test]
    fn test_start_snapshots_context_and_stops_animation() {
        let mut f = fixture(|_| {});
        assert!(f.engine.start(GestureSource::Handle));

        let context = f.engine.context().unwrap();
        assert_eq!(context.initial_position, 300.0);
        assert_eq!(context.initial_keyboard_state, KeyboardState::Undetermined);
        assert_eq!(*f.driver.calls.lock().unwrap(), vec![Call::Stop]);
        assert_eq!(
            f.registers.gesture_state(GestureSource::Handle),
            GestureState::Began
        );
    }

    #[test]
    fn test_second_source_rejected() {
        let mut f = fixture(|_| {});
        assert!(f.engine.start(GestureSource::Handle));
        assert!(!f.engine.start(GestureSource::Content));

        f.engine
            .change(GestureSource::Content, PanSample::translation(100.0));
        assert_eq!(f.registers.position(), 300.0);

        f.engine
            .change(GestureSource::Handle, PanSample::translation(100.0));
        assert_eq!(f.registers.position(), 400.0);
    }

    #[test]
    fn test_drag_clamps_without_over_drag() {
        let mut f = fixture(|c| c.enable_over_drag = false);
        drag(&mut f.engine, GestureSource::Handle, &[-500.0]);
        assert_eq!(f.registers.position(), 0.0);

        f.engine
            .change(GestureSource::Handle, PanSample::translation(900.0));
        assert_eq!(f.registers.position(), 600.0);
    }

    #[test]
    fn test_pan_down_to_close_extends_lower_bound() {
        let mut f = fixture(|c| {
            c.enable_over_drag = false;
            c.enable_pan_down_to_close = true;
        });
        drag(&mut f.engine, GestureSource::Handle, &[450.0]);
        assert_eq!(f.registers.position(), 750.0);
    }

    #[test]
    fn test_over_drag_resists() {
        let mut f = fixture(|c| c.over_drag_resistance_factor = 0.5);
        drag(&mut f.engine, GestureSource::Handle, &[-399.0]);
        // 99px past the top: 0 - sqrt(100) * 0.5
        assert_eq!(f.registers.position(), -5.0);

        f.engine
            .change(GestureSource::Handle, PanSample::translation(323.0));
        // 23px past the bottom: 600 + sqrt(24) * 0.5
        assert!((f.registers.position() - (600.0 + 24f32.sqrt() * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_content_over_drag_at_top_only_for_views() {
        let mut f = fixture(|_| {});
        drag(&mut f.engine, GestureSource::Content, &[-350.0]);
        assert_eq!(f.registers.position(), 0.0);
        f.engine.finalize(GestureSource::Content);

        f.registers.set_position(300.0);
        f.registers.set_scrollable(ScrollableType::View, false);
        drag(&mut f.engine, GestureSource::Content, &[-350.0]);
        assert!(f.registers.position() < 0.0);
    }

    #[test]
    fn test_resistance_is_sublinear() {
        let mut last = 0.0;
        for overshoot in [1.0, 10.0, 100.0, 1_000.0, 100_000.0] {
            let resisted = resisted_overshoot(overshoot, 0.5);
            assert!(resisted > last);
            assert!(resisted <= (1.0 + overshoot).sqrt() * 0.5);
            if overshoot > 1.0 {
                assert!(resisted < overshoot);
            }
            last = resisted;
        }
    }

    #[test]
    fn test_release_projects_destination() {
        let mut f = fixture(|_| {});
        drag(&mut f.engine, GestureSource::Handle, &[-20.0]);
        f.engine
            .end(GestureSource::Handle, PanSample::release(-20.0, 2000.0));

        assert_eq!(f.driver.animations(), vec![(600.0, 1000.0)]);
        assert!(matches!(
            f.driver.calls.lock().unwrap().last(),
            Some(Call::Animate(_, AnimationCause::Gesture, _))
        ));
    }

    #[test]
    fn test_release_on_destination_does_not_animate() {
        let mut f = fixture(|_| {});
        drag(&mut f.engine, GestureSource::Handle, &[0.0]);
        f.engine
            .end(GestureSource::Handle, PanSample::release(0.0, 0.0));
        assert!(f.driver.animations().is_empty());
    }

    #[test]
    fn test_release_at_highest_point_records_index() {
        let mut f = fixture(|c| c.enable_over_drag = false);
        drag(&mut f.engine, GestureSource::Handle, &[-900.0]);
        assert_eq!(f.registers.position(), 0.0);

        f.engine
            .end(GestureSource::Handle, PanSample::release(-900.0, 0.0));
        assert!(f.driver.animations().is_empty());
        assert_eq!(f.registers.current_index(), 2);
    }

    #[test]
    fn test_content_drag_past_top_holds_content_offset() {
        let mut f = fixture(|_| {});
        let host = Arc::new(RecordingHost::default());
        f.scrollable.attach(host.clone());
        f.registers.set_scrollable(ScrollableType::ScrollView, false);

        drag(&mut f.engine, GestureSource::Content, &[-200.0, -350.0]);
        assert_eq!(f.registers.position(), 0.0);
        // Only the 50px past the highest point is pushed back into the content
        assert_eq!(*host.offsets.lock().unwrap(), vec![50.0]);
    }

    #[test]
    fn test_content_drag_from_highest_point_scrolls_freely() {
        let mut f = fixture(|_| {});
        let host = Arc::new(RecordingHost::default());
        f.scrollable.attach(host.clone());
        f.registers.set_scrollable(ScrollableType::ScrollView, false);
        f.registers.set_position(0.0);

        drag(&mut f.engine, GestureSource::Content, &[-120.0]);
        assert_eq!(f.registers.position(), 0.0);
        assert!(host.offsets.lock().unwrap().is_empty());
    }

    #[test]
    fn test_pan_down_to_close_candidate() {
        let mut f = fixture(|c| c.enable_pan_down_to_close = true);
        f.registers.set_position(600.0);
        drag(&mut f.engine, GestureSource::Handle, &[100.0]);
        f.engine
            .end(GestureSource::Handle, PanSample::release(100.0, 1000.0));
        assert_eq!(f.driver.animations(), vec![(800.0, 500.0)]);
    }

    #[test]
    fn test_refreshable_content_at_top_is_ignored() {
        let mut f = fixture(|_| {});
        f.registers.set_position(0.0);
        f.registers.set_scrollable(ScrollableType::FlatList, true);

        drag(&mut f.engine, GestureSource::Content, &[120.0]);
        assert_eq!(f.registers.position(), 0.0);
        f.engine
            .end(GestureSource::Content, PanSample::release(120.0, 3000.0));
        assert!(f.driver.animations().is_empty());
    }

    #[test]
    fn test_scrolled_content_captures_translation() {
        let mut f = fixture(|_| {});
        f.registers.set_position(0.0);
        f.registers.set_scrollable(ScrollableType::ScrollView, false);
        f.registers.set_scrollable_content_offset_y(80.0);

        drag(&mut f.engine, GestureSource::Content, &[30.0, 80.0]);
        assert_eq!(f.registers.position(), 0.0);
        assert_eq!(f.registers.pan_gesture_moved_y(), 80.0);

        // Content reached its top; the sheet follows from here
        f.registers.set_scrollable_content_offset_y(0.0);
        f.engine
            .change(GestureSource::Content, PanSample::translation(130.0));
        assert_eq!(f.registers.position(), 50.0);
    }

    #[test]
    fn test_keyboard_dismissed_on_downward_release() {
        let mut f = fixture(|_| {});
        f.registers.set_keyboard(KeyboardState::Shown, 300.0);

        drag(&mut f.engine, GestureSource::Handle, &[150.0]);
        f.engine
            .end(GestureSource::Handle, PanSample::release(150.0, 0.0));
        assert_eq!(f.control.try_recv(), Ok(ControlRequest::DismissKeyboard));
    }

    #[test]
    fn test_interactive_keyboard_dismissal_left_to_system() {
        let mut f = fixture(|c| c.platform = Platform::Ios);
        f.registers.set_keyboard(KeyboardState::Shown, 300.0);
        f.registers.set_scrollable(ScrollableType::FlatList, false);

        drag(&mut f.engine, GestureSource::Handle, &[150.0]);
        // Window is 800 tall, keyboard top at 500
        f.engine.end(
            GestureSource::Handle,
            PanSample::release(150.0, 0.0).at(650.0),
        );
        assert!(f.control.try_recv().is_err());
    }

    #[test]
    fn test_temporary_position_pins_highest_point() {
        let mut f = fixture(|c| c.enable_over_drag = false);
        f.registers.set_keyboard(KeyboardState::Shown, 300.0);
        f.registers.set_position(120.0);
        f.registers.set_in_temporary_position(true);

        drag(&mut f.engine, GestureSource::Handle, &[-80.0]);
        assert_eq!(f.registers.position(), 120.0);
    }

    #[test]
    fn test_finalize_resets_and_releases() {
        let mut f = fixture(|_| {});
        drag(&mut f.engine, GestureSource::Content, &[10.0]);
        f.registers.set_pan_gesture_moved_y(4.0);

        f.engine.finalize(GestureSource::Content);
        assert!(f.engine.context().is_none());
        assert!(f.registers.gesture_token().is_free());
        assert!(!f.registers.is_pan_gesture_moving());
        assert_eq!(f.registers.pan_gesture_moved_y(), 0.0);

        f.engine.finalize(GestureSource::Content);
        assert!(f.engine.context().is_none());
        assert!(f.registers.gesture_token().is_free());
    }

    #[test]
    fn test_foreign_finalize_keeps_holder() {
        let mut f = fixture(|_| {});
        drag(&mut f.engine, GestureSource::Handle, &[40.0]);
        f.engine.finalize(GestureSource::Content);

        assert!(f.engine.context().is_some());
        assert_eq!(f.registers.gesture_source(), GestureSource::Handle);
        assert!(f.registers.is_pan_gesture_moving());
    }

    #[test]
    fn test_disabled_source_never_claims() {
        let mut f = fixture(|c| c.enable_handle_panning_gesture = false);
        assert!(!f.engine.start(GestureSource::Handle));
        assert!(f.registers.gesture_token().is_free());
        assert!(f.engine.start(GestureSource::Content));
    }

    #[test]
    fn test_handle_dispatch() {
        let mut f = fixture(|_| {});
        let source = GestureSource::Handle;
        f.engine
            .handle(event_types::GESTURE_BEGIN, source, PanSample::default());
        f.engine
            .handle(event_types::GESTURE_START, source, PanSample::default());
        f.engine
            .handle(event_types::GESTURE_CHANGE, source, PanSample::translation(-300.0));
        assert_eq!(f.registers.position(), 0.0);
        f.engine
            .handle(event_types::GESTURE_END, source, PanSample::release(-300.0, 0.0));
        f.engine
            .handle(event_types::GESTURE_FINALIZE, source, PanSample::default());
        assert!(f.registers.gesture_token().is_free());
        assert_eq!(
            f.registers.gesture_state(source),
            GestureState::Undetermined
        );
    }
}
