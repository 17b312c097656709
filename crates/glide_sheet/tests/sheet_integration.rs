//! Integration tests for the sheet engine
//!
//! These tests drive a [`SheetController`] the way a host would, feeding
//! gesture, scroll and keyboard samples, and verify that:
//! - Only one pan source drives the sheet at a time
//! - Releases project onto the nearest snap point
//! - Over-drag is bounded by the resistance curve
//! - Finalize is safe to repeat
//! - A locked scrollable is pinned at its initial offset
//! - A release the scrollable consumed does not also snap the sheet
//! - Dragging up from a keyboard position returns to it
//! - A keyboard restore returns to the snap point held before the keyboard

use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use glide_animation::AnimationScheduler;
use glide_core::{
    event_types, AnimationCause, AnimationDriver, GestureSource, KeyboardState, PanSample,
    ScrollSample, ScrollableType, SharedAnimationDriver, SheetRegisters, SheetState, SnapPoints,
};
use glide_sheet::{
    project_destination, resisted_overshoot, ControlRequest, KeyboardBehavior,
    KeyboardBlurBehavior, KeyboardEvent, Platform, ScrollableHost, SheetConfig, SheetController,
    SnapPointSpec,
};

// =========================================================================
// Fixtures
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    Animate {
        destination: f32,
        cause: AnimationCause,
        velocity: f32,
    },
    Stop,
}

#[derive(Default)]
struct RecordingDriver {
    calls: Mutex<Vec<Call>>,
}

impl RecordingDriver {
    fn animations(&self) -> Vec<(f32, AnimationCause, f32)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match *call {
                Call::Animate {
                    destination,
                    cause,
                    velocity,
                } => Some((destination, cause, velocity)),
                Call::Stop => None,
            })
            .collect()
    }
}

impl AnimationDriver for RecordingDriver {
    fn animate_to_position(&self, destination: f32, cause: AnimationCause, velocity: f32) {
        self.calls.lock().unwrap().push(Call::Animate {
            destination,
            cause,
            velocity,
        });
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

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Sheet in an 800px container with positions [600, 300, 0], seated at 300
fn sheet(configure: impl FnOnce(&mut SheetConfig)) -> (SheetController, Arc<RecordingDriver>) {
    init_tracing();
    let mut config = SheetConfig::new([
        SnapPointSpec::Pixels(200.0),
        SnapPointSpec::Pixels(500.0),
        SnapPointSpec::Percent(100.0),
    ]);
    config.index = 1;
    configure(&mut config);

    let driver = Arc::new(RecordingDriver::default());
    let recorder = Arc::clone(&driver);
    let controller =
        SheetController::new(config, 800.0, move |_| recorder as SharedAnimationDriver).unwrap();
    (controller, driver)
}

// =========================================================================
// Gesture arbitration
// =========================================================================

#[test]
fn test_second_source_is_rejected_while_first_holds() {
    let (controller, driver) = sheet(|_| {});
    let registers = controller.registers();
    let mut gestures = controller.gesture_engine();

    gestures.handle(event_types::GESTURE_BEGIN, GestureSource::Handle, PanSample::default());
    assert!(gestures.start(GestureSource::Handle));
    assert!(!gestures.start(GestureSource::Content));

    gestures.change(GestureSource::Handle, PanSample::translation(-40.0));
    assert_eq!(registers.position(), 260.0);

    gestures.change(GestureSource::Content, PanSample::translation(-200.0));
    gestures.end(GestureSource::Content, PanSample::release(-200.0, -3000.0));
    gestures.finalize(GestureSource::Content);
    assert_eq!(registers.position(), 260.0);
    assert_eq!(registers.gesture_source(), GestureSource::Handle);
    assert!(driver.animations().is_empty());

    gestures.end(GestureSource::Handle, PanSample::release(-40.0, 0.0));
    gestures.finalize(GestureSource::Handle);
    assert!(registers.gesture_token().is_free());
    assert_eq!(driver.animations(), vec![(300.0, AnimationCause::Gesture, 0.0)]);
}

#[test]
fn test_concurrent_claims_have_one_winner() {
    init_tracing();
    let points = SnapPoints::new(vec![600.0, 300.0, 0.0]).unwrap();
    let registers = Arc::new(SheetRegisters::new(points, 800.0).unwrap());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registers = Arc::clone(&registers);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let source = if i % 2 == 0 {
                    GestureSource::Handle
                } else {
                    GestureSource::Content
                };
                barrier.wait();
                registers.gesture_token().claim(source)
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(winners, 1);
    assert_ne!(registers.gesture_source(), GestureSource::None);
}

#[test]
fn test_finalize_is_idempotent() {
    let (controller, _) = sheet(|_| {});
    let registers = controller.registers();
    let mut gestures = controller.gesture_engine();

    gestures.begin(GestureSource::Handle);
    gestures.start(GestureSource::Handle);
    gestures.change(GestureSource::Handle, PanSample::translation(25.0));
    gestures.end(GestureSource::Handle, PanSample::release(25.0, 0.0));

    gestures.finalize(GestureSource::Handle);
    let position = registers.position();
    gestures.finalize(GestureSource::Handle);
    gestures.handle(
        event_types::GESTURE_FINALIZE,
        GestureSource::Handle,
        PanSample::default(),
    );

    assert!(registers.gesture_token().is_free());
    assert!(gestures.context().is_none());
    assert!(!registers.is_pan_gesture_moving());
    assert_eq!(registers.pan_gesture_moved_y(), 0.0);
    assert_eq!(registers.position(), position);

    // The token can be claimed again by either source
    assert!(gestures.start(GestureSource::Content));
}

// =========================================================================
// Release and over-drag
// =========================================================================

#[test]
fn test_release_projects_onto_snap_points() {
    assert_eq!(project_destination(280.0, 2000.0, &[600.0, 300.0, 0.0]), 600.0);
    assert_eq!(project_destination(280.0, 0.0, &[600.0, 300.0, 0.0]), 300.0);

    let (controller, driver) = sheet(|_| {});
    let mut gestures = controller.gesture_engine();

    gestures.start(GestureSource::Handle);
    gestures.change(GestureSource::Handle, PanSample::translation(-20.0));
    gestures.end(GestureSource::Handle, PanSample::release(-20.0, 2000.0));
    gestures.finalize(GestureSource::Handle);

    assert_eq!(
        driver.animations(),
        vec![(600.0, AnimationCause::Gesture, 1000.0)]
    );
}

#[test]
fn test_over_drag_is_bounded() {
    let factor = 0.5;
    let (controller, _) = sheet(|config| {
        config.index = 2;
        config.over_drag_resistance_factor = factor;
    });
    let registers = controller.registers();
    let mut gestures = controller.gesture_engine();
    gestures.start(GestureSource::Handle);

    for translation in [-10.0_f32, -100.0, -1000.0] {
        gestures.change(GestureSource::Handle, PanSample::translation(translation));
        let position = registers.position();
        let bound = resisted_overshoot(translation.abs(), factor);
        assert!(position < 0.0);
        assert!(position >= -bound - 1e-3, "{position} past {bound}");
    }

    // Far smaller than the finger travel
    assert!(registers.position() > -20.0);
}

// =========================================================================
// Scroll lock
// =========================================================================

#[test]
fn test_scroll_buffer_lock_round_trip() {
    let (controller, _) = sheet(|config| {
        config.scroll_buffer = Some(20.0);
        config.platform = Platform::Ios;
    });
    let host = Arc::new(RecordingHost::default());
    controller.attach_scrollable(host.clone(), ScrollableType::ScrollView, false);
    assert_eq!(controller.registers().sheet_state(), SheetState::Collapsed);

    let mut scroll_lock = controller.scroll_lock();
    scroll_lock.handle(event_types::SCROLL_BEGIN_DRAG, ScrollSample::new(50.0));
    assert!(!scroll_lock.is_locked());

    scroll_lock.handle(event_types::SCROLL, ScrollSample::new(60.0));
    assert!(scroll_lock.is_locked());

    scroll_lock.handle(event_types::SCROLL_END_DRAG, ScrollSample::new(75.0));
    assert_eq!(*host.offsets.lock().unwrap(), vec![50.0, 50.0]);
    assert_eq!(scroll_lock.content_offset_y(), 50.0);

    scroll_lock.handle(event_types::SCROLL_MOMENTUM_END, ScrollSample::new(50.0));
    assert!(scroll_lock.context().is_none());
}

#[test]
fn test_scrolled_content_release_does_not_snap() {
    let (controller, driver) = sheet(|config| config.index = 2);
    let registers = controller.registers();
    controller.attach_scrollable(
        Arc::new(RecordingHost::default()),
        ScrollableType::FlatList,
        false,
    );

    let mut scroll_lock = controller.scroll_lock();
    scroll_lock.on_begin_drag(40.0);
    assert!(!scroll_lock.is_locked());

    let mut gestures = controller.gesture_engine();
    gestures.begin(GestureSource::Content);
    gestures.start(GestureSource::Content);
    gestures.change(GestureSource::Content, PanSample::translation(200.0));
    assert_eq!(registers.position(), 0.0);
    assert_eq!(registers.pan_gesture_moved_y(), 200.0);

    gestures.end(GestureSource::Content, PanSample::release(200.0, 1500.0));
    gestures.finalize(GestureSource::Content);

    assert!(driver.animations().is_empty());
    assert_eq!(registers.sheet_state(), SheetState::Extended);
}

// =========================================================================
// Keyboard
// =========================================================================

#[test]
fn test_drag_up_returns_to_keyboard_position() {
    let (mut controller, driver) = sheet(|_| {});
    let mut requests = controller.take_control_requests().unwrap();
    let registers = Arc::clone(controller.registers());

    controller.handle_keyboard(KeyboardEvent::shown(200.0));
    assert_eq!(
        driver.animations(),
        vec![(100.0, AnimationCause::Keyboard, 0.0)]
    );
    // The recording driver does not move the sheet; land it by hand.
    registers.set_position(100.0);
    assert!(registers.is_in_temporary_position());

    let mut gestures = controller.gesture_engine();
    gestures.start(GestureSource::Handle);
    gestures.change(GestureSource::Handle, PanSample::translation(-30.0));
    assert!(registers.position() < 100.0);

    gestures.end(GestureSource::Handle, PanSample::release(-30.0, -400.0));
    gestures.finalize(GestureSource::Handle);

    assert_eq!(
        driver.animations().last(),
        Some(&(100.0, AnimationCause::Gesture, -200.0))
    );
    assert!(registers.is_in_temporary_position());
    assert!(requests.try_recv().is_err());
}

#[test]
fn test_drag_down_dismisses_keyboard() {
    let (mut controller, driver) = sheet(|config| {
        config.keyboard_blur_behavior = KeyboardBlurBehavior::Restore;
    });
    let mut requests = controller.take_control_requests().unwrap();
    let registers = Arc::clone(controller.registers());

    controller.handle_keyboard(KeyboardEvent::shown(200.0));
    registers.set_position(100.0);

    let mut gestures = controller.gesture_engine();
    gestures.start(GestureSource::Handle);
    gestures.change(GestureSource::Handle, PanSample::translation(250.0));
    gestures.end(GestureSource::Handle, PanSample::release(250.0, 0.0));
    gestures.finalize(GestureSource::Handle);

    assert_eq!(requests.try_recv(), Ok(ControlRequest::DismissKeyboard));
    assert!(!registers.is_in_temporary_position());
    assert_eq!(
        driver.animations().last(),
        Some(&(300.0, AnimationCause::Gesture, 0.0))
    );

    // Temporary position already cleared by the drag, nothing to restore
    controller.handle_keyboard(KeyboardEvent::hidden());
    assert_eq!(registers.keyboard_state(), KeyboardState::Hidden);
    assert_eq!(driver.animations().len(), 2);
}

// =========================================================================
// Full flow
// =========================================================================

#[test]
fn test_drag_release_and_settle_with_scheduler() {
    init_tracing();
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut config = SheetConfig::new([
        SnapPointSpec::Pixels(200.0),
        SnapPointSpec::Pixels(500.0),
        SnapPointSpec::Percent(100.0),
    ]);
    config.index = 1;
    let controller = SheetController::with_scheduler(config, 800.0, &scheduler).unwrap();
    let registers = controller.registers();

    let mut gestures = controller.gesture_engine();
    gestures.begin(GestureSource::Handle);
    gestures.start(GestureSource::Handle);
    gestures.change(GestureSource::Handle, PanSample::translation(-150.0));
    gestures.end(GestureSource::Handle, PanSample::release(-150.0, -1200.0));
    gestures.finalize(GestureSource::Handle);

    let mut settled_index = None;
    for _ in 0..600 {
        let settled = scheduler.lock().unwrap().tick(1.0 / 60.0);
        if let Some(transition) = settled.first() {
            settled_index = Some(controller.on_animation_settled(transition));
            break;
        }
    }

    assert_eq!(settled_index, Some(2));
    assert_eq!(registers.position(), 0.0);
    assert_eq!(registers.sheet_state(), SheetState::Extended);
    assert_eq!(controller.animated_index(), 2.0);
}

#[test]
fn test_keyboard_raise_onto_snap_point_restores_original_index() {
    init_tracing();
    // Interactive lands on the middle snap point, extend on the highest
    for (behavior, raised) in [
        (KeyboardBehavior::Interactive, 300.0),
        (KeyboardBehavior::Extend, 0.0),
    ] {
        let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
        let mut config = SheetConfig::new([
            SnapPointSpec::Pixels(200.0),
            SnapPointSpec::Pixels(500.0),
            SnapPointSpec::Percent(100.0),
        ]);
        config.keyboard_behavior = behavior;
        config.keyboard_blur_behavior = KeyboardBlurBehavior::Restore;
        let controller = SheetController::with_scheduler(config, 800.0, &scheduler).unwrap();
        let registers = controller.registers();

        let run_to_settle = || {
            for _ in 0..600 {
                let settled = scheduler.lock().unwrap().tick(1.0 / 60.0);
                if let Some(transition) = settled.first() {
                    return Some(controller.on_animation_settled(transition));
                }
            }
            None
        };

        controller.handle_keyboard(KeyboardEvent::shown(300.0));
        assert_eq!(run_to_settle(), Some(0));
        assert_eq!(registers.position(), raised);
        assert_eq!(registers.current_index(), 0);
        assert!(registers.is_in_temporary_position());

        controller.handle_keyboard(KeyboardEvent::hidden());
        assert_eq!(run_to_settle(), Some(0));
        assert_eq!(registers.position(), 600.0);
        assert!(!registers.is_in_temporary_position());
    }
}
