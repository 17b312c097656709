//! Drag Demo
//!
//! Drives a sheet with a scripted handle drag and prints every frame of the
//! resulting snap animation.
//!
//! Run with: cargo run -p glide_sheet --example drag_demo

use std::sync::{Arc, Mutex};

use glide_animation::AnimationScheduler;
use glide_core::{GestureSource, PanSample};
use glide_sheet::{Result, SheetConfig, SheetController};

const CONFIG: &str = r#"
snap_points = ["25%", "50%", "90%"]
index = 0
enable_pan_down_to_close = true

[animation]
curve = "spring"
stiffness = 400.0
damping = 40.0
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = SheetConfig::from_toml_str(CONFIG)?;
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let controller = SheetController::with_scheduler(config, 800.0, &scheduler)?;
    let registers = controller.registers();

    // Flick the handle upward from the lowest snap point
    let mut gestures = controller.gesture_engine();
    gestures.begin(GestureSource::Handle);
    gestures.start(GestureSource::Handle);
    for step in 1..=10 {
        let translation = -12.0 * step as f32;
        gestures.change(GestureSource::Handle, PanSample::translation(translation));
        println!("drag   {:>7.1}  {:?}", registers.position(), registers.sheet_state());
    }
    gestures.end(GestureSource::Handle, PanSample::release(-120.0, -1800.0));
    gestures.finalize(GestureSource::Handle);

    for frame in 0..600 {
        let settled = scheduler.lock().unwrap().tick(1.0 / 60.0);
        println!(
            "frame {:>3}  {:>7.1}  index {:>5.2}",
            frame,
            registers.position(),
            controller.animated_index()
        );
        if let Some(transition) = settled.first() {
            let index = controller.on_animation_settled(transition);
            println!("settled at index {index}");
            break;
        }
    }

    Ok(())
}
