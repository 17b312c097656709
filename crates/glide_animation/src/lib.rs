//! Glide Animation
//!
//! Reference executor for the sheet's animation boundary.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Timing Curves**: Fixed-duration transitions with easing functions
//! - **Register-Driven**: Every frame writes position through the sheet
//!   registers, so sheet state is always re-derived
//! - **Interruptible**: A new destination replaces the running transition and
//!   inherits its velocity

pub mod animator;
pub mod easing;
pub mod scheduler;
pub mod spring;

pub use animator::SheetAnimator;
pub use easing::Easing;
pub use scheduler::{AnimationConfig, AnimationScheduler, SettledTransition, SheetKey, TimingConfig};
pub use spring::{Spring, SpringConfig};
