//! Animation scheduler
//!
//! Owns at most one running transition per registered sheet and advances all
//! of them each frame, writing the animated position into the sheet's
//! registers.

use std::sync::Arc;

use glide_core::{event_types, AnimationCause, SheetRegisters};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};

new_key_type! {
    /// Handle for a sheet registered with the scheduler
    pub struct SheetKey;
}

/// Fixed-duration transition curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250,
            easing: Easing::EaseOutExpo,
        }
    }
}

/// Curve used for a sheet's transitions
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationConfig {
    Spring(SpringConfig),
    Timing(TimingConfig),
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig::Spring(SpringConfig::sheet())
    }
}

/// A transition that reached its destination during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettledTransition {
    pub sheet: SheetKey,
    pub destination: f32,
    pub cause: AnimationCause,
}

enum Curve {
    Spring(Spring),
    Timing {
        from: f32,
        elapsed_ms: f32,
        config: TimingConfig,
    },
}

struct Transition {
    destination: f32,
    cause: AnimationCause,
    curve: Curve,
}

impl Transition {
    /// Advance and return the new value plus whether the curve finished
    fn advance(&mut self, dt: f32) -> (f32, bool) {
        match &mut self.curve {
            Curve::Spring(spring) => {
                spring.step(dt);
                (spring.value(), spring.is_settled())
            }
            Curve::Timing {
                from,
                elapsed_ms,
                config,
            } => {
                *elapsed_ms += dt * 1000.0;
                if config.duration_ms == 0 || *elapsed_ms >= config.duration_ms as f32 {
                    return (self.destination, true);
                }
                let progress = config.easing.apply(*elapsed_ms / config.duration_ms as f32);
                (*from + (self.destination - *from) * progress, false)
            }
        }
    }

    fn velocity(&self) -> f32 {
        match &self.curve {
            Curve::Spring(spring) => spring.velocity(),
            Curve::Timing { .. } => 0.0,
        }
    }
}

struct SheetSlot {
    registers: Arc<SheetRegisters>,
    config: AnimationConfig,
    transition: Option<Transition>,
}

/// The animation scheduler that ticks all sheet transitions
pub struct AnimationScheduler {
    sheets: SlotMap<SheetKey, SheetSlot>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            sheets: SlotMap::with_key(),
        }
    }

    /// Register a sheet whose position this scheduler will drive
    pub fn add_sheet(&mut self, registers: Arc<SheetRegisters>, config: AnimationConfig) -> SheetKey {
        self.sheets.insert(SheetSlot {
            registers,
            config,
            transition: None,
        })
    }

    pub fn remove_sheet(&mut self, key: SheetKey) -> bool {
        self.sheets.remove(key).is_some()
    }

    pub fn set_config(&mut self, key: SheetKey, config: AnimationConfig) {
        if let Some(slot) = self.sheets.get_mut(key) {
            slot.config = config;
        }
    }

    /// Start a transition, replacing any that is running for this sheet.
    ///
    /// A replaced spring hands its velocity to the new one when the caller
    /// supplies none.
    pub fn start(
        &mut self,
        key: SheetKey,
        destination: f32,
        cause: AnimationCause,
        initial_velocity: f32,
    ) -> bool {
        let Some(slot) = self.sheets.get_mut(key) else {
            tracing::warn!(?key, "animation requested for unknown sheet");
            return false;
        };

        let from = slot.registers.position();
        let inherited = slot
            .transition
            .take()
            .map(|t| t.velocity())
            .unwrap_or(0.0);
        let velocity = if initial_velocity != 0.0 {
            initial_velocity
        } else {
            inherited
        };

        let curve = match slot.config {
            AnimationConfig::Spring(config) => {
                let mut spring = Spring::new(config, from).with_velocity(velocity);
                spring.set_target(destination);
                Curve::Spring(spring)
            }
            AnimationConfig::Timing(config) => Curve::Timing {
                from,
                elapsed_ms: 0.0,
                config,
            },
        };

        slot.transition = Some(Transition {
            destination,
            cause,
            curve,
        });
        slot.registers
            .transition_animation(event_types::ANIMATION_START);
        tracing::debug!(from, destination, ?cause, velocity, "sheet animation started");
        true
    }

    /// Cancel the running transition, leaving position where it is
    pub fn stop(&mut self, key: SheetKey) {
        let Some(slot) = self.sheets.get_mut(key) else {
            return;
        };
        if let Some(transition) = slot.transition.take() {
            tracing::debug!(
                position = slot.registers.position(),
                destination = transition.destination,
                "sheet animation stopped"
            );
        }
        slot.registers
            .transition_animation(event_types::ANIMATION_STOP);
    }

    pub fn is_running(&self, key: SheetKey) -> bool {
        self.sheets
            .get(key)
            .is_some_and(|slot| slot.transition.is_some())
    }

    /// Destination of the running transition for a sheet
    pub fn destination(&self, key: SheetKey) -> Option<f32> {
        self.sheets
            .get(key)
            .and_then(|slot| slot.transition.as_ref())
            .map(|t| t.destination)
    }

    /// Advance every transition by `dt` seconds.
    ///
    /// Returns the transitions that settled during this tick.
    pub fn tick(&mut self, dt: f32) -> SmallVec<[SettledTransition; 2]> {
        let mut settled = SmallVec::new();

        for (key, slot) in self.sheets.iter_mut() {
            let Some(transition) = slot.transition.as_mut() else {
                continue;
            };

            let (value, done) = transition.advance(dt);
            if done {
                let destination = transition.destination;
                let cause = transition.cause;
                slot.transition = None;
                slot.registers.settle_at(destination, cause);
                settled.push(SettledTransition {
                    sheet: key,
                    destination,
                    cause,
                });
            } else {
                let state = slot.registers.set_position(value);
                tracing::trace!(value, ?state, "sheet animation frame");
            }
        }

        settled
    }

    /// Check if any sheet is still animating
    pub fn has_active_animations(&self) -> bool {
        self.sheets.values().any(|slot| slot.transition.is_some())
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
