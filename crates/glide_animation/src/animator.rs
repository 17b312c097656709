//! Animation driver for one sheet
//!
//! Bridges the gesture engine and control context to a shared
//! [`AnimationScheduler`]. The driver holds a weak reference so a dropped
//! scheduler turns requests into logged no-ops.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use glide_core::{AnimationCause, AnimationDriver, SheetRegisters};

use crate::scheduler::{AnimationConfig, AnimationScheduler, SheetKey};

/// [`AnimationDriver`] backed by a shared scheduler
pub struct SheetAnimator {
    scheduler: Weak<Mutex<AnimationScheduler>>,
    key: SheetKey,
}

impl SheetAnimator {
    /// Register `registers` with the scheduler and return its driver
    pub fn new(
        scheduler: &Arc<Mutex<AnimationScheduler>>,
        registers: Arc<SheetRegisters>,
        config: AnimationConfig,
    ) -> Self {
        let key = scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_sheet(registers, config);
        Self {
            scheduler: Arc::downgrade(scheduler),
            key,
        }
    }

    pub fn key(&self) -> SheetKey {
        self.key
    }

    /// Whether a transition is running for this sheet
    pub fn is_running(&self) -> bool {
        self.with_scheduler(|scheduler| scheduler.is_running(self.key))
            .unwrap_or(false)
    }

    /// Swap the curve used by later transitions
    pub fn set_config(&self, config: AnimationConfig) {
        self.with_scheduler(|scheduler| scheduler.set_config(self.key, config));
    }

    fn with_scheduler<R>(&self, f: impl FnOnce(&mut AnimationScheduler) -> R) -> Option<R> {
        let Some(scheduler) = self.scheduler.upgrade() else {
            tracing::warn!(key = ?self.key, "animation scheduler dropped");
            return None;
        };
        let mut guard = scheduler.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut guard))
    }
}

impl AnimationDriver for SheetAnimator {
    fn animate_to_position(&self, destination: f32, cause: AnimationCause, initial_velocity: f32) {
        self.with_scheduler(|scheduler| {
            scheduler.start(self.key, destination, cause, initial_velocity);
        });
    }

    fn stop_animation(&self) {
        self.with_scheduler(|scheduler| scheduler.stop(self.key));
    }
}

impl Drop for SheetAnimator {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove_sheet(self.key);
        }
    }
}
