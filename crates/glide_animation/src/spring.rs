//! Damped spring used for sheet transitions
//!
//! Solves `m·x'' = -k·(x - target) - c·x'` with fourth-order Runge-Kutta.
//! Large frame deltas are split into sub-steps so stiff springs stay stable.

/// Largest integration step in seconds
const MAX_STEP: f32 = 0.004;

/// Spring physics configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Stop at the target instead of bouncing past it
    pub overshoot_clamping: bool,
    /// Distance from target below which the spring may rest
    pub rest_displacement: f32,
    /// Speed below which the spring may rest
    pub rest_velocity: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness: stiffness.max(0.1),
            damping: damping.max(0.0),
            mass: mass.max(0.01),
            overshoot_clamping: false,
            rest_displacement: 0.5,
            rest_velocity: 5.0,
        }
    }

    /// Slightly overdamped, clamped at the target. Default for sheets.
    pub fn sheet() -> Self {
        Self {
            overshoot_clamping: true,
            ..Self::new(500.0, 50.0, 1.0)
        }
    }

    /// Fast and critically damped
    pub fn stiff() -> Self {
        Self::new(600.0, 49.0, 1.0)
    }

    /// Quick with a small bounce
    pub fn snappy() -> Self {
        Self::new(400.0, 28.0, 1.0)
    }

    /// Soft with a visible bounce
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::sheet()
    }
}

/// A spring moving one value toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    /// Spring at rest on `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            settled: true,
        }
    }

    /// Start with an initial velocity (pixels per second)
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        if velocity != 0.0 {
            self.settled = false;
        }
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Retarget, keeping current value and velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        if self.at_rest() {
            self.finish();
        } else {
            self.settled = false;
        }
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.settled || dt <= 0.0 {
            return;
        }

        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let start_side = (self.value - self.target).signum();

        for _ in 0..steps {
            self.rk4(h);

            if self.config.overshoot_clamping {
                let side = (self.value - self.target).signum();
                if start_side != 0.0 && side != start_side {
                    self.finish();
                    return;
                }
            }

            if self.at_rest() {
                self.finish();
                return;
            }
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let c = &self.config;
        (-c.stiffness * (x - self.target) - c.damping * v) / c.mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);
        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);
        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);
        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }

    fn at_rest(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_displacement
            && self.velocity.abs() < self.config.rest_velocity
    }

    fn finish(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.settled = true;
    }
}
