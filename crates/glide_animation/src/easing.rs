//! Easing curves for timing-based sheet transitions

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    /// Exponential ease-out, the usual sheet settle curve
    #[default]
    EaseOutExpo,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// CSS-style cubic bezier solved for x by bisection.
///
/// Bisection is slower than Newton's method but never diverges, and a sheet
/// samples the curve at most once per frame.
fn bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    let target = t as f64;
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut p = target;
    for _ in 0..32 {
        let x = component(p, x1 as f64, x2 as f64);
        if (x - target).abs() < 1e-6 {
            break;
        }
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = 0.5 * (lo + hi);
    }

    component(p, y1 as f64, y2 as f64) as f32
}

/// One axis of a bezier with fixed endpoints 0 and 1
#[inline]
fn component(p: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - p;
    3.0 * inv * inv * p * c1 + 3.0 * inv * p * p * c2 + p * p * p
}
