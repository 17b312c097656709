//! Destination projection for released gestures

use glide_core::POSITION_EPSILON;

/// Seconds of travel a released sheet keeps before decelerating to rest.
///
/// A 2000 px/s flick travels 400 px past its release point.
pub const PROJECTION_DECELERATION: f32 = 0.2;

/// Where a gesture released at `position` with `velocity` comes to rest
#[inline]
pub fn project(position: f32, velocity: f32) -> f32 {
    position + PROJECTION_DECELERATION * velocity
}

/// Pick the candidate nearest to the projected stopping point.
///
/// Ties go to the candidate nearer the literal release position. Returns the
/// release position itself when there are no candidates.
pub fn project_destination(position: f32, velocity: f32, candidates: &[f32]) -> f32 {
    let projected = project(position, velocity);

    let mut best: Option<(f32, f32)> = None;
    for &candidate in candidates {
        let distance = (candidate - projected).abs();
        best = match best {
            None => Some((candidate, distance)),
            Some((current, current_distance)) => {
                if distance < current_distance - POSITION_EPSILON {
                    Some((candidate, distance))
                } else if (distance - current_distance).abs() <= POSITION_EPSILON
                    && (candidate - position).abs() < (current - position).abs()
                {
                    Some((candidate, distance))
                } else {
                    Some((current, current_distance))
                }
            }
        };
    }

    best.map(|(candidate, _)| candidate).unwrap_or(position)
}
