//! Snap points and sheet-state resolution
//!
//! Positions are measured in pixels from the top of the container, so a
//! smaller position means a more expanded sheet. [`SnapPoints`] stores them
//! from most collapsed (index 0) to most expanded (last index).

use smallvec::SmallVec;

use crate::error::{ConfigError, Result};
use crate::state::SheetState;

/// Tolerance for position comparisons.
///
/// Animations settle within a sub-pixel delta of their target, never on it.
pub const POSITION_EPSILON: f32 = 0.01;

/// Epsilon-tolerant position equality
#[inline]
pub fn floating_point_equals(a: f32, b: f32) -> bool {
    (a - b).abs() < POSITION_EPSILON
}

/// Round a position to the nearest device pixel
pub fn round_to_nearest_pixel(position: f32, pixel_density: f32) -> f32 {
    if pixel_density <= 0.0 || !pixel_density.is_finite() {
        return position.round();
    }
    (position * pixel_density).round() / pixel_density
}

// =========================================================================
// Snap Points
// =========================================================================

/// Validated, non-empty set of snap positions
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    /// Most collapsed first (largest position), most expanded last
    positions: SmallVec<[f32; 4]>,
}

impl SnapPoints {
    /// Build from positions in either strictly ascending or strictly
    /// descending order.
    pub fn new(positions: impl IntoIterator<Item = f32>) -> Result<Self> {
        let mut positions: SmallVec<[f32; 4]> = positions.into_iter().collect();

        if positions.is_empty() {
            return Err(ConfigError::EmptySnapPoints);
        }

        if let Some((index, &position)) = positions
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(ConfigError::NegativeSnapPoint { index, position });
        }

        if positions.len() > 1 {
            let ascending = positions.windows(2).all(|w| w[0] < w[1]);
            let descending = positions.windows(2).all(|w| w[0] > w[1]);
            if ascending {
                positions.reverse();
            } else if !descending {
                let broken = positions
                    .windows(2)
                    .find(|w| {
                        let first_ascending = positions[0] < positions[1];
                        if first_ascending {
                            w[0] >= w[1]
                        } else {
                            w[0] <= w[1]
                        }
                    })
                    .unwrap_or(&positions[..2]);
                return Err(ConfigError::UnorderedSnapPoints {
                    previous: broken[0],
                    next: broken[1],
                });
            }
        }

        Ok(Self { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Never true for a validated set
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.positions.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.positions.iter().copied()
    }

    /// Most expanded declared position (smallest value)
    pub fn highest(&self) -> f32 {
        self.positions[self.positions.len() - 1]
    }

    /// Most collapsed declared position (largest value)
    pub fn lowest(&self) -> f32 {
        self.positions[0]
    }

    /// Index of the snap point at `position`, if any
    pub fn index_of(&self, position: f32) -> Option<usize> {
        self.positions
            .iter()
            .position(|p| floating_point_equals(*p, position))
    }

    /// Check every position fits in a container of the given height
    pub fn validate_within(&self, container_height: f32) -> Result<()> {
        if !container_height.is_finite() || container_height <= 0.0 {
            return Err(ConfigError::InvalidContainerHeight(container_height));
        }
        match self.positions.iter().find(|p| **p > container_height) {
            Some(&position) => Err(ConfigError::SnapPointBeyondContainer {
                position,
                container_height,
            }),
            None => Ok(()),
        }
    }
}

// =========================================================================
// Resolver
// =========================================================================

/// Classify a position against the snap layout.
///
/// Positions above the highest snap point (over-drag or a keyboard-raised
/// temporary position) count as extended unless they sit exactly at the
/// top of the container.
pub fn resolve_sheet_state(position: f32, highest_snap_point: f32, closed_position: f32) -> SheetState {
    if position >= closed_position || floating_point_equals(position, closed_position) {
        return SheetState::Closed;
    }
    if floating_point_equals(position, highest_snap_point) {
        return SheetState::Extended;
    }
    if floating_point_equals(position, 0.0) {
        return SheetState::FillParent;
    }
    if position < highest_snap_point {
        return SheetState::Extended;
    }
    SheetState::Collapsed
}

/// Continuous snap index for a position.
///
/// Interpolates linearly between neighbouring snap points. The closed
/// position maps to `-1`; values outside the range are clamped.
pub fn animated_index(position: f32, snap_points: &SnapPoints, closed_position: f32) -> f32 {
    let mut stops: SmallVec<[(f32, f32); 5]> = SmallVec::new();
    if closed_position > snap_points.lowest() {
        stops.push((closed_position, -1.0));
    }
    stops.extend(snap_points.iter().enumerate().map(|(i, p)| (p, i as f32)));

    let (first_position, first_index) = stops[0];
    if position >= first_position {
        return first_index;
    }
    let (last_position, last_index) = stops[stops.len() - 1];
    if position <= last_position {
        return last_index;
    }

    for pair in stops.windows(2) {
        let (lower_position, lower_index) = pair[0];
        let (upper_position, upper_index) = pair[1];
        if position <= lower_position && position >= upper_position {
            let span = lower_position - upper_position;
            if span <= f32::EPSILON {
                return upper_index;
            }
            let t = (lower_position - position) / span;
            return lower_index + (upper_index - lower_index) * t;
        }
    }

    last_index
}
