//! Axis-aligned collision volumes and the walking sweep resolver.
//!
//! World geometry is reduced to a fresh set of axis-aligned boxes every
//! tick, and the player is a fixed-size box around the feet position.
//! The only query is a boolean overlap test; a blocked displacement is
//! retried per-axis, which yields wall sliding without a full physics
//! response.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Horizontal half-extent of the player collision box.
pub const PLAYER_HALF_WIDTH: f32 = 0.6;
/// Distance from the feet position down to the bottom of the box.
pub const PLAYER_FEET_DEPTH: f32 = 1.0;
/// Distance from the feet position up to the top of the box.
pub const PLAYER_HEAD_HEIGHT: f32 = 2.0;

/// An axis-aligned bounding volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl AxisAlignedVolume {
    /// Create a volume from its corners. `min` must not exceed `max` on
    /// any axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Create a volume from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Standard AABB overlap test: true unless the volumes are separated
    /// on at least one axis. Touching faces count as overlap.
    pub fn intersects(&self, other: &AxisAlignedVolume) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }
}

/// The player collision box at the given feet position.
pub fn player_volume(feet: Vec3) -> AxisAlignedVolume {
    AxisAlignedVolume::new(
        feet - Vec3::new(PLAYER_HALF_WIDTH, PLAYER_FEET_DEPTH, PLAYER_HALF_WIDTH),
        feet + Vec3::new(PLAYER_HALF_WIDTH, PLAYER_HEAD_HEIGHT, PLAYER_HALF_WIDTH),
    )
}

/// Whether a player standing at `feet` would intersect any obstacle.
pub fn blocked(feet: Vec3, obstacles: &[AxisAlignedVolume]) -> bool {
    let volume = player_volume(feet);
    obstacles.iter().any(|aabb| volume.intersects(aabb))
}

/// Resolve a horizontal walking step from `current` to `desired`.
///
/// The full displacement is tried first. If it collides, the X and Z
/// components are retried independently, each against the position
/// already committed on the other axis, which slides the player along
/// walls. Vertical motion is never collision-tested here; the jump and
/// ground-clamp path owns the Y axis.
pub fn resolve_walk(current: Vec3, desired: Vec3, obstacles: &[AxisAlignedVolume]) -> Vec3 {
    if !blocked(desired, obstacles) {
        return desired;
    }

    let mut resolved = current;
    if !blocked(Vec3::new(desired.x, resolved.y, resolved.z), obstacles) {
        resolved.x = desired.x;
    }
    if !blocked(Vec3::new(resolved.x, resolved.y, desired.z), obstacles) {
        resolved.z = desired.z;
    }
    resolved
}

// ============================================================================
// Tests
// ============================================================================
