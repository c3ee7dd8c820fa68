//! Camera and movement tuning constants, grouped for easy adjustment.

use serde::{Deserialize, Serialize};

/// Configuration for camera movement and animation.
///
/// Distances are world units, angles degrees, times seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    // ========================================================================
    // Orientation
    // ========================================================================
    /// Initial yaw in degrees; -90 faces -Z.
    pub yaw: f32,

    /// Initial pitch in degrees.
    pub pitch: f32,

    /// Mouse sensitivity multiplier.
    pub mouse_sensitivity: f32,

    /// Vertical field of view in degrees, consumed by the projection.
    pub zoom: f32,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Walking speed (units/second).
    pub move_speed: f32,

    /// Gravity acceleration (units/second², negative is down).
    pub gravity: f32,

    /// Vertical launch velocity of a jump.
    pub jump_velocity: f32,

    /// Camera elevation while standing on the ground.
    pub ground_height: f32,

    // ========================================================================
    // Airborne turning
    // ========================================================================
    /// Turn sensitivity multiplier while airborne.
    pub jump_turn_factor: f32,

    /// Total |yaw| change allowed over the course of one jump (degrees).
    pub max_jump_yaw: f32,

    // ========================================================================
    // Cosmetic animation
    // ========================================================================
    /// Walk bob amplitude.
    pub bob_amount: f32,

    /// Walk bob frequency scale.
    pub bob_speed: f32,

    /// Idle breathing frequency scale.
    pub breath_frequency: f32,

    /// Idle breathing amplitude. Far below the bob amplitude.
    pub breath_amount: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
            mouse_sensitivity: 0.1,
            zoom: 45.0,

            move_speed: 50.5,
            gravity: -30.6,
            jump_velocity: 10.0,
            ground_height: 7.0,

            jump_turn_factor: 0.3,
            max_jump_yaw: 45.0,

            bob_amount: 0.05,
            bob_speed: 5.0,
            breath_frequency: 0.5,
            breath_amount: 0.0001,
        }
    }
}
