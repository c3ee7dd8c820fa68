//! Hand lamp with a draining battery.
//!
//! The lamp's transform is driven from the camera every tick; the core
//! only owns the battery/switch model and the beam intensity that the
//! sleep flicker modulates.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraController;

/// Battery drain in charge units per second while switched on.
pub const DRAIN_RATE: f32 = 1.5;
/// Charge restored by one battery pickup.
pub const CHARGE_AMOUNT: f32 = 33.0;
/// Full charge.
pub const MAX_BATTERY: f32 = 100.0;

/// The player's flashlight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashlight {
    pub position: Vec3,
    pub direction: Vec3,
    /// Invariant: only true while `battery > 0`.
    pub on: bool,
    /// Charge in [0, 100].
    pub battery: f32,
    /// Beam brightness; guttered by the sleep flicker.
    pub intensity: f32,
}

impl Default for Flashlight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            on: false,
            battery: MAX_BATTERY,
            intensity: 1.0,
        }
    }
}

impl Flashlight {
    /// Drain the battery while switched on; force off at empty.
    pub fn update_battery(&mut self, dt: f32) {
        if self.on && self.battery > 0.0 {
            self.battery -= DRAIN_RATE * dt;
            if self.battery <= 0.0 {
                self.battery = 0.0;
                self.on = false;
            }
        }
    }

    /// Add one pickup's worth of charge, capped at full.
    pub fn charge(&mut self) {
        self.battery = (self.battery + CHARGE_AMOUNT).min(MAX_BATTERY);
    }

    /// Switch on. Silently refused with an empty battery.
    pub fn turn_on(&mut self) {
        if self.battery > 0.0 {
            self.on = true;
        }
    }

    pub fn turn_off(&mut self) {
        self.on = false;
    }

    /// Flip the switch, honoring the empty-battery guard.
    pub fn toggle(&mut self) {
        if self.on {
            self.turn_off();
        } else {
            self.turn_on();
        }
    }

    /// Penalty applied by a botched or emergency ritual.
    pub fn halve_battery(&mut self) {
        self.battery *= 0.5;
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Keep the lamp beside and slightly ahead of the eye, pointed along
    /// the view direction.
    pub fn track_camera(&mut self, camera: &CameraController) {
        let front = camera.front;
        self.position = Vec3::new(
            camera.position.x - front.z * 2.0,
            camera.position.y + 1.0,
            camera.position.z + front.x * 2.0,
        ) + front * 4.0;
        self.direction = front;
    }
}

// ============================================================================
// Tests
// ============================================================================
