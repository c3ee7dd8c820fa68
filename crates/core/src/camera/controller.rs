//! First-person camera controller.
//!
//! Owns the camera's position, orientation and movement state, and is the
//! sole writer of camera state during normal play. While the neck-wrench
//! sequence is active, authority passes to the embedded [`NeckOverride`]
//! machine: movement, orientation and idle updates all become guarded
//! no-ops until the sequence restores its snapshot.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::collision::{self, AxisAlignedVolume};
use crate::sound::{SoundCue, SoundSink};

use super::config::CameraConfig;
use super::neck::{NeckAction, NeckOverride};

/// Pitch saturation bound in degrees.
const PITCH_LIMIT: f32 = 89.0;
/// Blend rate multiplier for settling back to the bob base elevation.
const SETTLE_RATE: f32 = 5.0;
/// Volume of the warning cue spammed during the neck turn phase.
const WARNING_VOLUME: f32 = 1500.0;
/// Volume of the landing thud.
const LAND_VOLUME: f32 = 80.0;

/// One directional movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Held movement-intent flags; each direction is independent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct MoveIntent {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl MoveIntent {
    fn any(self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The first-person camera and its movement state machine.
///
/// Position is the eye point; collision treats it as the feet reference of
/// a fixed-size box. Yaw/pitch are degrees; the orthonormal basis
/// (front/right/up) is re-derived on every orientation change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraController {
    pub config: CameraConfig,

    pub position: Vec3,
    /// Yaw in degrees; -90 faces -Z.
    pub yaw: f32,
    /// Pitch in degrees, saturated to ±89 under constrained input.
    pub pitch: f32,
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    world_up: Vec3,

    intent: MoveIntent,
    moving: bool,
    /// Cleared while the neck sequence holds movement authority.
    can_change_direction: bool,

    jumping: bool,
    velocity_y: f32,
    /// Total |yaw| change spent so far during the current jump.
    jump_yaw_spent: f32,

    bob_timer: f32,
    bob_base_y: f32,
    idle_timer: f32,

    neck: NeckOverride,
}

impl CameraController {
    /// Create a camera at the spawn point, facing the configured yaw/pitch.
    pub fn new(config: CameraConfig, spawn: Vec3) -> Self {
        let mut camera = Self {
            position: spawn,
            yaw: config.yaw,
            pitch: config.pitch,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            intent: MoveIntent::default(),
            moving: false,
            can_change_direction: true,
            jumping: false,
            velocity_y: 0.0,
            jump_yaw_spent: 0.0,
            bob_timer: 0.0,
            bob_base_y: spawn.y,
            idle_timer: 0.0,
            neck: NeckOverride::default(),
            config,
        };
        camera.update_basis();
        camera
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Set or clear one directional intent flag.
    ///
    /// Ignored while airborne (intent is frozen for the jump) and while
    /// the neck sequence holds movement authority.
    pub fn set_move(&mut self, direction: MoveDirection, pressed: bool) {
        if self.jumping || !self.can_change_direction {
            return;
        }
        match direction {
            MoveDirection::Forward => self.intent.forward = pressed,
            MoveDirection::Backward => self.intent.backward = pressed,
            MoveDirection::Left => self.intent.left = pressed,
            MoveDirection::Right => self.intent.right = pressed,
        }
    }

    /// Begin a jump. Ignored while already airborne or during the neck
    /// sequence.
    pub fn start_jump(&mut self) {
        if self.jumping || self.neck.is_active() {
            return;
        }
        self.jumping = true;
        self.velocity_y = self.config.jump_velocity;
        self.jump_yaw_spent = 0.0;
    }

    /// Apply pointer deltas to yaw/pitch and re-derive the basis.
    ///
    /// No-op while the neck sequence is active. Airborne turning runs at
    /// reduced sensitivity and the total yaw change per jump is rationed:
    /// once the budget is spent, yaw locks until landing while pitch
    /// still responds.
    pub fn process_orientation(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        if self.neck.is_active() {
            return;
        }

        let (yaw_delta, pitch_delta) = if self.jumping {
            let scale = self.config.mouse_sensitivity * self.config.jump_turn_factor;
            let mut yaw_delta = dx * scale;
            let pitch_delta = dy * scale;

            let spent = self.jump_yaw_spent + yaw_delta.abs();
            if spent > self.config.max_jump_yaw {
                yaw_delta = 0.0;
            } else {
                self.jump_yaw_spent = spent;
            }
            (yaw_delta, pitch_delta)
        } else {
            (
                dx * self.config.mouse_sensitivity,
                dy * self.config.mouse_sensitivity,
            )
        };

        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_basis();
    }

    // ========================================================================
    // Per-tick updates
    // ========================================================================

    /// Move horizontally from the held intent flags, resolving collision,
    /// then apply walk bob or settle back toward the base elevation.
    pub fn update_position(&mut self, dt: f32, obstacles: &[AxisAlignedVolume]) {
        if self.neck.is_active() {
            return;
        }

        // The bob oscillates around the elevation held when motion began.
        let was_moving = self.moving;
        self.moving = self.intent.any();
        if self.moving && !was_moving {
            self.bob_base_y = self.position.y;
        }

        let step = self.config.move_speed * dt;
        let flat_front = Vec3::new(self.front.x, 0.0, self.front.z).normalize_or_zero();

        let mut direction = Vec3::ZERO;
        if self.intent.forward {
            direction += flat_front;
        }
        if self.intent.backward {
            direction -= flat_front;
        }
        if self.intent.left {
            direction -= self.right;
        }
        if self.intent.right {
            direction += self.right;
        }

        // Horizontal motion is frozen mid-jump; the launch position carries.
        if direction.length_squared() > 0.0 && !self.jumping {
            let candidate = self.position + direction.normalize() * step;
            self.position = collision::resolve_walk(self.position, candidate, obstacles);
        }

        if self.jumping {
            // Jump physics owns the vertical axis.
            self.bob_timer = 0.0;
        } else if self.moving {
            self.bob_timer += dt * self.config.bob_speed;
            self.position.y = self.bob_base_y + self.bob_timer.sin() * self.config.bob_amount;
        } else {
            self.position.y += (self.bob_base_y - self.position.y) * dt * SETTLE_RATE;
            self.bob_timer = 0.0;
        }
    }

    /// Advance the neck sequence if active, otherwise integrate jump
    /// physics. The two branches are mutually exclusive by construction.
    pub fn update_physics(&mut self, dt: f32, sound: &mut dyn SoundSink) {
        if let Some(action) = self.neck.advance(dt) {
            match action {
                NeckAction::Turn { yaw, pitch } => {
                    sound.play(SoundCue::NeckWarning, WARNING_VOLUME, false);
                    self.yaw = yaw;
                    self.pitch = pitch;
                }
                NeckAction::Fall { elevation } => self.position.y = elevation,
                NeckAction::Hold => {}
                NeckAction::Restore {
                    position,
                    yaw,
                    pitch,
                } => {
                    self.position = position;
                    self.yaw = yaw;
                    self.pitch = pitch;
                    self.can_change_direction = true;
                    log::debug!("neck sequence finished, camera restored");
                }
            }
            self.update_basis();
            return;
        }

        if self.jumping {
            self.position.y += self.velocity_y * dt;
            self.velocity_y += self.config.gravity * dt;
            if self.position.y <= self.config.ground_height {
                self.position.y = self.config.ground_height;
                self.jumping = false;
                sound.play(SoundCue::Land, LAND_VOLUME, false);
            }
        }
    }

    /// Subtle breathing sway while standing still on the ground.
    pub fn update_idle(&mut self, dt: f32) {
        if self.neck.is_active() {
            return;
        }
        if !self.moving && !self.jumping {
            self.idle_timer += dt;
            let breath =
                (self.idle_timer * self.config.breath_frequency).sin() * self.config.breath_amount;
            self.position.y = self.bob_base_y + breath;
        }
    }

    // ========================================================================
    // Neck sequence handoff
    // ========================================================================

    /// Hand the camera to the scripted neck-wrench sequence.
    ///
    /// Captures the restore snapshot, wipes movement intent, and revokes
    /// directional input authority until the sequence restores.
    pub fn start_neck_override(&mut self) {
        if self.neck.is_active() {
            return;
        }
        self.neck.begin(self.position, self.yaw, self.pitch);
        self.intent.clear();
        self.moving = false;
        self.can_change_direction = false;
        log::debug!("neck sequence started at {:?}", self.position);
    }

    /// Whether the neck sequence currently owns the camera.
    pub fn override_active(&self) -> bool {
        self.neck.is_active()
    }

    /// Consume the neck sequence's completion flag. Returns true exactly
    /// once per finished sequence.
    pub fn take_override_completed(&mut self) -> bool {
        self.neck.take_completed()
    }

    // ========================================================================
    // Queries and teleport
    // ========================================================================

    /// Whether the facing direction is within `max_angle` degrees of the
    /// direction toward `target`.
    pub fn is_looking_at(&self, target: Vec3, max_angle: f32) -> bool {
        let to_target = (target - self.position).normalize_or_zero();
        let angle = self.front.dot(to_target).clamp(-1.0, 1.0).acos().to_degrees();
        angle <= max_angle
    }

    /// Whether any directional intent is held and the player is grounded.
    pub fn is_moving(&self) -> bool {
        self.intent.any() && !self.jumping
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Hard teleport. The bob base follows the new elevation so the next
    /// settle blend does not drag the camera back toward the old spot.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.bob_base_y = position.y;
    }

    /// View matrix with the walking roll-tilt applied to the up vector.
    pub fn view_matrix(&self) -> Mat4 {
        let tilt_angle = if self.moving {
            (self.bob_timer * 2.0).cos() * 0.5
        } else {
            0.0
        };
        let tilt = Quat::from_axis_angle(self.front, tilt_angle.to_radians());
        let tilted_up = tilt * self.up;
        Mat4::look_at_rh(self.position, self.position + self.front, tilted_up)
    }

    fn update_basis(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

// ============================================================================
// Tests
// ============================================================================
