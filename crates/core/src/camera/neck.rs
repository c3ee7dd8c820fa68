//! The scripted neck-wrench camera takeover.
//!
//! A fixed four-phase sequence driven purely by accumulated time, so the
//! feel is identical at any frame rate: the head is wrenched around and
//! down, the body collapses, a long beat of stillness, then the camera
//! snaps back to exactly where it was.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// End of the head-turn phase (seconds).
pub const TURN_PHASE_END: f32 = 0.3;
/// End of the collapse phase.
pub const FALL_PHASE_END: f32 = 0.8;
/// End of the held pause; past this the sequence finishes.
pub const HOLD_PHASE_END: f32 = 2.5;

/// Yaw swept during the turn phase (degrees).
pub const TURN_YAW_SWEEP: f32 = 90.0;
/// Pitch dropped during the turn phase (degrees).
pub const TURN_PITCH_DROP: f32 = 45.0;
/// Collapse depth scale below the captured elevation.
pub const FALL_DEPTH: f32 = 3.0;
/// Time scale of the collapse ramp. Shorter than the phase window itself,
/// so the drop keeps accelerating right up to the pause.
const FALL_RAMP: f32 = 0.3;

/// What the camera must do on a tick while the sequence runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeckAction {
    /// Wrench yaw/pitch to the interpolated values; the warning cue fires
    /// on every tick of this phase.
    Turn { yaw: f32, pitch: f32 },
    /// Drop the camera to this absolute elevation.
    Fall { elevation: f32 },
    /// Dramatic pause; nothing moves.
    Hold,
    /// Sequence over: put everything back exactly as captured.
    Restore { position: Vec3, yaw: f32, pitch: f32 },
}

/// Timed sub-state machine that temporarily seizes the camera.
///
/// While active it is the only writer of camera position and orientation.
/// The `completed` flag stays raised until consumed, which is how the
/// sleep state machine learns the ritual finished.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeckOverride {
    active: bool,
    timer: f32,
    completed: bool,
    start_position: Vec3,
    start_yaw: f32,
    start_pitch: f32,
}

impl NeckOverride {
    /// Capture the restore snapshot and arm the sequence.
    pub fn begin(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.active = true;
        self.timer = 0.0;
        self.completed = false;
        self.start_position = position;
        self.start_yaw = yaw;
        self.start_pitch = pitch;
    }

    /// Advance by `dt` and report the action for this tick.
    ///
    /// Returns `None` while the sequence is idle. The `Restore` action is
    /// produced exactly once, on the tick that crosses the end boundary.
    pub fn advance(&mut self, dt: f32) -> Option<NeckAction> {
        if !self.active {
            return None;
        }
        self.timer += dt;
        let t = self.timer;

        let action = if t <= TURN_PHASE_END {
            let progress = t / TURN_PHASE_END;
            NeckAction::Turn {
                yaw: self.start_yaw + TURN_YAW_SWEEP * progress,
                pitch: self.start_pitch - TURN_PITCH_DROP * progress,
            }
        } else if t <= FALL_PHASE_END {
            let progress = (t - TURN_PHASE_END) / FALL_RAMP;
            NeckAction::Fall {
                elevation: self.start_position.y - FALL_DEPTH * progress * progress,
            }
        } else if t <= HOLD_PHASE_END {
            NeckAction::Hold
        } else {
            self.active = false;
            self.completed = true;
            NeckAction::Restore {
                position: self.start_position,
                yaw: self.start_yaw,
                pitch: self.start_pitch,
            }
        };
        Some(action)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Consume the completion flag. True exactly once per finished run.
    pub fn take_completed(&mut self) -> bool {
        let completed = self.completed;
        self.completed = false;
        completed
    }

    /// Accumulated sequence time.
    pub fn elapsed(&self) -> f32 {
        self.timer
    }
}

// ============================================================================
// Tests
// ============================================================================
