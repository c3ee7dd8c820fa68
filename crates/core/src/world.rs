//! Static world points of interest: beacons to light and batteries to
//! scavenge.
//!
//! The maze geometry itself belongs to the rendering layer, which hands
//! the simulation a fresh obstacle set every tick. What lives here is the
//! interactable layer and the spawn point.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::behavior::PlayerBehavior;
use crate::camera::CameraController;
use crate::flashlight::Flashlight;
use crate::sound::{SoundCue, SoundSink};

/// Where a fresh or restarted session places the player.
pub const SPAWN_POSITION: Vec3 = Vec3::new(-546.0, 7.0, 628.0);

/// Maximum distance at which the interact key reaches a point of interest.
pub const INTERACT_DISTANCE: f32 = 9.0;
/// The player must face a point of interest within this cone (degrees).
pub const INTERACT_ANGLE: f32 = 15.0;

const BEACON_LIT_VOLUME: f32 = 80.0;
const BEACON_FIRE_VOLUME: f32 = 20.0;
const BATTERY_VOLUME: f32 = 80.0;

/// A fire the player can light.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beacon {
    pub position: Vec3,
    pub lit: bool,
}

/// A battery waiting on the ground.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryPickup {
    pub position: Vec3,
    pub active: bool,
}

/// The interactable layer of the maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub beacons: Vec<Beacon>,
    pub batteries: Vec<BatteryPickup>,
    /// Positions of lit beacons in activation order; the last entry is
    /// the current teleport anchor.
    pub lit_positions: Vec<Vec3>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(
            vec![
                Vec3::new(-496.0, 3.0, -535.0),
                Vec3::new(-490.0, 3.0, -73.0),
                Vec3::new(-488.0, 3.0, 383.0),
                Vec3::new(458.0, 3.0, 370.0),
                Vec3::new(505.0, 3.0, -347.0),
            ],
            vec![
                Vec3::new(-486.0, 3.0, -535.0),
                Vec3::new(-480.0, 3.0, -73.0),
                Vec3::new(-478.0, 3.0, 383.0),
                Vec3::new(468.0, 3.0, 370.0),
                Vec3::new(510.0, 3.0, -347.0),
            ],
        )
    }
}

impl World {
    /// Build a world from beacon and battery positions.
    pub fn new(beacons: Vec<Vec3>, batteries: Vec<Vec3>) -> Self {
        Self {
            beacons: beacons
                .into_iter()
                .map(|position| Beacon {
                    position,
                    lit: false,
                })
                .collect(),
            batteries: batteries
                .into_iter()
                .map(|position| BatteryPickup {
                    position,
                    active: true,
                })
                .collect(),
            lit_positions: Vec::new(),
        }
    }

    pub fn lit_count(&self) -> usize {
        self.lit_positions.len()
    }

    /// All beacons burning — the maze's end state.
    pub fn all_beacons_lit(&self) -> bool {
        !self.beacons.is_empty() && self.beacons.iter().all(|beacon| beacon.lit)
    }

    /// Handle one press of the interact key.
    ///
    /// Every unlit beacon in reach and in view catches fire and tightens
    /// the intrusion schedule; at most one battery in reach is consumed.
    pub fn interact(
        &mut self,
        camera: &CameraController,
        flashlight: &mut Flashlight,
        behavior: &mut PlayerBehavior,
        sound: &mut dyn SoundSink,
    ) {
        for index in 0..self.beacons.len() {
            if self.beacons[index].lit {
                continue;
            }
            let position = self.beacons[index].position;
            if !Self::reachable(camera, position) {
                continue;
            }
            self.beacons[index].lit = true;
            self.lit_positions.push(position);
            behavior.register_beacon_activation();
            sound.play(SoundCue::BeaconLit, BEACON_LIT_VOLUME, false);
            sound.play_at(SoundCue::BeaconFire, BEACON_FIRE_VOLUME, true, position);
            log::debug!("beacon {} lit at {:?}", index, position);
        }

        for pickup in &mut self.batteries {
            if !pickup.active {
                continue;
            }
            if !Self::reachable(camera, pickup.position) {
                continue;
            }
            pickup.active = false;
            flashlight.charge();
            sound.play(SoundCue::BatteryPickup, BATTERY_VOLUME, false);
            break;
        }
    }

    /// Darken every beacon and restock every battery.
    pub fn reset(&mut self) {
        for beacon in &mut self.beacons {
            beacon.lit = false;
        }
        for pickup in &mut self.batteries {
            pickup.active = true;
        }
        self.lit_positions.clear();
    }

    fn reachable(camera: &CameraController, point: Vec3) -> bool {
        camera.position.distance(point) <= INTERACT_DISTANCE
            && camera.is_looking_at(point, INTERACT_ANGLE)
    }
}

// ============================================================================
// Tests
// ============================================================================
