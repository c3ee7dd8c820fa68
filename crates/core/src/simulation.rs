//! The simulation context: one object owning every mutable piece of game
//! state, advanced by a caller-supplied delta time once per tick.
//!
//! The order inside [`Simulation::tick`] is load-bearing: input becomes
//! movement intent, the camera moves and collides, then either jump
//! physics or the neck sequence runs (never both), and only then does the
//! sleep machine tick and react — including to a sequence that finished
//! this very tick.

use crate::behavior::{PlayerBehavior, SleepMode};
use crate::camera::{CameraConfig, CameraController, MoveDirection};
use crate::collision::AxisAlignedVolume;
use crate::flashlight::{Flashlight, MAX_BATTERY};
use crate::input::{InputDebouncer, InputFrame};
use crate::random::SeededRandom;
use crate::sound::{SoundCue, SoundSink};
use crate::world::{World, SPAWN_POSITION};

const FOOTSTEPS_VOLUME: f32 = 70.0;
const JUMP_VOLUME: f32 = 80.0;
const FLASHLIGHT_VOLUME: f32 = 80.0;

/// Top-level knobs for a simulation session.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub camera: CameraConfig,
    /// Seed for the sleep-trigger interval source.
    pub rng_seed: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            rng_seed: 1,
        }
    }
}

/// All mutable game state, wired together.
///
/// Subsystems never reach for globals; whatever they need is passed by
/// reference from here, one writer per tick.
#[derive(Debug)]
pub struct Simulation {
    pub camera: CameraController,
    pub flashlight: Flashlight,
    pub behavior: PlayerBehavior,
    pub world: World,

    debouncer: InputDebouncer,
    paused: bool,
    was_walking: bool,
    was_jumping: bool,
    /// Wall-clock accumulator for the sleep flicker.
    elapsed: f32,
}

impl Simulation {
    pub fn new(config: SimulationConfig, world: World) -> Self {
        Self {
            camera: CameraController::new(config.camera, SPAWN_POSITION),
            flashlight: Flashlight::default(),
            behavior: PlayerBehavior::new(SeededRandom::new(config.rng_seed)),
            world,
            debouncer: InputDebouncer::default(),
            paused: false,
            was_walking: false,
            was_jumping: false,
            elapsed: 0.0,
        }
    }

    /// Default-configured session in the standard maze layout.
    pub fn standard() -> Self {
        Self::new(SimulationConfig::default(), World::default())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance the whole game by one tick.
    ///
    /// `obstacles` is this tick's static collision set from the world
    /// geometry; it may be empty. `sound` receives fire-and-forget cues.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputFrame,
        obstacles: &[AxisAlignedVolume],
        sound: &mut dyn SoundSink,
    ) {
        let edges = self.debouncer.edges(input);

        if edges.menu {
            self.paused = !self.paused;
        }
        if self.paused {
            return;
        }
        self.elapsed += dt;

        // Movement intent is level-triggered; jump wants a fresh edge.
        self.camera.set_move(MoveDirection::Forward, input.forward);
        self.camera.set_move(MoveDirection::Backward, input.backward);
        self.camera.set_move(MoveDirection::Left, input.left);
        self.camera.set_move(MoveDirection::Right, input.right);
        if edges.jump {
            self.camera.start_jump();
        }
        self.camera
            .process_orientation(input.pointer_delta.0, input.pointer_delta.1, true);

        self.flashlight.track_camera(&self.camera);
        self.camera.update_position(dt, obstacles);
        self.camera.update_idle(dt);
        self.flashlight.update_battery(dt);

        self.camera.update_physics(dt, sound);

        if edges.interact {
            self.world
                .interact(&self.camera, &mut self.flashlight, &mut self.behavior, sound);
        }
        if edges.flashlight {
            self.flashlight.toggle();
            sound.play(SoundCue::FlashlightToggle, FLASHLIGHT_VOLUME, false);
        }

        sound.set_listener(self.camera.position, self.camera.front);

        self.behavior.update(
            dt,
            &mut self.camera,
            &mut self.flashlight,
            &self.world.lit_positions,
        );

        // The lamp gutters while something is wrong.
        if self.behavior.mode() == SleepMode::Sleep {
            self.flashlight.set_intensity(sleep_flicker(self.elapsed));
        } else if self.flashlight.on {
            self.flashlight.set_intensity(1.0);
        }

        if edges.neck && !self.camera.override_active() {
            self.camera.start_neck_override();
        }
        self.behavior.resolve_override(
            &mut self.camera,
            &mut self.flashlight,
            &self.world.lit_positions,
        );

        let walking = self.camera.is_moving();
        if walking != self.was_walking {
            self.was_walking = walking;
            if walking {
                sound.play(SoundCue::Footsteps, FOOTSTEPS_VOLUME, true);
            } else {
                sound.stop(SoundCue::Footsteps);
            }
        }

        let jumping = self.camera.is_jumping();
        if jumping && !self.was_jumping {
            sound.play(SoundCue::Jump, JUMP_VOLUME, false);
        }
        self.was_jumping = jumping;
    }

    /// In-process restart: spawn position, full battery, dark beacons,
    /// fresh pickups, rearmed sleep schedule. Nothing touches disk.
    pub fn restart(&mut self, sound: &mut dyn SoundSink) {
        self.camera.set_position(SPAWN_POSITION);
        self.flashlight.battery = MAX_BATTERY;
        self.world.reset();
        sound.stop(SoundCue::BeaconFire);
        self.behavior.reset();
        self.paused = false;
        log::info!("session restarted");
    }
}

/// Flashlight intensity while asleep: a fast, uneasy gutter.
fn sleep_flicker(t: f32) -> f32 {
    ((t * 10.0).sin() * 0.5 + 0.5) * 0.3 + 0.2
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::RecordingSoundSink;
    use glam::Vec3;

    const DT: f32 = 0.016;

    fn run(
        sim: &mut Simulation,
        sink: &mut RecordingSoundSink,
        frame: &InputFrame,
        seconds: f32,
    ) {
        let steps = (seconds / DT).ceil() as usize;
        for _ in 0..steps {
            sim.tick(DT, frame, &[], sink);
        }
    }

    fn idle() -> InputFrame {
        InputFrame::default()
    }

    #[test]
    fn test_walk_moves_camera_and_loops_footsteps() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        let forward = InputFrame {
            forward: true,
            ..Default::default()
        };

        run(&mut sim, &mut sink, &forward, 1.0);
        assert!(sim.camera.position.distance(SPAWN_POSITION) > 10.0);
        assert_eq!(sink.plays(SoundCue::Footsteps), 1);
        assert_eq!(sink.stops(SoundCue::Footsteps), 0);

        run(&mut sim, &mut sink, &idle(), 0.5);
        assert_eq!(sink.stops(SoundCue::Footsteps), 1);
    }

    #[test]
    fn test_jump_cue_fires_once_per_press() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        let jump_held = InputFrame {
            jump: true,
            ..Default::default()
        };

        run(&mut sim, &mut sink, &jump_held, 1.5);
        assert_eq!(sink.plays(SoundCue::Jump), 1);
        assert_eq!(sink.plays(SoundCue::Land), 1);
        assert!(!sim.camera.is_jumping());
    }

    #[test]
    fn test_flashlight_toggle_and_drain() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        let toggle = InputFrame {
            flashlight: true,
            ..Default::default()
        };

        sim.tick(DT, &toggle, &[], &mut sink);
        assert!(sim.flashlight.on);
        assert_eq!(sink.plays(SoundCue::FlashlightToggle), 1);

        run(&mut sim, &mut sink, &idle(), 10.0);
        assert!(sim.flashlight.battery < MAX_BATTERY);
    }

    #[test]
    fn test_menu_pauses_the_world() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();

        sim.tick(DT, &InputFrame { menu: true, ..Default::default() }, &[], &mut sink);
        assert!(sim.is_paused());

        let forward = InputFrame {
            forward: true,
            ..Default::default()
        };
        run(&mut sim, &mut sink, &forward, 1.0);
        assert_eq!(sim.camera.position, SPAWN_POSITION);

        // Release, press again: unpaused, and the world moves again.
        sim.tick(DT, &idle(), &[], &mut sink);
        sim.tick(DT, &InputFrame { menu: true, ..Default::default() }, &[], &mut sink);
        assert!(!sim.is_paused());
        run(&mut sim, &mut sink, &forward, 1.0);
        assert!(sim.camera.position.distance(SPAWN_POSITION) > 10.0);
    }

    #[test]
    fn test_sleep_ritual_success_restores_snapshot() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        sim.behavior.set_trigger_interval(1.0);

        run(&mut sim, &mut sink, &idle(), 1.2);
        assert!(sim.behavior.is_sleeping());
        let entry_position = sim.camera.position;

        // One press of the ritual key, then let the sequence play out.
        sim.tick(DT, &InputFrame { neck: true, ..Default::default() }, &[], &mut sink);
        assert!(sim.camera.override_active());
        run(&mut sim, &mut sink, &idle(), 2.8);

        assert!(!sim.camera.override_active());
        assert_eq!(sim.behavior.mode(), SleepMode::Awake);
        assert_eq!(sim.flashlight.battery, MAX_BATTERY);
        assert!(sim.camera.position.distance(entry_position) < 0.01);
        assert!(sink.plays(SoundCue::NeckWarning) > 0);
    }

    #[test]
    fn test_sleep_timeout_teleports_and_halves_battery() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        sim.behavior.set_trigger_interval(60.0);

        // Wander away from spawn first.
        let forward = InputFrame {
            forward: true,
            ..Default::default()
        };
        run(&mut sim, &mut sink, &forward, 2.0);
        assert!(sim.camera.position.distance(SPAWN_POSITION) > 50.0);

        sim.behavior.set_trigger_interval(1.0);
        run(&mut sim, &mut sink, &idle(), 1.2);
        assert!(sim.behavior.is_sleeping());

        run(&mut sim, &mut sink, &idle(), 7.2);
        assert_eq!(sim.behavior.mode(), SleepMode::Awake);
        assert_eq!(sim.flashlight.battery, 50.0);
        // No beacons lit: dumped back at spawn.
        assert!(sim.camera.position.distance(SPAWN_POSITION) < 0.01);
    }

    #[test]
    fn test_awake_ritual_is_emergency_with_no_compounding() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        sim.behavior.set_trigger_interval(1000.0);

        let forward = InputFrame {
            forward: true,
            ..Default::default()
        };
        run(&mut sim, &mut sink, &forward, 2.0);

        // Hold the ritual key through the whole sequence and beyond: the
        // single edge starts it, completion applies one penalty, and the
        // held key never re-arms it.
        let neck_held = InputFrame {
            neck: true,
            ..Default::default()
        };
        run(&mut sim, &mut sink, &neck_held, 4.0);

        assert!(!sim.camera.override_active());
        assert_eq!(sim.flashlight.battery, 50.0);
        assert!(sim.camera.position.distance(SPAWN_POSITION) < 0.01);

        // A fresh edge is required for another run.
        sim.tick(DT, &idle(), &[], &mut sink);
        sim.tick(DT, &neck_held, &[], &mut sink);
        assert!(sim.camera.override_active());
    }

    #[test]
    fn test_collision_obstacles_block_walking() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();

        // A wall just ahead of spawn, across the -Z walking direction.
        let wall = AxisAlignedVolume::new(
            SPAWN_POSITION + Vec3::new(-30.0, -10.0, -8.0),
            SPAWN_POSITION + Vec3::new(30.0, 10.0, -6.0),
        );
        let forward = InputFrame {
            forward: true,
            ..Default::default()
        };
        for _ in 0..120 {
            sim.tick(DT, &forward, &[wall], &mut sink);
        }

        // Stopped at the wall face instead of passing through.
        assert!(sim.camera.position.z > SPAWN_POSITION.z - 6.0);
    }

    #[test]
    fn test_restart_reinitializes_session() {
        let mut sim = Simulation::standard();
        let mut sink = RecordingSoundSink::new();
        sim.behavior.set_trigger_interval(1.0);

        let forward = InputFrame {
            forward: true,
            ..Default::default()
        };
        run(&mut sim, &mut sink, &forward, 2.0);
        run(&mut sim, &mut sink, &idle(), 9.0); // intrusion + timeout penalty
        assert!(sim.flashlight.battery < MAX_BATTERY);

        sim.restart(&mut sink);

        assert_eq!(sim.camera.position, SPAWN_POSITION);
        assert_eq!(sim.flashlight.battery, MAX_BATTERY);
        assert_eq!(sim.behavior.mode(), SleepMode::Awake);
        assert_eq!(sim.behavior.activated_beacons(), 0);
        assert!(sim.world.lit_positions.is_empty());
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_sleep_flicker_band() {
        for step in 0..200 {
            let intensity = sleep_flicker(step as f32 * 0.05);
            assert!((0.2..=0.5).contains(&intensity));
        }
    }
}
