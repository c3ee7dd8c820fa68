//! Nocturne — headless demo driver.
//!
//! Runs the simulation core against a scripted input tape and a small
//! obstacle set at a fixed 60 Hz step, narrating cues and state changes
//! through the logger. Smoke-tests the whole core without a window, GPU
//! or audio device:
//!
//! ```text
//! RUST_LOG=debug cargo run
//! ```

use glam::Vec3;
use nocturne_core::{
    AxisAlignedVolume, InputFrame, Simulation, SimulationConfig, SoundCue, SoundSink, World,
};

/// Sink that narrates cue requests through the logger.
struct LogSoundSink;

impl SoundSink for LogSoundSink {
    fn play(&mut self, cue: SoundCue, volume: f32, looped: bool) {
        log::info!("cue {:?} (volume {volume}, looped {looped})", cue);
    }

    fn play_at(&mut self, cue: SoundCue, volume: f32, looped: bool, position: Vec3) {
        log::info!(
            "cue {:?} (volume {volume}, looped {looped}) at {position}",
            cue
        );
    }

    fn stop(&mut self, cue: SoundCue) {
        log::info!("stop {:?}", cue);
    }

    fn set_listener(&mut self, _position: Vec3, _facing: Vec3) {}
}

const DT: f32 = 1.0 / 60.0;

fn run(
    sim: &mut Simulation,
    sound: &mut LogSoundSink,
    obstacles: &[AxisAlignedVolume],
    frame: InputFrame,
    seconds: f32,
) {
    let steps = (seconds / DT).round() as usize;
    for _ in 0..steps {
        sim.tick(DT, &frame, obstacles, sound);
    }
}

fn main() {
    env_logger::init();

    let mut sim = Simulation::new(SimulationConfig::default(), World::default());
    let mut sound = LogSoundSink;

    // Shorten the quiet stretch so the demo reaches an intrusion quickly.
    sim.behavior.set_trigger_interval(8.0);

    // A wall across the corridor ahead of spawn.
    let spawn = sim.camera.position;
    let obstacles = vec![AxisAlignedVolume::new(
        spawn + Vec3::new(-30.0, -10.0, -44.0),
        spawn + Vec3::new(30.0, 10.0, -40.0),
    )];

    log::info!("spawn at {}", sim.camera.position);

    // Walk toward the wall, sliding to a stop against it.
    let forward = InputFrame {
        forward: true,
        ..Default::default()
    };
    run(&mut sim, &mut sound, &obstacles, forward, 2.0);
    log::info!("after walk: {}", sim.camera.position);

    // Flashlight on, then a jump.
    run(
        &mut sim,
        &mut sound,
        &obstacles,
        InputFrame {
            flashlight: true,
            ..Default::default()
        },
        DT,
    );
    run(
        &mut sim,
        &mut sound,
        &obstacles,
        InputFrame {
            jump: true,
            ..Default::default()
        },
        1.0,
    );
    log::info!(
        "after jump: {} (battery {:.1})",
        sim.camera.position,
        sim.flashlight.battery
    );

    // Idle until the sleep intrusion fires, then perform the ritual.
    run(&mut sim, &mut sound, &obstacles, InputFrame::default(), 7.0);
    log::info!(
        "mode {:?}, battery {:.1}",
        sim.behavior.mode(),
        sim.flashlight.battery
    );

    run(
        &mut sim,
        &mut sound,
        &obstacles,
        InputFrame {
            neck: true,
            ..Default::default()
        },
        DT,
    );
    run(&mut sim, &mut sound, &obstacles, InputFrame::default(), 3.0);
    log::info!(
        "after ritual: mode {:?}, position {}, battery {:.1}",
        sim.behavior.mode(),
        sim.camera.position,
        sim.flashlight.battery
    );

    // Restart and confirm the session is factory-fresh.
    sim.restart(&mut sound);
    log::info!(
        "after restart: position {}, battery {:.1}, lit beacons {}",
        sim.camera.position,
        sim.flashlight.battery,
        sim.world.lit_count()
    );
}
