//! Sleep-intrusion state machine.
//!
//! At random intervals the player is dragged into a "sleep" that must be
//! resolved through the neck-wrench ritual before a timeout lands a
//! penalty. Every lit beacon shortens the quiet stretches between
//! intrusions, until all of them burn and the intrusions stop for good.
//!
//! This machine never writes camera state while the neck sequence is
//! active; it only acts through the snapshot/teleport operations it is
//! granted when the sequence is idle or just finished.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraController;
use crate::flashlight::Flashlight;
use crate::random::SeededRandom;
use crate::world::SPAWN_POSITION;

/// Seconds a sleep may run before it is forcibly cancelled.
pub const SLEEP_TIMEOUT: f32 = 7.0;
/// Mean interval between intrusions with no beacons lit.
const BASE_TRIGGER_INTERVAL: f32 = 30.0;
/// Each lit beacon shortens the base interval by this weight.
const BEACON_INTERVAL_WEIGHT: f32 = 0.5;
/// Jitter band applied to every interval draw.
const JITTER_LOW: f32 = 0.7;
const JITTER_HIGH: f32 = 1.3;
/// Once this many beacons are lit, random triggers stop entirely.
const TRIGGER_DISABLE_COUNT: u32 = 5;
/// Stand-in for "never" that still satisfies the positive-interval rule.
const DISABLED_INTERVAL: f32 = 1.0e12;
/// Offset from the anchor beacon to the teleport landing point.
const BEACON_LANDING_OFFSET: Vec3 = Vec3::new(3.0, 4.0, 0.0);

/// Whether the player is awake or inside an intrusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepMode {
    Awake,
    Sleep,
}

/// Autonomous timer-driven player state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBehavior {
    mode: SleepMode,
    sleep_elapsed: f32,
    time_since_trigger: f32,
    activated_beacons: u32,
    /// Always strictly positive; redrawn whenever it is consumed.
    next_trigger_interval: f32,
    saved_position: Vec3,
    saved_battery: f32,
    rng: SeededRandom,
}

impl PlayerBehavior {
    /// Create an awake player with the given interval source.
    pub fn new(rng: SeededRandom) -> Self {
        Self {
            mode: SleepMode::Awake,
            sleep_elapsed: 0.0,
            time_since_trigger: 0.0,
            activated_beacons: 0,
            next_trigger_interval: BASE_TRIGGER_INTERVAL,
            saved_position: Vec3::ZERO,
            saved_battery: 0.0,
            rng,
        }
    }

    pub fn mode(&self) -> SleepMode {
        self.mode
    }

    pub fn is_sleeping(&self) -> bool {
        self.mode == SleepMode::Sleep
    }

    pub fn activated_beacons(&self) -> u32 {
        self.activated_beacons
    }

    pub fn next_trigger_interval(&self) -> f32 {
        self.next_trigger_interval
    }

    /// Overrule the scheduled interval (difficulty tuning, demos, tests).
    pub fn set_trigger_interval(&mut self, seconds: f32) {
        debug_assert!(seconds > 0.0);
        self.next_trigger_interval = seconds;
    }

    /// Advance the awake/sleep timers.
    ///
    /// Awake: counts toward the next intrusion and enters sleep when the
    /// interval elapses, snapshotting camera position and battery.
    /// Asleep: counts toward the timeout and force-cancels at
    /// [`SLEEP_TIMEOUT`] — teleport to the last lit beacon (or spawn) and
    /// half the battery gone.
    pub fn update(
        &mut self,
        dt: f32,
        camera: &mut CameraController,
        flashlight: &mut Flashlight,
        lit_beacons: &[Vec3],
    ) {
        match self.mode {
            SleepMode::Awake => {
                self.time_since_trigger += dt;
                if self.time_since_trigger >= self.next_trigger_interval {
                    self.begin_sleep(camera, flashlight);
                    self.time_since_trigger = 0.0;
                    self.redraw_interval();
                }
            }
            SleepMode::Sleep => {
                self.sleep_elapsed += dt;
                if self.sleep_elapsed >= SLEEP_TIMEOUT {
                    self.cancel_sleep(camera, flashlight, lit_beacons);
                }
            }
        }
    }

    /// React to a finished neck-wrench sequence, if any.
    ///
    /// Inside sleep this is the success path: the pre-intrusion snapshot
    /// comes back and no penalty applies. Awake, the ritual doubles as an
    /// emergency escape that costs half the battery. Either way the
    /// completion flag is consumed; a new run needs a fresh key edge.
    pub fn resolve_override(
        &mut self,
        camera: &mut CameraController,
        flashlight: &mut Flashlight,
        lit_beacons: &[Vec3],
    ) {
        if !camera.take_override_completed() {
            return;
        }

        if self.mode == SleepMode::Sleep {
            self.complete_sleep(camera, flashlight);
        } else {
            camera.set_position(Self::landing_point(lit_beacons));
            flashlight.halve_battery();
            log::debug!("emergency teleport, battery at {:.1}", flashlight.battery);
        }
    }

    /// Record a beacon activation and reschedule the next intrusion.
    pub fn register_beacon_activation(&mut self) {
        self.activated_beacons += 1;
        self.redraw_interval();
    }

    /// Reinitialize to awake with counters zeroed and a fresh interval.
    pub fn reset(&mut self) {
        self.mode = SleepMode::Awake;
        self.sleep_elapsed = 0.0;
        self.time_since_trigger = 0.0;
        self.activated_beacons = 0;
        self.redraw_interval();
    }

    fn redraw_interval(&mut self) {
        self.next_trigger_interval = if self.activated_beacons >= TRIGGER_DISABLE_COUNT {
            DISABLED_INTERVAL
        } else {
            let base = BASE_TRIGGER_INTERVAL
                / (1.0 + self.activated_beacons as f32 * BEACON_INTERVAL_WEIGHT);
            self.rng.next_range(base * JITTER_LOW, base * JITTER_HIGH)
        };
    }

    /// Where a cancelled sleep or emergency ritual drops the player.
    fn landing_point(lit_beacons: &[Vec3]) -> Vec3 {
        lit_beacons
            .last()
            .map(|anchor| *anchor + BEACON_LANDING_OFFSET)
            .unwrap_or(SPAWN_POSITION)
    }

    fn begin_sleep(&mut self, camera: &CameraController, flashlight: &Flashlight) {
        self.mode = SleepMode::Sleep;
        self.sleep_elapsed = 0.0;
        self.saved_position = camera.position;
        self.saved_battery = flashlight.battery;
        log::debug!("sleep intrusion at {:?}", camera.position);
    }

    fn complete_sleep(&mut self, camera: &mut CameraController, flashlight: &mut Flashlight) {
        self.mode = SleepMode::Awake;
        camera.set_position(self.saved_position);
        flashlight.battery = self.saved_battery;
        self.sleep_elapsed = 0.0;
        log::debug!("sleep resolved, snapshot restored");
    }

    fn cancel_sleep(
        &mut self,
        camera: &mut CameraController,
        flashlight: &mut Flashlight,
        lit_beacons: &[Vec3],
    ) {
        self.mode = SleepMode::Awake;
        camera.set_position(Self::landing_point(lit_beacons));
        flashlight.halve_battery();
        self.sleep_elapsed = 0.0;
        log::debug!("sleep timed out, battery at {:.1}", flashlight.battery);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::sound::NullSoundSink;

    const DT: f32 = 0.1;

    fn rig() -> (PlayerBehavior, CameraController, Flashlight) {
        let behavior = PlayerBehavior::new(SeededRandom::new(7));
        let camera = CameraController::new(CameraConfig::default(), SPAWN_POSITION);
        let flashlight = Flashlight::default();
        (behavior, camera, flashlight)
    }

    fn advance(
        behavior: &mut PlayerBehavior,
        camera: &mut CameraController,
        flashlight: &mut Flashlight,
        lit: &[Vec3],
        seconds: f32,
    ) {
        let steps = (seconds / DT).round() as usize;
        for _ in 0..steps {
            behavior.update(DT, camera, flashlight, lit);
        }
    }

    #[test]
    fn test_trigger_enters_sleep_with_snapshot() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        behavior.set_trigger_interval(5.0);
        camera.set_position(Vec3::new(12.0, 7.0, -30.0));

        advance(&mut behavior, &mut camera, &mut flashlight, &[], 5.1);

        assert!(behavior.is_sleeping());
        assert_eq!(behavior.saved_position, Vec3::new(12.0, 7.0, -30.0));
        assert_eq!(behavior.saved_battery, 100.0);
        // Consuming the interval redraws it.
        assert!(behavior.next_trigger_interval() != 5.0);
    }

    #[test]
    fn test_timeout_cancels_with_penalty() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        behavior.set_trigger_interval(5.0);
        camera.set_position(Vec3::new(12.0, 7.0, -30.0));

        advance(&mut behavior, &mut camera, &mut flashlight, &[], 5.1);
        assert!(behavior.is_sleeping());

        advance(&mut behavior, &mut camera, &mut flashlight, &[], 7.1);
        assert_eq!(behavior.mode(), SleepMode::Awake);
        assert_eq!(flashlight.battery, 50.0);
        // No beacon lit yet: back to spawn.
        assert_eq!(camera.position, SPAWN_POSITION);
    }

    #[test]
    fn test_timeout_lands_at_last_lit_beacon() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        behavior.set_trigger_interval(1.0);
        let lit = [Vec3::new(0.0, 3.0, 0.0), Vec3::new(100.0, 3.0, 50.0)];

        advance(&mut behavior, &mut camera, &mut flashlight, &lit, 1.1);
        advance(&mut behavior, &mut camera, &mut flashlight, &lit, 7.1);

        assert_eq!(camera.position, Vec3::new(103.0, 7.0, 50.0));
    }

    #[test]
    fn test_ritual_completes_sleep_without_penalty() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        let mut sink = NullSoundSink;
        behavior.set_trigger_interval(1.0);
        camera.set_position(Vec3::new(-20.0, 7.0, 40.0));

        advance(&mut behavior, &mut camera, &mut flashlight, &[], 1.1);
        assert!(behavior.is_sleeping());

        // Run the neck sequence to completion in one oversized tick.
        camera.start_neck_override();
        camera.update_physics(3.0, &mut sink);
        behavior.resolve_override(&mut camera, &mut flashlight, &[]);

        assert_eq!(behavior.mode(), SleepMode::Awake);
        assert_eq!(flashlight.battery, 100.0);
        assert_eq!(camera.position, Vec3::new(-20.0, 7.0, 40.0));
    }

    #[test]
    fn test_ritual_while_awake_is_emergency_teleport() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        let mut sink = NullSoundSink;
        camera.set_position(Vec3::new(200.0, 7.0, 200.0));

        camera.start_neck_override();
        camera.update_physics(3.0, &mut sink);
        behavior.resolve_override(&mut camera, &mut flashlight, &[]);

        assert_eq!(camera.position, SPAWN_POSITION);
        assert_eq!(flashlight.battery, 50.0);

        // Completion was consumed; resolving again changes nothing.
        behavior.resolve_override(&mut camera, &mut flashlight, &[]);
        assert_eq!(flashlight.battery, 50.0);
    }

    #[test]
    fn test_interval_shrinks_with_beacons_and_stays_in_band() {
        let mut behavior = PlayerBehavior::new(SeededRandom::new(99));

        behavior.register_beacon_activation();
        behavior.register_beacon_activation();
        // base = 30 / (1 + 2 * 0.5) = 15
        let interval = behavior.next_trigger_interval();
        assert!((10.5..=19.5).contains(&interval));
    }

    #[test]
    fn test_interval_draws_are_seed_deterministic() {
        let mut a = PlayerBehavior::new(SeededRandom::new(1234));
        let mut b = PlayerBehavior::new(SeededRandom::new(1234));
        for _ in 0..10 {
            a.register_beacon_activation();
            b.register_beacon_activation();
            assert_eq!(a.next_trigger_interval(), b.next_trigger_interval());
        }
    }

    #[test]
    fn test_five_beacons_disable_triggers() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        for _ in 0..5 {
            behavior.register_beacon_activation();
        }
        assert_eq!(behavior.next_trigger_interval(), DISABLED_INTERVAL);

        // 10,000 ticks of 16 ms: nothing fires.
        for _ in 0..10_000 {
            behavior.update(0.016, &mut camera, &mut flashlight, &[]);
        }
        assert_eq!(behavior.mode(), SleepMode::Awake);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut behavior, mut camera, mut flashlight) = rig();
        behavior.set_trigger_interval(1.0);
        behavior.register_beacon_activation();
        advance(&mut behavior, &mut camera, &mut flashlight, &[], 1.1);

        behavior.reset();
        assert_eq!(behavior.mode(), SleepMode::Awake);
        assert_eq!(behavior.activated_beacons(), 0);
        assert_eq!(behavior.time_since_trigger, 0.0);
        assert_eq!(behavior.sleep_elapsed, 0.0);
        assert!((21.0..=39.0).contains(&behavior.next_trigger_interval()));

        behavior.reset();
        assert_eq!(behavior.mode(), SleepMode::Awake);
        assert_eq!(behavior.activated_beacons(), 0);
        assert!((21.0..=39.0).contains(&behavior.next_trigger_interval()));
    }
}
