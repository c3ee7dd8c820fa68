//! Fire-and-forget sound cue interface.
//!
//! The core only *requests* cues; buffer loading and playback live in an
//! outer audio layer. Implementations must never block, and the
//! simulation must run unchanged against a sink that drops everything.

use glam::Vec3;

/// Discrete audio events the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Looping footstep bed while the player walks.
    Footsteps,
    /// One-shot on leaving the ground.
    Jump,
    /// One-shot on touching back down.
    Land,
    /// Flashlight switch click.
    FlashlightToggle,
    /// Battery scavenged.
    BatteryPickup,
    /// A beacon catching fire.
    BeaconLit,
    /// Looping positional crackle of a lit beacon.
    BeaconFire,
    /// The warning stinger spammed during the neck-wrench turn.
    NeckWarning,
}

/// Receiver for cue requests.
pub trait SoundSink {
    /// Start a cue at listener position.
    fn play(&mut self, cue: SoundCue, volume: f32, looped: bool);

    /// Start a cue at a world position.
    fn play_at(&mut self, cue: SoundCue, volume: f32, looped: bool, position: Vec3);

    /// Stop every live instance of a cue.
    fn stop(&mut self, cue: SoundCue);

    /// Update the listener transform for positional audio.
    fn set_listener(&mut self, position: Vec3, facing: Vec3);
}

/// Sink that drops every request. Lets the core run without an audio
/// device.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSoundSink;

impl SoundSink for NullSoundSink {
    fn play(&mut self, _cue: SoundCue, _volume: f32, _looped: bool) {}
    fn play_at(&mut self, _cue: SoundCue, _volume: f32, _looped: bool, _position: Vec3) {}
    fn stop(&mut self, _cue: SoundCue) {}
    fn set_listener(&mut self, _position: Vec3, _facing: Vec3) {}
}

/// A single recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundEvent {
    Play {
        cue: SoundCue,
        volume: f32,
        looped: bool,
        position: Option<Vec3>,
    },
    Stop(SoundCue),
}

/// Sink that records every request, for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSoundSink {
    pub events: Vec<SoundEvent>,
}

impl RecordingSoundSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a cue was started.
    pub fn plays(&self, cue: SoundCue) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SoundEvent::Play { cue: c, .. } if *c == cue))
            .count()
    }

    /// How many times a cue was stopped.
    pub fn stops(&self, cue: SoundCue) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SoundEvent::Stop(c) if *c == cue))
            .count()
    }
}

impl SoundSink for RecordingSoundSink {
    fn play(&mut self, cue: SoundCue, volume: f32, looped: bool) {
        self.events.push(SoundEvent::Play {
            cue,
            volume,
            looped,
            position: None,
        });
    }

    fn play_at(&mut self, cue: SoundCue, volume: f32, looped: bool, position: Vec3) {
        self.events.push(SoundEvent::Play {
            cue,
            volume,
            looped,
            position: Some(position),
        });
    }

    fn stop(&mut self, cue: SoundCue) {
        self.events.push(SoundEvent::Stop(cue));
    }

    fn set_listener(&mut self, _position: Vec3, _facing: Vec3) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_counts() {
        let mut sink = RecordingSoundSink::new();
        sink.play(SoundCue::Jump, 80.0, false);
        sink.play(SoundCue::Jump, 80.0, false);
        sink.play_at(SoundCue::BeaconFire, 20.0, true, Vec3::ONE);
        sink.stop(SoundCue::Footsteps);

        assert_eq!(sink.plays(SoundCue::Jump), 2);
        assert_eq!(sink.plays(SoundCue::BeaconFire), 1);
        assert_eq!(sink.stops(SoundCue::Footsteps), 1);
        assert_eq!(sink.plays(SoundCue::Land), 0);
    }
}
