//! Nocturne Simulation Core
//!
//! The runtime heart of a first-person exploration/horror game: camera
//! kinematics with box collision, a timed sleep-intrusion state machine,
//! the scripted neck-wrench camera takeover, a battery-driven flashlight,
//! and the arbitration rules that keep all of them from fighting over the
//! camera.
//!
//! # Architecture
//!
//! Everything is advanced synchronously by [`Simulation::tick`] with a
//! caller-supplied delta time. Animations are accumulated-time state
//! machines, not scheduled tasks, so any tick cadence produces the same
//! phase boundaries.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │  ┌───────┐   ┌──────────────┐   ┌──────────┐   ┌──────────┐  │
//! │  │ Input │──►│ Camera       │──►│ Collision│──►│ Behavior │  │
//! │  │ frame │   │ (move / jump │   │ (AABB    │   │ (sleep,  │  │
//! │  └───────┘   │  / takeover) │   │  sweep)  │   │  penalty)│  │
//! │              └──────────────┘   └──────────┘   └──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly one authority writes camera position/orientation on a given
//! tick: the movement/jump path during normal play, the neck sequence
//! while it is active, and the sleep state machine only through the
//! snapshot/teleport operations it is explicitly granted.
//!
//! Rendering, windowing, asset loading and audio playback live outside
//! this crate. The world hands in a fresh obstacle set every tick and a
//! [`SoundSink`] receives fire-and-forget cues.

pub mod behavior;
pub mod camera;
pub mod collision;
pub mod flashlight;
pub mod input;
pub mod random;
pub mod simulation;
pub mod sound;
pub mod world;

// Re-export the types most consumers need.
pub use behavior::{PlayerBehavior, SleepMode};
pub use camera::{CameraConfig, CameraController, MoveDirection, NeckAction, NeckOverride};
pub use collision::{resolve_walk, AxisAlignedVolume};
pub use flashlight::Flashlight;
pub use input::{InputDebouncer, InputFrame};
pub use random::SeededRandom;
pub use simulation::{Simulation, SimulationConfig};
pub use sound::{NullSoundSink, RecordingSoundSink, SoundCue, SoundSink};
pub use world::World;
