//! First-person camera: orientation, movement with collision, jump
//! physics, walk bob, idle breathing, and the scripted neck-wrench
//! takeover that temporarily seizes the camera.

mod config;
mod controller;
mod neck;

pub use config::CameraConfig;
pub use controller::{CameraController, MoveDirection};
pub use neck::{NeckAction, NeckOverride};
