//! Per-tick input snapshot and edge detection.
//!
//! The windowing layer samples its devices into an [`InputFrame`] once
//! per tick. Keys that act on press (jump, toggles, the ritual) go
//! through [`InputDebouncer`], which keeps the previous frame's levels in
//! explicit fields — one rising edge per held press, no hidden statics.

use serde::{Deserialize, Serialize};

/// Raw input levels for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,

    /// Jump key level.
    pub jump: bool,
    /// Flashlight toggle key level.
    pub flashlight: bool,
    /// Interact key level (beacons, pickups).
    pub interact: bool,
    /// The dedicated key that starts the neck-wrench ritual.
    pub neck: bool,
    /// Menu/pause toggle key level.
    pub menu: bool,

    /// Pointer movement this tick; +x looks right, +y looks up.
    pub pointer_delta: (f32, f32),
}

/// Rising edges extracted from consecutive frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputEdges {
    pub jump: bool,
    pub flashlight: bool,
    pub interact: bool,
    pub neck: bool,
    pub menu: bool,
}

/// Holds the previous frame's button levels for edge detection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputDebouncer {
    jump: bool,
    flashlight: bool,
    interact: bool,
    neck: bool,
    menu: bool,
}

impl InputDebouncer {
    /// Compare against the previous frame and report fresh presses.
    pub fn edges(&mut self, frame: &InputFrame) -> InputEdges {
        let edges = InputEdges {
            jump: frame.jump && !self.jump,
            flashlight: frame.flashlight && !self.flashlight,
            interact: frame.interact && !self.interact,
            neck: frame.neck && !self.neck,
            menu: frame.menu && !self.menu,
        };
        self.jump = frame.jump;
        self.flashlight = frame.flashlight;
        self.interact = frame.interact;
        self.neck = frame.neck;
        self.menu = frame.menu;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_edge_per_held_press() {
        let mut debouncer = InputDebouncer::default();
        let held = InputFrame {
            interact: true,
            ..Default::default()
        };

        assert!(debouncer.edges(&held).interact);
        for _ in 0..10 {
            assert!(!debouncer.edges(&held).interact);
        }
    }

    #[test]
    fn test_release_rearms() {
        let mut debouncer = InputDebouncer::default();
        let pressed = InputFrame {
            neck: true,
            ..Default::default()
        };
        let released = InputFrame::default();

        assert!(debouncer.edges(&pressed).neck);
        assert!(!debouncer.edges(&pressed).neck);
        debouncer.edges(&released);
        assert!(debouncer.edges(&pressed).neck);
    }

    #[test]
    fn test_edges_are_independent() {
        let mut debouncer = InputDebouncer::default();
        let frame = InputFrame {
            jump: true,
            menu: true,
            ..Default::default()
        };

        let edges = debouncer.edges(&frame);
        assert!(edges.jump);
        assert!(edges.menu);
        assert!(!edges.flashlight);
    }
}
