//! Game modes: whatever currently owns input and the frame.

use engine_core::UVec2;
use input::KeyPress;

pub trait Mode {
    /// Called for every key-down event. Returns true if the event was handled.
    fn handle_event(&mut self, event: &KeyPress) -> bool;

    /// Called once per frame after events, with the frame's elapsed seconds.
    fn update(&mut self, elapsed: f32);

    /// Called after `update`.
    fn draw(&mut self, _drawable_size: UVec2) {}
}
