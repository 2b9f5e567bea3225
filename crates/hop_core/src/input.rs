//! Keyboard state tracking with both level-triggered and edge-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   physically down. Movement polls this once per frame.
//!
//! - **Edge-triggered (just_pressed):** true only for the frame in which the key
//!   went down. Discrete actions (quit, overlay toggle) read it. The set is
//!   cleared by `end_frame()` after the frame has been simulated and drawn.
//!
//! Jumping deliberately does not use `just_pressed`: the player keeps its own
//! previous-key bit so the edge is detected against what the player last saw.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    Escape,
    F3,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses for a key that is already held
    /// are ignored.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Drop every held key, e.g. when the window loses focus and key-up events
    /// will never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            log::debug!("Releasing {} held key(s)", self.held.len());
        }
        self.held.clear();
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}
