//! Keyboard input collection
//!
//! The host reports key presses and releases as they happen; the game loop
//! asks for a fresh `ControlIntent` once per frame. Only the derived intent
//! reaches the simulation.

use std::collections::BTreeSet;

use crate::sim::ControlIntent;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` / `.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            38 => Some(Key::Up),
            40 => Some(Key::Down),
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            32 => Some(Key::Space),
            _ => None,
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: BTreeSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Release everything (window lost focus, so key-up events will be missed)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Intent for this frame. `Down` is tracked but has no action.
    pub fn intent(&self) -> ControlIntent {
        ControlIntent {
            thrust: self.is_held(Key::Up),
            turn_left: self.is_held(Key::Left),
            turn_right: self.is_held(Key::Right),
            fire: self.is_held(Key::Space),
        }
    }
}
