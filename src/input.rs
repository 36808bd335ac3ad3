//! Key state shared between the input edge and the player entity
//!
//! Four directional flags are written on key events and read once per frame
//! by the player's update. There is no buffering or queueing: a press/release
//! pair that lands between two frames coalesces to whatever the flags hold at
//! the instant the frame reads them. Firing is different - it is a discrete
//! trigger surfaced to the caller at event time, not sampled per frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Directional flag state, last-write-wins
#[derive(Debug, Default)]
pub struct InputFlags {
    up: AtomicBool,
    down: AtomicBool,
    left: AtomicBool,
    right: AtomicBool,
}

impl InputFlags {
    pub fn up(&self) -> bool {
        self.up.load(Ordering::Relaxed)
    }

    pub fn down(&self) -> bool {
        self.down.load(Ordering::Relaxed)
    }

    pub fn left(&self) -> bool {
        self.left.load(Ordering::Relaxed)
    }

    pub fn right(&self) -> bool {
        self.right.load(Ordering::Relaxed)
    }

    pub fn set_up(&self, pressed: bool) {
        self.up.store(pressed, Ordering::Relaxed);
    }

    pub fn set_down(&self, pressed: bool) {
        self.down.store(pressed, Ordering::Relaxed);
    }

    pub fn set_left(&self, pressed: bool) {
        self.left.store(pressed, Ordering::Relaxed);
    }

    pub fn set_right(&self, pressed: bool) {
        self.right.store(pressed, Ordering::Relaxed);
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Discrete events the frame driver must act on synchronously
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Fire,
}

/// Translates raw key events into flag writes and triggers
#[derive(Debug, Default)]
pub struct InputMap {
    flags: Arc<InputFlags>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared flag state for the player entity
    pub fn flags(&self) -> Arc<InputFlags> {
        Arc::clone(&self.flags)
    }

    pub fn key_down(&self, key: Key) {
        match key {
            Key::Up => self.flags.set_up(true),
            Key::Down => self.flags.set_down(true),
            Key::Left => self.flags.set_left(true),
            Key::Right => self.flags.set_right(true),
            Key::Fire => {}
        }
    }

    /// Handle a key release. Fire triggers on release so holding the key
    /// cannot autofire.
    #[must_use]
    pub fn key_up(&self, key: Key) -> Option<Trigger> {
        match key {
            Key::Up => self.flags.set_up(false),
            Key::Down => self.flags.set_down(false),
            Key::Left => self.flags.set_left(false),
            Key::Right => self.flags.set_right(false),
            Key::Fire => return Some(Trigger::Fire),
        }
        None
    }
}
