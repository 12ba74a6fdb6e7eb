//! Input latch
//!
//! Host event handlers write into the latch whenever events arrive; the game
//! loop takes one `TickInput` per tick. Movement is held state, fire is a
//! one-shot trigger that survives until the next tick consumes it.

use crate::sim::TickInput;

/// Legacy `keyCode` values
pub const KEY_SPACE: u32 = 32;
pub const KEY_LEFT: u32 = 37;
pub const KEY_RIGHT: u32 = 39;

#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    key_left: bool,
    key_right: bool,
    touch_left: bool,
    touch_right: bool,
    fire_pending: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key_code: u32) {
        match key_code {
            KEY_LEFT => self.key_left = true,
            KEY_RIGHT => self.key_right = true,
            _ => {}
        }
    }

    /// Space fires on release, not on press
    pub fn key_up(&mut self, key_code: u32) {
        match key_code {
            KEY_LEFT => self.key_left = false,
            KEY_RIGHT => self.key_right = false,
            KEY_SPACE => self.fire_pending = true,
            _ => {}
        }
    }

    pub fn touch_left(&mut self, pressed: bool) {
        self.touch_left = pressed;
    }

    pub fn touch_right(&mut self, pressed: bool) {
        self.touch_right = pressed;
    }

    pub fn touch_fire(&mut self) {
        self.fire_pending = true;
    }

    /// Current input; clears the fire trigger
    pub fn take(&mut self) -> TickInput {
        TickInput {
            left: self.key_left || self.touch_left,
            right: self.key_right || self.touch_right,
            fire: std::mem::take(&mut self.fire_pending),
        }
    }

    /// Drop everything (on restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
