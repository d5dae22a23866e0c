use serde::Serialize;

use crate::config::scoring::MAX_MULTIPLIER;

/// Combo multiplier as the game tracks it.
///
/// The value steps through 1, 2, 4 and 8. At tier `value` the player needs
/// `value * 2` consecutive hits to reach the next tier; any combo break drops
/// one tier and restarts progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Multiplier {
    value: u8,
    progress: u8,
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplier {
    pub fn new() -> Self {
        Self {
            value: 1,
            progress: 1,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn reset(&mut self) -> u8 {
        *self = Self::new();
        self.value
    }

    /// Register a successful hit. Returns the new value.
    pub fn increment(&mut self) -> u8 {
        if self.value >= MAX_MULTIPLIER {
            return self.value;
        }

        if self.progress + 1 >= self.value * 2 {
            self.value *= 2;
            self.progress = 0;
        } else {
            self.progress += 1;
        }
        self.value
    }

    /// Register a combo break. Returns the new value.
    pub fn decrement(&mut self) -> u8 {
        if self.value > 1 {
            self.value /= 2;
        }
        self.progress = 1;
        self.value
    }
}
