//! Decoder configuration and scoring constants.
//!
//! - `limits` - bounds used while decoding untrusted input
//! - `scoring` - fixed values of the game's scoring rules
//! - `grid` - note grid dimensions for statistics
//! - `DecodeConfig` - tunable decoder limits (deserializable from a config file)

use serde::{Deserialize, Serialize};

/// Bounds applied while decoding.
pub mod limits {
    /// Longest string length accepted as plausible by the recovering string reader.
    pub const MAX_STRING_LENGTH: u32 = 1000;

    /// Maximum number of single-byte shifts or length probes while resynchronizing a string.
    pub const MAX_RESYNC_STEPS: u32 = 1024;

    /// Upper bound on up-front allocation for a declared record count.
    ///
    /// Counts come straight from the file, so larger sections grow on demand.
    pub const PREALLOC_LIMIT: usize = 1 << 16;
}

/// Scoring rule constants.
pub mod scoring {
    /// Best possible score of a regular block (70 + 30 + 15).
    pub const BLOCK_MAX_VALUE: i32 = 115;

    /// Best possible score of a burst slider head (70 + 15).
    pub const BURST_SLIDER_HEAD_MAX_VALUE: i32 = 85;

    /// Fixed score of a burst slider element.
    pub const BURST_SLIDER_ELEMENT_VALUE: i32 = 20;

    pub const BEFORE_CUT_MAX: f64 = 70.0;
    pub const AFTER_CUT_MAX: f64 = 30.0;
    pub const ACC_CUT_MAX: f64 = 15.0;

    /// Cut distance (in note units) at which the accuracy component drops to zero.
    pub const ACC_CUT_RANGE: f64 = 0.3;

    /// Highest multiplier tier.
    pub const MAX_MULTIPLIER: u8 = 8;

    /// Number of recent hit scores kept per hand for full-combo estimation.
    pub const FC_HISTORY_SIZE: usize = 10;
}

/// Dimensions of the note grid used for statistics.
pub mod grid {
    pub const LINES_COUNT: usize = 4;
    pub const LAYERS_COUNT: usize = 3;
    pub const CUT_DIRECTIONS_COUNT: usize = 9;
    pub const BLOCK_POSITIONS_COUNT: usize = LINES_COUNT * LAYERS_COUNT;
    pub const POSITIONS_AND_DIRECTIONS_COUNT: usize = BLOCK_POSITIONS_COUNT * CUT_DIRECTIONS_COUNT;
}

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Longest string length treated as plausible for recoverable text fields.
    pub max_string_length: u32,
    /// Upper bound on resynchronization steps before giving up on a string.
    pub max_resync_steps: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_string_length: limits::MAX_STRING_LENGTH,
            max_resync_steps: limits::MAX_RESYNC_STEPS,
        }
    }
}

impl DecodeConfig {
    /// Whether a raw length prefix could belong to a real string.
    pub fn is_plausible_length(&self, length: u32) -> bool {
        length <= self.max_string_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_max_value() {
        assert_eq!(
            scoring::BLOCK_MAX_VALUE as f64,
            scoring::BEFORE_CUT_MAX + scoring::AFTER_CUT_MAX + scoring::ACC_CUT_MAX
        );
        assert_eq!(
            scoring::BURST_SLIDER_HEAD_MAX_VALUE as f64,
            scoring::BEFORE_CUT_MAX + scoring::ACC_CUT_MAX
        );
    }

    #[test]
    fn test_plausible_length() {
        let config = DecodeConfig::default();
        assert!(config.is_plausible_length(0));
        assert!(config.is_plausible_length(1000));
        assert!(!config.is_plausible_length(1001));
        // Negative when reinterpreted as i32
        assert!(!config.is_plausible_length(0xFFFF_FFFF));
    }

    #[test]
    fn test_default_limits() {
        let config = DecodeConfig::default();
        assert_eq!(config.max_string_length, limits::MAX_STRING_LENGTH);
        assert_eq!(config.max_resync_steps, limits::MAX_RESYNC_STEPS);
    }
}
