//! Decoded replay data.
//!
//! Plain data produced by the decoder:
//! - `Header`, `Info` - file header and play metadata
//! - `Frame` - head and hand poses over time
//! - `Note`, `WallHit` - raw gameplay records with their packed ids unpacked
//! - `AutomaticHeight`, `Pause` - timed value records

mod enums;
mod types;

pub use enums::*;
pub use types::*;
