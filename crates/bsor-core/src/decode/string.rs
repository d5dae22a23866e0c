//! Recovering reader for free-text fields.
//!
//! Some recorder versions wrote a wrong length prefix for player, song and
//! mapper names. Every such field is followed by another length-prefixed
//! string, so a length can be checked by looking at what comes after it:
//!
//! 1. Probe (peekable sources only): assume the claimed length, peek the
//!    following u32 and accept once it is a plausible length, otherwise grow
//!    the assumed length one byte at a time.
//! 2. Slide: shift the 4-byte length window forward one byte at a time until
//!    it holds a plausible length.
//!
//! Both steps are bounded by `DecodeConfig::max_resync_steps`.

use tracing::{debug, warn};

use crate::config::DecodeConfig;
use crate::error::{Error, Result};
use crate::source::ReadBytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// Peek the u32 found `length` bytes ahead.
    Check { length: u32, attempts: u32 },
    Found(u32),
    Abandon,
}

impl Probe {
    fn step<R: ReadBytes + ?Sized>(self, source: &R, config: &DecodeConfig) -> Self {
        match self {
            Probe::Check { length, attempts } => {
                if !config.is_plausible_length(length) {
                    return Probe::Abandon;
                }
                match source.peek_u32_at(length as usize) {
                    None => Probe::Abandon,
                    Some(next) if config.is_plausible_length(next) => Probe::Found(length),
                    Some(_) if attempts >= config.max_resync_steps => Probe::Abandon,
                    Some(_) => Probe::Check {
                        length: length + 1,
                        attempts: attempts + 1,
                    },
                }
            }
            done => done,
        }
    }
}

/// Find the real length of a string whose claimed length is `claimed`, by
/// looking ahead for the next field's length prefix.
fn probe_length<R: ReadBytes + ?Sized>(
    source: &R,
    claimed: u32,
    config: &DecodeConfig,
) -> Option<u32> {
    let mut state = Probe::Check {
        length: claimed,
        attempts: 0,
    };
    loop {
        match state.step(source, config) {
            Probe::Found(length) => return Some(length),
            Probe::Abandon => return None,
            next => state = next,
        }
    }
}

/// Slide the length window forward one byte at a time until it holds a plausible length.
fn slide_length<R: ReadBytes + ?Sized>(
    source: &mut R,
    mut window: [u8; 4],
    config: &DecodeConfig,
    field: &'static str,
) -> Result<u32> {
    let start = source.position();
    let mut steps = 0;
    let mut length = u32::from_le_bytes(window);

    while !config.is_plausible_length(length) {
        if steps >= config.max_resync_steps {
            return Err(Error::StringResync {
                field,
                offset: start,
                steps,
            });
        }
        let next = source.read_u8()?;
        window = [window[1], window[2], window[3], next];
        length = u32::from_le_bytes(window);
        steps += 1;
    }

    if steps > 0 {
        debug!(
            "Resynchronized '{}' after skipping {} bytes (length {})",
            field, steps, length
        );
    }
    Ok(length)
}

/// Read a length-prefixed string that may carry a corrupted length.
pub(crate) fn read_recovering_string<R: ReadBytes + ?Sized>(
    source: &mut R,
    config: &DecodeConfig,
    field: &'static str,
) -> Result<String> {
    let window: [u8; 4] = source.read_array()?;
    let claimed = u32::from_le_bytes(window);

    let length = match probe_length(source, claimed, config) {
        Some(length) => {
            if length != claimed {
                warn!(
                    "Field '{}' claimed length {} but the next field starts after {} bytes",
                    field, claimed, length
                );
            }
            length
        }
        None => {
            if !config.is_plausible_length(claimed) {
                warn!(
                    "Field '{}' has implausible length {}, resynchronizing",
                    field, claimed
                );
            }
            slide_length(source, window, config, field)?
        }
    };

    let bytes = source.read_vec(length as usize)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
