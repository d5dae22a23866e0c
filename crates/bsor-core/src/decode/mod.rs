//! BSOR decoder.
//!
//! A replay starts with a 5-byte header (magic + version) followed by a
//! sequence of `(tag, payload)` parts until the input ends:
//!
//! | tag | part    | payload                                  |
//! |-----|---------|------------------------------------------|
//! | 0   | Info    | strings and fixed-width metadata fields  |
//! | 1   | Frames  | u32 count + fixed-size pose records      |
//! | 2   | Notes   | u32 count + notes (cut info if Good/Bad) |
//! | 3   | Walls   | u32 count + wall hits                    |
//! | 4   | Heights | u32 count + (height, time)               |
//! | 5   | Pauses  | u32 count + (duration, time)             |
//!
//! All integers are little-endian. Ending exactly at a part boundary is the
//! normal way for a replay to end.

mod parts;
mod string;

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::DecodeConfig;
use crate::error::{BSOR_MAGIC, Error, Result};
use crate::replay::{Header, PartTag, Replay};
use crate::source::{ByteBuffer, ReadBytes, StreamSource};

/// Only supported format version.
pub const BSOR_VERSION: u8 = 1;

pub struct Decoder<R> {
    source: R,
    config: DecodeConfig,
}

impl<R: ReadBytes> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_config(source, DecodeConfig::default())
    }

    pub fn with_config(source: R, config: DecodeConfig) -> Self {
        Self { source, config }
    }

    /// Decode the whole input into a [`Replay`].
    pub fn decode(mut self) -> Result<Replay> {
        let header = self.read_header()?;
        let mut replay = Replay {
            header,
            ..Default::default()
        };

        loop {
            let offset = self.source.position();
            let Some(raw_tag) = self.source.read_u8_or_eof()? else {
                break;
            };
            let tag = PartTag::from_u8(raw_tag).ok_or(Error::UnknownPart {
                tag: raw_tag,
                offset,
            })?;
            self.read_part(tag, &mut replay)?;
        }

        debug!(
            "Decoded replay: {} frames, {} notes, {} walls, {} heights, {} pauses",
            replay.frames.len(),
            replay.notes.len(),
            replay.walls.len(),
            replay.heights.len(),
            replay.pauses.len()
        );
        Ok(replay)
    }

    fn read_header(&mut self) -> Result<Header> {
        let magic = self.source.read_u32()?;
        if magic != BSOR_MAGIC {
            return Err(Error::NotBsorFormat { magic });
        }

        let version = self.source.read_u8()?;
        if version != BSOR_VERSION {
            return Err(Error::UnknownVersion(version));
        }

        Ok(Header { magic, version })
    }

    fn read_part(&mut self, tag: PartTag, replay: &mut Replay) -> Result<()> {
        let source = &mut self.source;
        let count = match tag {
            PartTag::Info => {
                replay.info = parts::read_info(source, &self.config)?;
                1
            }
            PartTag::Frames => {
                let frames = parts::read_array(source, parts::read_frame)?;
                extend(&mut replay.frames, frames)
            }
            PartTag::Notes => {
                let notes = parts::read_array(source, parts::read_note)?;
                extend(&mut replay.notes, notes)
            }
            PartTag::Walls => {
                let walls = parts::read_array(source, parts::read_wall)?;
                extend(&mut replay.walls, walls)
            }
            PartTag::Heights => {
                let heights = parts::read_array(source, parts::read_height)?;
                extend(&mut replay.heights, heights)
            }
            PartTag::Pauses => {
                let pauses = parts::read_array(source, parts::read_pause)?;
                extend(&mut replay.pauses, pauses)
            }
        };
        debug!("Read part {} ({} records)", tag, count);
        Ok(())
    }
}

/// Append a part's records; a part may appear more than once.
fn extend<T>(target: &mut Vec<T>, items: Vec<T>) -> usize {
    let count = items.len();
    target.extend(items);
    count
}

/// Decode a replay held in memory.
pub fn decode_bytes(data: &[u8]) -> Result<Replay> {
    Decoder::new(ByteBuffer::new(data)).decode()
}

/// Decode a replay from a forward-only reader.
///
/// Corrupted names are recovered with the sliding-window heuristic only; use
/// [`decode_bytes`] when the data is already in memory.
pub fn decode_reader<R: Read>(reader: R) -> Result<Replay> {
    Decoder::new(StreamSource::new(reader)).decode()
}

/// Read a replay file fully into memory and decode it.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Replay> {
    let data = fs::read(path)?;
    decode_bytes(&data)
}
