//! Decoder and score replay for BSOR replay files.
//!
//! The pipeline runs one way:
//!
//! 1. [`decode`] turns bytes into a [`Replay`].
//! 2. [`ReplayEvents::from_replay`] rebuilds typed gameplay events and replays
//!    the scoring rules over them.
//! 3. [`ReplayStats::from_events`] aggregates the events per hand and grid cell.
//!
//! ```no_run
//! use bsor_core::{ReplayEvents, ReplayStats, decode_file};
//!
//! let replay = decode_file("play.bsor")?;
//! let events = ReplayEvents::from_replay(&replay);
//! let stats = ReplayStats::from_events(&events);
//! println!("{:.2}% ({} notes)", events.info.accuracy, stats.stats.total.notes);
//! # Ok::<(), bsor_core::Error>(())
//! ```

pub mod config;
pub mod decode;
pub mod error;
#[doc(hidden)]
pub mod mock;
pub mod replay;
pub mod score;
pub mod source;
pub mod stats;

pub use config::DecodeConfig;
pub use decode::{Decoder, decode_bytes, decode_file, decode_reader};
pub use error::{Error, ErrorKind, Result};
pub use replay::{
    ColorType, Frame, Hand, Header, Info, Note, NoteEventType, Pause, Replay, ScoringType, WallHit,
};
pub use score::{DuplicatePolicy, GameEvent, ReplayEvents, ReplayEventsInfo};
pub use source::{ByteBuffer, ReadBytes, StreamSource};
pub use stats::{HandStats, ReplayStats, ReplayStatsInfo};
