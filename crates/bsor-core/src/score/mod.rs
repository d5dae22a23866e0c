//! Event reconstruction and score replay.
//!
//! Raw note and wall records are turned into typed [`GameEvent`]s, replayed in
//! chronological order through the game's multiplier rules, and collected into
//! [`ReplayEvents`] with running accuracy and combo values.

mod cut;
mod events;
mod history;
mod multiplier;
mod replay_events;
mod simulator;

pub use cut::{CutScore, NoteRating, max_note_score};
pub use events::{
    BadCut, BombHit, DuplicatePolicy, GameEvent, GoodCut, MissedNote, NoteEvent, ReplayMark,
    WallHitEvent, reconstruct_events,
};
pub use history::ScoreHistory;
pub use multiplier::Multiplier;
pub use replay_events::{ReplayEvents, ReplayEventsInfo};
pub use simulator::{ReplayOutcome, ScoreSimulator, percent, simulate};
