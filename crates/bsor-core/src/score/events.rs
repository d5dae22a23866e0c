//! Typed gameplay events reconstructed from raw notes and walls.

use std::cmp::Ordering;

use serde::Serialize;

use crate::replay::{ColorType, Note, NoteEventType, Replay, ScoringType, WallHit};
use crate::score::cut::{CutScore, NoteRating, max_note_score};

/// Values filled in while the score is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayMark {
    /// Multiplier in effect when the event happened.
    pub multiplier: u8,
    /// Running accuracy after the event (percent).
    pub accuracy: f64,
    /// Running full-combo accuracy after the event (percent).
    pub fc_accuracy: f64,
}

impl Default for ReplayMark {
    fn default() -> Self {
        Self {
            multiplier: 1,
            accuracy: 0.0,
            fc_accuracy: 0.0,
        }
    }
}

/// Fields shared by every note-derived event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    /// Position of the note record in the replay.
    pub index: u32,
    pub event_type: NoteEventType,
    pub scoring_type: ScoringType,
    pub line_index: u8,
    pub line_layer: u8,
    pub color: ColorType,
    pub cut_direction: u8,
    pub event_time: f32,
    #[serde(flatten)]
    pub mark: ReplayMark,
}

impl NoteEvent {
    fn new(index: u32, note: &Note) -> Self {
        Self {
            index,
            event_type: note.event_type,
            scoring_type: note.scoring_type,
            line_index: note.line_index(),
            line_layer: note.line_layer(),
            color: note.color,
            cut_direction: note.cut_direction(),
            event_time: note.event_time,
            mark: ReplayMark::default(),
        }
    }

    /// Whether `other` records the same note outcome at the same time.
    pub fn is_same_event(&self, other: &NoteEvent) -> bool {
        self.event_type == other.event_type
            && self.scoring_type == other.scoring_type
            && self.line_index == other.line_index
            && self.line_layer == other.line_layer
            && self.color == other.color
            && self.cut_direction == other.cut_direction
            && self.event_time == other.event_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodCut {
    #[serde(flatten)]
    pub note: NoteEvent,
    pub predicted_score: i32,
    pub time_dependence: f64,
    #[serde(flatten)]
    pub rating: NoteRating,
    #[serde(flatten)]
    pub score: CutScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadCut {
    #[serde(flatten)]
    pub note: NoteEvent,
    pub predicted_score: i32,
    pub time_dependence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedNote {
    #[serde(flatten)]
    pub note: NoteEvent,
    pub predicted_score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BombHit {
    #[serde(flatten)]
    pub note: NoteEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WallHitEvent {
    pub index: u32,
    #[serde(flatten)]
    pub wall: WallHit,
    #[serde(flatten)]
    pub mark: ReplayMark,
}

/// A gameplay event in the order-independent form used for score replay.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Hit(GoodCut),
    BadCut(BadCut),
    Miss(MissedNote),
    Bomb(BombHit),
    Wall(WallHitEvent),
}

impl GameEvent {
    fn from_note(index: u32, note: &Note) -> Self {
        let base = NoteEvent::new(index, note);
        let time_dependence = note
            .cut_info
            .map_or(0.0, |cut| f64::from(cut.cut_normal.z.abs()));

        match note.event_type {
            NoteEventType::Good => {
                let rating = note.cut_info.as_ref().map(NoteRating::from).unwrap_or_default();
                GameEvent::Hit(GoodCut {
                    score: CutScore::new(note.scoring_type, &rating),
                    note: base,
                    predicted_score: 0,
                    time_dependence,
                    rating,
                })
            }
            NoteEventType::Bad => GameEvent::BadCut(BadCut {
                note: base,
                predicted_score: 0,
                time_dependence,
            }),
            NoteEventType::Miss => GameEvent::Miss(MissedNote {
                note: base,
                predicted_score: 0,
            }),
            NoteEventType::Bomb => GameEvent::Bomb(BombHit { note: base }),
        }
    }

    fn note_event(&self) -> Option<&NoteEvent> {
        match self {
            GameEvent::Hit(e) => Some(&e.note),
            GameEvent::BadCut(e) => Some(&e.note),
            GameEvent::Miss(e) => Some(&e.note),
            GameEvent::Bomb(e) => Some(&e.note),
            GameEvent::Wall(_) => None,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            GameEvent::Wall(e) => e.index,
            _ => self.note_event().map_or(0, |n| n.index),
        }
    }

    pub fn time(&self) -> f32 {
        match self {
            GameEvent::Wall(e) => e.wall.time,
            _ => self.note_event().map_or(0.0, |n| n.event_time),
        }
    }

    pub fn color(&self) -> ColorType {
        self.note_event().map_or(ColorType::NoColor, |n| n.color)
    }

    /// Score awarded before the multiplier is applied.
    pub fn score(&self) -> i32 {
        match self {
            GameEvent::Hit(e) => e.score.total(),
            _ => 0,
        }
    }

    /// Best score this event could have awarded before the multiplier.
    pub fn max_score(&self) -> i32 {
        match self {
            GameEvent::Wall(_) => 0,
            _ => self
                .note_event()
                .map_or(0, |n| max_note_score(n.scoring_type)),
        }
    }

    /// Everything except a clean hit breaks the combo.
    pub fn decreases_combo(&self) -> bool {
        !matches!(self, GameEvent::Hit(_))
    }

    /// Events that carry a predicted full-combo score.
    pub fn is_note(&self) -> bool {
        matches!(
            self,
            GameEvent::Hit(_) | GameEvent::BadCut(_) | GameEvent::Miss(_)
        )
    }

    pub fn mark(&self) -> &ReplayMark {
        match self {
            GameEvent::Hit(e) => &e.note.mark,
            GameEvent::BadCut(e) => &e.note.mark,
            GameEvent::Miss(e) => &e.note.mark,
            GameEvent::Bomb(e) => &e.note.mark,
            GameEvent::Wall(e) => &e.mark,
        }
    }

    pub(crate) fn mark_mut(&mut self) -> &mut ReplayMark {
        match self {
            GameEvent::Hit(e) => &mut e.note.mark,
            GameEvent::BadCut(e) => &mut e.note.mark,
            GameEvent::Miss(e) => &mut e.note.mark,
            GameEvent::Bomb(e) => &mut e.note.mark,
            GameEvent::Wall(e) => &mut e.mark,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.mark().accuracy
    }

    pub fn fc_accuracy(&self) -> f64 {
        self.mark().fc_accuracy
    }

    pub fn predicted_score(&self) -> Option<i32> {
        match self {
            GameEvent::Hit(e) => Some(e.predicted_score),
            GameEvent::BadCut(e) => Some(e.predicted_score),
            GameEvent::Miss(e) => Some(e.predicted_score),
            GameEvent::Bomb(_) | GameEvent::Wall(_) => None,
        }
    }

    pub(crate) fn set_predicted_score(&mut self, score: i32) {
        match self {
            GameEvent::Hit(e) => e.predicted_score = score,
            GameEvent::BadCut(e) => e.predicted_score = score,
            GameEvent::Miss(e) => e.predicted_score = score,
            GameEvent::Bomb(_) | GameEvent::Wall(_) => {}
        }
    }

    /// Replay order: time, then original index.
    pub fn chronological(&self, other: &GameEvent) -> Ordering {
        self.time()
            .total_cmp(&other.time())
            .then_with(|| self.index().cmp(&other.index()))
    }
}

/// How consecutive identical note records are treated during reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Keep,
    /// Drop a note record identical to the previous accepted record of the same outcome.
    Suppress,
}

/// Build the typed event list in emission order: notes first, then walls.
pub fn reconstruct_events(replay: &Replay, policy: DuplicatePolicy) -> Vec<GameEvent> {
    let mut events = Vec::with_capacity(replay.notes.len() + replay.walls.len());
    let mut last_accepted: [Option<NoteEvent>; 4] = Default::default();

    for (index, note) in replay.notes.iter().enumerate() {
        let event = GameEvent::from_note(index as u32, note);
        let slot = &mut last_accepted[note.event_type as usize];

        let duplicate = match (policy, slot.as_ref(), event.note_event()) {
            (DuplicatePolicy::Suppress, Some(previous), Some(current)) => {
                previous.is_same_event(current)
            }
            _ => false,
        };
        if duplicate {
            continue;
        }

        *slot = event.note_event().cloned();
        events.push(event);
    }

    let first_wall_index = events.len() as u32;
    events.extend(
        replay
            .walls
            .iter()
            .enumerate()
            .map(|(i, wall)| {
                GameEvent::Wall(WallHitEvent {
                    index: first_wall_index + i as u32,
                    wall: *wall,
                    mark: ReplayMark::default(),
                })
            }),
    );

    events
}
