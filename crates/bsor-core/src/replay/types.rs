use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::BSOR_MAGIC;
use crate::replay::{ColorType, NoteEventType, ScoringType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub magic: u32,
    pub version: u8,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: BSOR_MAGIC,
            version: 1,
        }
    }
}

/// Per-play metadata recorded once at the start of the replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub mod_version: String,
    pub game_version: String,
    /// Unix timestamp (seconds) of the play.
    pub timestamp: i64,
    pub player_id: String,
    pub player_name: String,
    pub platform: String,
    pub tracking_system: String,
    pub hmd: String,
    pub controller: String,
    pub hash: String,
    pub song_name: String,
    pub mapper: String,
    pub difficulty: String,
    /// Score the game reported at the end of the play.
    pub score: i32,
    pub mode: String,
    pub environment: String,
    /// Comma-separated modifier codes.
    pub modifiers: String,
    pub jump_distance: f32,
    pub left_handed: bool,
    pub height: f32,
    pub start_time: f32,
    pub fail_time: f32,
    pub speed: f32,
}

impl Info {
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0)
    }

    pub fn modifier_list(&self) -> impl Iterator<Item = &str> {
        self.modifiers
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// True if the play ended in a fail.
    pub fn failed(&self) -> bool {
        self.fail_time > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vector3,
    pub rotation: Quaternion,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub time: f32,
    pub fps: i32,
    pub head: Pose,
    pub left_hand: Pose,
    pub right_hand: Pose,
}

/// Digits of a packed note id: `scoring * 10000 + line * 1000 + layer * 100 + color * 10 + direction`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteId {
    pub scoring_type: u32,
    pub line_index: u8,
    pub line_layer: u8,
    pub color_type: u8,
    pub cut_direction: u8,
}

impl NoteId {
    pub fn from_packed(id: u32) -> Self {
        let scoring_type = id / 10000;
        let rest = id % 10000;
        let line_index = rest / 1000;
        let rest = rest % 1000;
        let line_layer = rest / 100;
        let rest = rest % 100;
        let color_type = rest / 10;
        let cut_direction = rest % 10;

        // Every value below scoring_type is a single decimal digit.
        Self {
            scoring_type,
            line_index: line_index as u8,
            line_layer: line_layer as u8,
            color_type: color_type as u8,
            cut_direction: cut_direction as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutInfo {
    pub speed_ok: bool,
    pub direction_ok: bool,
    pub saber_type_ok: bool,
    pub was_cut_too_soon: bool,
    pub saber_speed: f32,
    pub saber_direction: Vector3,
    pub saber_type: i32,
    pub time_deviation: f32,
    pub cut_direction_deviation: f32,
    pub cut_point: Vector3,
    pub cut_normal: Vector3,
    pub cut_distance_to_center: f32,
    pub cut_angle: f32,
    pub before_cut_rating: f32,
    pub after_cut_rating: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub scoring_type: ScoringType,
    pub color: ColorType,
    pub event_time: f32,
    pub spawn_time: f32,
    pub event_type: NoteEventType,
    /// Present only for Good and Bad records.
    pub cut_info: Option<CutInfo>,
}

impl Note {
    pub fn line_index(&self) -> u8 {
        self.id.line_index
    }

    pub fn line_layer(&self) -> u8 {
        self.id.line_layer
    }

    pub fn cut_direction(&self) -> u8 {
        self.id.cut_direction
    }
}

/// Digits of a packed wall id: `line * 100 + type * 10 + width`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallId {
    pub line_index: u32,
    pub obstacle_type: u8,
    pub width: u8,
}

impl WallId {
    pub fn from_packed(id: u32) -> Self {
        Self {
            line_index: id / 100,
            obstacle_type: ((id % 100) / 10) as u8,
            width: (id % 10) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallHit {
    pub id: WallId,
    pub energy: f32,
    pub time: f32,
    pub spawn_time: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AutomaticHeight {
    pub height: f32,
    pub time: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Pause {
    /// Pause length in game ticks as recorded.
    pub duration: i64,
    pub time: f32,
}

/// A fully decoded replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Replay {
    pub header: Header,
    pub info: Info,
    pub frames: Vec<Frame>,
    pub notes: Vec<Note>,
    pub walls: Vec<WallHit>,
    pub heights: Vec<AutomaticHeight>,
    pub pauses: Vec<Pause>,
}

impl Replay {
    /// Time of the last recorded frame, or 0 without frames.
    pub fn end_time(&self) -> f32 {
        self.frames.last().map_or(0.0, |f| f.time)
    }
}
