//! Synthetic replay images for tests.
//!
//! Provides a fluent builder that writes BSOR parts into an in-memory buffer.
//! Only meant for tests; it is not a supported encoder.

use crate::error::BSOR_MAGIC;
use crate::replay::{AutomaticHeight, CutInfo, Frame, Info, Pause, PartTag, Pose, Vector3};

/// Note record as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockNote {
    /// Packed note id.
    pub id: u32,
    pub event_time: f32,
    pub spawn_time: f32,
    /// Raw event type; values outside 0..=3 are written as-is.
    pub event_type: i32,
    pub cut_info: Option<CutInfo>,
}

impl MockNote {
    /// Good cut with the given swing ratings and distance to center.
    pub fn good(id: u32, time: f32, before: f32, after: f32, distance: f32) -> Self {
        Self {
            id,
            event_time: time,
            spawn_time: time - 1.0,
            event_type: 0,
            cut_info: Some(CutInfo {
                speed_ok: true,
                direction_ok: true,
                saber_type_ok: true,
                before_cut_rating: before,
                after_cut_rating: after,
                cut_distance_to_center: distance,
                ..Default::default()
            }),
        }
    }

    pub fn perfect(id: u32, time: f32) -> Self {
        Self::good(id, time, 1.0, 1.0, 0.0)
    }

    pub fn bad(id: u32, time: f32) -> Self {
        Self {
            id,
            event_time: time,
            spawn_time: time - 1.0,
            event_type: 1,
            cut_info: Some(CutInfo {
                saber_type_ok: false,
                ..Default::default()
            }),
        }
    }

    pub fn miss(id: u32, time: f32) -> Self {
        Self {
            id,
            event_time: time,
            spawn_time: time - 1.0,
            event_type: 2,
            cut_info: None,
        }
    }

    pub fn bomb(id: u32, time: f32) -> Self {
        Self {
            id,
            event_time: time,
            spawn_time: time - 1.0,
            event_type: 3,
            cut_info: None,
        }
    }
}

/// Builder for BSOR byte images.
#[derive(Debug, Clone, Default)]
pub struct MockReplayBuilder {
    data: Vec<u8>,
}

impl MockReplayBuilder {
    /// Start a replay with a valid header.
    pub fn new() -> Self {
        Self::empty().header(BSOR_MAGIC, 1)
    }

    /// Start with no bytes at all.
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }

    pub fn header(self, magic: u32, version: u8) -> Self {
        self.write_u32(magic).write_u8(version)
    }

    /// Append raw bytes.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(mut self, value: u8) -> Self {
        self.data.push(value);
        self
    }

    pub fn write_bool(self, value: bool) -> Self {
        self.write_u8(u8::from(value))
    }

    pub fn write_u32(self, value: u32) -> Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn write_i32(self, value: i32) -> Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn write_i64(self, value: i64) -> Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn write_f32(self, value: f32) -> Self {
        self.raw(&value.to_le_bytes())
    }

    /// Length-prefixed UTF-8 string.
    pub fn write_string(self, value: &str) -> Self {
        self.write_string_with_length(value, value.len() as u32)
    }

    /// String whose length prefix claims `length` bytes regardless of its content.
    pub fn write_string_with_length(self, value: &str, length: u32) -> Self {
        self.write_u32(length).raw(value.as_bytes())
    }

    fn tag(self, tag: PartTag) -> Self {
        self.write_u8(tag as u8)
    }

    /// Info part.
    pub fn info(self, info: &Info) -> Self {
        self.info_with_name_length(info, info.player_name.len() as u32)
    }

    /// Info part whose player name carries the given length prefix.
    pub fn info_with_name_length(self, info: &Info, name_length: u32) -> Self {
        let mut raw_name = name_length.to_le_bytes().to_vec();
        raw_name.extend_from_slice(info.player_name.as_bytes());
        self.info_with_raw_name(info, &raw_name)
    }

    /// Info part with `raw_name` written verbatim (length prefix included) as the player name.
    pub fn info_with_raw_name(self, info: &Info, raw_name: &[u8]) -> Self {
        self.tag(PartTag::Info)
            .write_string(&info.mod_version)
            .write_string(&info.game_version)
            .write_string(&info.timestamp.to_string())
            .write_string(&info.player_id)
            .raw(raw_name)
            .write_string(&info.platform)
            .write_string(&info.tracking_system)
            .write_string(&info.hmd)
            .write_string(&info.controller)
            .write_string(&info.hash)
            .write_string(&info.song_name)
            .write_string(&info.mapper)
            .write_string(&info.difficulty)
            .write_i32(info.score)
            .write_string(&info.mode)
            .write_string(&info.environment)
            .write_string(&info.modifiers)
            .write_f32(info.jump_distance)
            .write_bool(info.left_handed)
            .write_f32(info.height)
            .write_f32(info.start_time)
            .write_f32(info.fail_time)
            .write_f32(info.speed)
    }

    pub fn frames(self, frames: &[Frame]) -> Self {
        frames
            .iter()
            .fold(self.tag(PartTag::Frames).write_u32(frames.len() as u32), |b, f| {
                b.write_f32(f.time)
                    .write_i32(f.fps)
                    .pose(&f.head)
                    .pose(&f.left_hand)
                    .pose(&f.right_hand)
            })
    }

    pub fn notes(self, notes: &[MockNote]) -> Self {
        notes
            .iter()
            .fold(self.tag(PartTag::Notes).write_u32(notes.len() as u32), |b, n| {
                let b = b
                    .write_u32(n.id)
                    .write_f32(n.event_time)
                    .write_f32(n.spawn_time)
                    .write_i32(n.event_type);
                match &n.cut_info {
                    Some(cut) => b.cut_info(cut),
                    None => b,
                }
            })
    }

    /// Walls part from `(packed id, energy, time, spawn time)` tuples.
    pub fn walls(self, walls: &[(u32, f32, f32, f32)]) -> Self {
        walls.iter().fold(
            self.tag(PartTag::Walls).write_u32(walls.len() as u32),
            |b, &(id, energy, time, spawn_time)| {
                b.write_u32(id)
                    .write_f32(energy)
                    .write_f32(time)
                    .write_f32(spawn_time)
            },
        )
    }

    pub fn heights(self, heights: &[AutomaticHeight]) -> Self {
        heights
            .iter()
            .fold(self.tag(PartTag::Heights).write_u32(heights.len() as u32), |b, h| {
                b.write_f32(h.height).write_f32(h.time)
            })
    }

    pub fn pauses(self, pauses: &[Pause]) -> Self {
        pauses
            .iter()
            .fold(self.tag(PartTag::Pauses).write_u32(pauses.len() as u32), |b, p| {
                b.write_i64(p.duration).write_f32(p.time)
            })
    }

    fn vector3(self, v: &Vector3) -> Self {
        self.write_f32(v.x).write_f32(v.y).write_f32(v.z)
    }

    fn pose(self, pose: &Pose) -> Self {
        let r = pose.rotation;
        self.vector3(&pose.position)
            .write_f32(r.x)
            .write_f32(r.y)
            .write_f32(r.z)
            .write_f32(r.w)
    }

    fn cut_info(self, cut: &CutInfo) -> Self {
        self.write_bool(cut.speed_ok)
            .write_bool(cut.direction_ok)
            .write_bool(cut.saber_type_ok)
            .write_bool(cut.was_cut_too_soon)
            .write_f32(cut.saber_speed)
            .vector3(&cut.saber_direction)
            .write_i32(cut.saber_type)
            .write_f32(cut.time_deviation)
            .write_f32(cut.cut_direction_deviation)
            .vector3(&cut.cut_point)
            .vector3(&cut.cut_normal)
            .write_f32(cut.cut_distance_to_center)
            .write_f32(cut.cut_angle)
            .write_f32(cut.before_cut_rating)
            .write_f32(cut.after_cut_rating)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
