//! Payload readers for each replay part.

use crate::config::DecodeConfig;
use crate::config::limits::PREALLOC_LIMIT;
use crate::decode::string::read_recovering_string;
use crate::error::{Error, Result};
use crate::replay::{
    AutomaticHeight, ColorType, CutInfo, Frame, Info, Note, NoteEventType, NoteId, Pause, Pose,
    Quaternion, ScoringType, Vector3, WallHit, WallId,
};
use crate::source::ReadBytes;

pub(crate) fn read_info<R: ReadBytes>(source: &mut R, config: &DecodeConfig) -> Result<Info> {
    let mod_version = source.read_string()?;
    let game_version = source.read_string()?;
    let timestamp_text = source.read_string()?;
    let timestamp = timestamp_text
        .parse::<i64>()
        .map_err(|e| Error::field("timestamp", format!("{:?}: {}", timestamp_text, e)))?;

    Ok(Info {
        mod_version,
        game_version,
        timestamp,
        player_id: source.read_string()?,
        player_name: read_recovering_string(source, config, "playerName")?,
        platform: source.read_string()?,
        tracking_system: source.read_string()?,
        hmd: source.read_string()?,
        controller: source.read_string()?,
        hash: source.read_string()?,
        song_name: read_recovering_string(source, config, "songName")?,
        mapper: read_recovering_string(source, config, "mapper")?,
        difficulty: source.read_string()?,
        score: source.read_i32()?,
        mode: source.read_string()?,
        environment: source.read_string()?,
        modifiers: source.read_string()?,
        jump_distance: source.read_f32()?,
        left_handed: source.read_bool()?,
        height: source.read_f32()?,
        start_time: source.read_f32()?,
        fail_time: source.read_f32()?,
        speed: source.read_f32()?,
    })
}

/// Read a u32 element count followed by that many records.
pub(crate) fn read_array<R, T, F>(source: &mut R, mut read_one: F) -> Result<Vec<T>>
where
    R: ReadBytes,
    F: FnMut(&mut R) -> Result<T>,
{
    let count = source.read_u32()? as usize;
    let mut items = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        items.push(read_one(source)?);
    }
    Ok(items)
}

fn read_vector3<R: ReadBytes>(source: &mut R) -> Result<Vector3> {
    Ok(Vector3 {
        x: source.read_f32()?,
        y: source.read_f32()?,
        z: source.read_f32()?,
    })
}

fn read_pose<R: ReadBytes>(source: &mut R) -> Result<Pose> {
    let position = read_vector3(source)?;
    let rotation = Quaternion {
        x: source.read_f32()?,
        y: source.read_f32()?,
        z: source.read_f32()?,
        w: source.read_f32()?,
    };
    Ok(Pose { position, rotation })
}

pub(crate) fn read_frame<R: ReadBytes>(source: &mut R) -> Result<Frame> {
    Ok(Frame {
        time: source.read_f32()?,
        fps: source.read_i32()?,
        head: read_pose(source)?,
        left_hand: read_pose(source)?,
        right_hand: read_pose(source)?,
    })
}

fn read_cut_info<R: ReadBytes>(source: &mut R) -> Result<CutInfo> {
    Ok(CutInfo {
        speed_ok: source.read_bool()?,
        direction_ok: source.read_bool()?,
        saber_type_ok: source.read_bool()?,
        was_cut_too_soon: source.read_bool()?,
        saber_speed: source.read_f32()?,
        saber_direction: read_vector3(source)?,
        saber_type: source.read_i32()?,
        time_deviation: source.read_f32()?,
        cut_direction_deviation: source.read_f32()?,
        cut_point: read_vector3(source)?,
        cut_normal: read_vector3(source)?,
        cut_distance_to_center: source.read_f32()?,
        cut_angle: source.read_f32()?,
        before_cut_rating: source.read_f32()?,
        after_cut_rating: source.read_f32()?,
    })
}

pub(crate) fn read_note<R: ReadBytes>(source: &mut R) -> Result<Note> {
    let id = NoteId::from_packed(source.read_u32()?);
    let event_time = source.read_f32()?;
    let spawn_time = source.read_f32()?;
    let raw_event_type = source.read_i32()?;
    let event_type = NoteEventType::from_i32(raw_event_type).ok_or_else(|| {
        Error::field("eventType", format!("unknown note event {}", raw_event_type))
    })?;

    let cut_info = if event_type.has_cut_info() {
        Some(read_cut_info(source)?)
    } else {
        None
    };

    Ok(Note {
        id,
        scoring_type: ScoringType::from_code(id.scoring_type),
        color: ColorType::from_code(id.color_type),
        event_time,
        spawn_time,
        event_type,
        cut_info,
    })
}

pub(crate) fn read_wall<R: ReadBytes>(source: &mut R) -> Result<WallHit> {
    Ok(WallHit {
        id: WallId::from_packed(source.read_u32()?),
        energy: source.read_f32()?,
        time: source.read_f32()?,
        spawn_time: source.read_f32()?,
    })
}

pub(crate) fn read_height<R: ReadBytes>(source: &mut R) -> Result<AutomaticHeight> {
    Ok(AutomaticHeight {
        height: source.read_f32()?,
        time: source.read_f32()?,
    })
}

pub(crate) fn read_pause<R: ReadBytes>(source: &mut R) -> Result<Pause> {
    Ok(Pause {
        duration: source.read_i64()?,
        time: source.read_f32()?,
    })
}
