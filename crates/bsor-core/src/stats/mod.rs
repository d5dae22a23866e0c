//! Per-hand statistics over a replayed event list.
//!
//! Hit scores and swing ratings are collected per hand (and combined) into
//! sample buffers, then summarized as min / avg / median / max. Scores are
//! also bucketed by grid position and cut direction for heatmaps.

mod buffer;
mod grid;

pub use buffer::{GridStats, SampleBuffer, Stats};
pub use grid::{BlockPosition, position_and_direction_index};

use serde::Serialize;
use tracing::debug;

use crate::config::grid::{
    BLOCK_POSITIONS_COUNT, CUT_DIRECTIONS_COUNT, POSITIONS_AND_DIRECTIONS_COUNT,
};
use crate::replay::{ColorType, Hand, Info};
use crate::score::{GoodCut, NoteEvent, ReplayEvents};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandStats {
    pub acc_cut: Stats<i32>,
    pub before_cut: Stats<i32>,
    pub after_cut: Stats<i32>,
    pub score: Stats<i32>,
    pub time_dependence: Stats<f64>,
    pub pre_swing: Stats<f64>,
    pub post_swing: Stats<f64>,
    pub position_grid: GridStats<i32>,
    pub direction_grid: GridStats<i32>,
    pub position_and_direction_grid: GridStats<i32>,
    pub notes: u32,
    pub misses: u32,
    pub bad_cuts: u32,
    pub bomb_hits: u32,
    pub max_combo: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HandStatsSet {
    pub left: HandStats,
    pub right: HandStats,
    pub total: HandStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStatsInfo {
    #[serde(flatten)]
    pub info: Info,
    pub end_time: f32,
    pub accuracy: f64,
    pub fc_accuracy: f64,
    pub calc_score: i32,
    pub wall_hits: u32,
    pub pauses: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayStats {
    pub info: ReplayStatsInfo,
    pub stats: HandStatsSet,
}

impl ReplayStats {
    pub fn from_events(events: &ReplayEvents) -> Self {
        let left_handed = events.info.info.left_handed;
        let mut buffers = HandBuffers::default();

        for hit in &events.hits {
            buffers.for_color(hit.note.color, left_handed, |buf| buf.add_hit(hit));
        }
        for miss in &events.misses {
            buffers.for_color(miss.note.color, left_handed, |buf| {
                buf.misses += 1;
                buf.count_note(&miss.note);
            });
        }
        for bad in &events.bad_cuts {
            buffers.for_color(bad.note.color, left_handed, |buf| {
                buf.bad_cuts += 1;
                buf.count_note(&bad.note);
            });
        }
        for bomb in &events.bomb_hits {
            buffers.for_color(bomb.note.color, left_handed, |buf| buf.bomb_hits += 1);
        }

        let mut stats = HandStatsSet {
            left: buffers.left.stats(),
            right: buffers.right.stats(),
            total: buffers.total.stats(),
        };
        stats.left.max_combo = events.info.max_left_combo;
        stats.right.max_combo = events.info.max_right_combo;
        stats.total.max_combo = events.info.max_combo;

        debug!(
            "Aggregated stats: {} notes ({} left, {} right)",
            stats.total.notes, stats.left.notes, stats.right.notes
        );

        ReplayStats {
            info: ReplayStatsInfo {
                info: events.info.info.clone(),
                end_time: events.info.end_time,
                accuracy: events.info.accuracy,
                fc_accuracy: events.info.fc_accuracy,
                calc_score: events.info.calc_score,
                wall_hits: events.walls.len() as u32,
                pauses: events.pauses.len() as u32,
            },
            stats,
        }
    }
}

#[derive(Debug, Default)]
struct HandBuffers {
    left: StatBuffer,
    right: StatBuffer,
    total: StatBuffer,
}

impl HandBuffers {
    /// Apply `f` to the hand owning `color` and to the combined buffer.
    fn for_color(&mut self, color: ColorType, left_handed: bool, mut f: impl FnMut(&mut StatBuffer)) {
        match color.hand(left_handed) {
            Some(Hand::Left) => f(&mut self.left),
            Some(Hand::Right) => f(&mut self.right),
            None => {}
        }
        f(&mut self.total);
    }
}

/// Accumulates samples for one hand (or both combined).
#[derive(Debug)]
struct StatBuffer {
    acc_cut: SampleBuffer<i32>,
    before_cut: SampleBuffer<i32>,
    after_cut: SampleBuffer<i32>,
    score: SampleBuffer<i32>,
    time_dependence: SampleBuffer<f64>,
    pre_swing: SampleBuffer<f64>,
    post_swing: SampleBuffer<f64>,
    position_grid: Vec<SampleBuffer<i32>>,
    direction_grid: Vec<SampleBuffer<i32>>,
    position_and_direction_grid: Vec<SampleBuffer<i32>>,
    notes: u32,
    misses: u32,
    bad_cuts: u32,
    bomb_hits: u32,
}

impl Default for StatBuffer {
    fn default() -> Self {
        Self {
            acc_cut: SampleBuffer::new(),
            before_cut: SampleBuffer::new(),
            after_cut: SampleBuffer::new(),
            score: SampleBuffer::new(),
            time_dependence: SampleBuffer::new(),
            pre_swing: SampleBuffer::new(),
            post_swing: SampleBuffer::new(),
            position_grid: vec![SampleBuffer::new(); BLOCK_POSITIONS_COUNT],
            direction_grid: vec![SampleBuffer::new(); CUT_DIRECTIONS_COUNT],
            position_and_direction_grid: vec![SampleBuffer::new(); POSITIONS_AND_DIRECTIONS_COUNT],
            notes: 0,
            misses: 0,
            bad_cuts: 0,
            bomb_hits: 0,
        }
    }
}

impl StatBuffer {
    fn count_note(&mut self, note: &NoteEvent) {
        if note.scoring_type.is_countable() {
            self.notes += 1;
        }
    }

    fn add_hit(&mut self, hit: &GoodCut) {
        self.count_note(&hit.note);

        let scoring_type = hit.note.scoring_type;
        let score = hit.score.total();

        if scoring_type.awards_before_cut() {
            self.before_cut.add(hit.score.before_cut);
            self.pre_swing.add(hit.rating.before_cut_rating);
        }

        if scoring_type.awards_after_cut() {
            self.after_cut.add(hit.score.after_cut);
            self.post_swing.add(hit.rating.after_cut_rating);
        }

        if scoring_type.is_burst() {
            return;
        }

        self.acc_cut.add(hit.score.acc_cut);
        self.score.add(score);
        self.time_dependence.add(hit.time_dependence);

        let direction = hit.note.cut_direction;
        if let Some(cell) = self.direction_grid.get_mut(usize::from(direction)) {
            cell.add(score);
        }

        if let Some(position) = BlockPosition::new(hit.note.line_index, hit.note.line_layer) {
            self.position_grid[position.index()].add(score);
            if let Some(index) = position_and_direction_index(position, direction) {
                self.position_and_direction_grid[index].add(score);
            }
        }
    }

    fn stats(&self) -> HandStats {
        HandStats {
            acc_cut: self.acc_cut.stats(),
            before_cut: self.before_cut.stats(),
            after_cut: self.after_cut.stats(),
            score: self.score.stats(),
            time_dependence: self.time_dependence.stats(),
            pre_swing: self.pre_swing.stats(),
            post_swing: self.post_swing.stats(),
            position_grid: GridStats::from_cells(&self.position_grid),
            direction_grid: GridStats::from_cells(&self.direction_grid),
            position_and_direction_grid: GridStats::from_cells(&self.position_and_direction_grid),
            notes: self.notes,
            misses: self.misses,
            bad_cuts: self.bad_cuts,
            bomb_hits: self.bomb_hits,
            max_combo: 0,
        }
    }
}
