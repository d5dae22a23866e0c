use serde::Serialize;
use tracing::{debug, warn};

use crate::replay::{Info, Pause, Replay};
use crate::score::events::{
    BadCut, BombHit, DuplicatePolicy, GameEvent, GoodCut, MissedNote, WallHitEvent,
    reconstruct_events,
};
use crate::score::simulator::{percent, simulate};

/// Replay metadata together with the recomputed totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEventsInfo {
    #[serde(flatten)]
    pub info: Info,
    /// Time of the last recorded frame.
    pub end_time: f32,
    pub calc_score: i32,
    pub max_score: i32,
    pub fc_score: i32,
    pub accuracy: f64,
    /// Declared score against the recomputed maximum.
    pub declared_accuracy: f64,
    pub fc_accuracy: f64,
    pub max_combo: u32,
    pub max_left_combo: u32,
    pub max_right_combo: u32,
    /// Set when duplicate note records had to be suppressed to match the declared score.
    pub reconciled: bool,
}

/// Categorized gameplay events of one replay with running score values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEvents {
    pub info: ReplayEventsInfo,
    pub hits: Vec<GoodCut>,
    pub misses: Vec<MissedNote>,
    pub bad_cuts: Vec<BadCut>,
    pub bomb_hits: Vec<BombHit>,
    pub walls: Vec<WallHitEvent>,
    pub pauses: Vec<Pause>,
}

impl ReplayEvents {
    /// Reconstruct and replay the events, reconciling with the declared score.
    ///
    /// When the first pass disagrees with the score the game recorded, the
    /// events are rebuilt once with duplicate note records suppressed.
    pub fn from_replay(replay: &Replay) -> Self {
        let events = Self::build(replay, DuplicatePolicy::Keep);
        if events.score_matches() {
            return events;
        }

        warn!(
            "Calculated score {} differs from declared score {}, suppressing duplicate notes",
            events.info.calc_score, replay.info.score
        );
        let mut reconciled = Self::build(replay, DuplicatePolicy::Suppress);
        reconciled.info.reconciled = true;

        if !reconciled.score_matches() {
            debug!(
                "Score still differs after suppression: {} vs {}",
                reconciled.info.calc_score, replay.info.score
            );
        }
        reconciled
    }

    /// Single reconstruction pass with the given duplicate policy.
    pub fn build(replay: &Replay, policy: DuplicatePolicy) -> Self {
        let mut events = reconstruct_events(replay, policy);
        let outcome = simulate(&mut events, replay.info.left_handed);

        let mut result = ReplayEvents {
            info: ReplayEventsInfo {
                info: replay.info.clone(),
                end_time: replay.end_time(),
                calc_score: outcome.score,
                max_score: outcome.max_score,
                fc_score: outcome.fc_score,
                accuracy: outcome.accuracy(),
                declared_accuracy: percent(replay.info.score, outcome.max_score),
                fc_accuracy: outcome.fc_accuracy(),
                max_combo: outcome.max_combo,
                max_left_combo: outcome.max_left_combo,
                max_right_combo: outcome.max_right_combo,
                reconciled: false,
            },
            pauses: replay.pauses.clone(),
            ..Default::default()
        };

        for event in events {
            match event {
                GameEvent::Hit(e) => result.hits.push(e),
                GameEvent::BadCut(e) => result.bad_cuts.push(e),
                GameEvent::Miss(e) => result.misses.push(e),
                GameEvent::Bomb(e) => result.bomb_hits.push(e),
                GameEvent::Wall(e) => result.walls.push(e),
            }
        }

        debug!(
            "Replayed {} hits, {} misses, {} bad cuts, {} bombs, {} walls: score {}/{}",
            result.hits.len(),
            result.misses.len(),
            result.bad_cuts.len(),
            result.bomb_hits.len(),
            result.walls.len(),
            result.info.calc_score,
            result.info.max_score
        );
        result
    }

    pub fn score_matches(&self) -> bool {
        self.info.calc_score == self.info.info.score
    }
}
