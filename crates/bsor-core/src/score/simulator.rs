//! Chronological score replay over reconstructed events.
//!
//! Scores are `i32`. A single note is worth at most 115 * 8 = 920, so the
//! totals stay in range for any map below roughly two million notes.

use serde::Serialize;

use crate::config::scoring::BLOCK_MAX_VALUE;
use crate::replay::Hand;
use crate::score::events::GameEvent;
use crate::score::history::ScoreHistory;
use crate::score::multiplier::Multiplier;

#[derive(Debug, Clone, Copy, Default)]
struct Combo {
    current: u32,
    max: u32,
}

impl Combo {
    fn hit(&mut self) {
        self.current += 1;
    }

    fn flush(&mut self) {
        self.max = self.max.max(self.current);
        self.current = 0;
    }
}

/// Totals produced by a full score replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub score: i32,
    pub max_score: i32,
    pub fc_score: i32,
    pub max_combo: u32,
    pub max_left_combo: u32,
    pub max_right_combo: u32,
}

impl ReplayOutcome {
    pub fn accuracy(&self) -> f64 {
        percent(self.score, self.max_score)
    }

    pub fn fc_accuracy(&self) -> f64 {
        percent(self.fc_score, self.max_score)
    }
}

/// `value / max` as a percentage, 0 when nothing could be scored.
pub fn percent(value: i32, max: i32) -> f64 {
    if max == 0 {
        0.0
    } else {
        f64::from(value) / f64::from(max) * 100.0
    }
}

/// Running state of a score replay. Feed events in chronological order.
#[derive(Debug, Clone)]
pub struct ScoreSimulator {
    left_handed: bool,
    multiplier: Multiplier,
    max_multiplier: Multiplier,
    score: i32,
    max_score: i32,
    fc_score: i32,
    combo: Combo,
    left_combo: Combo,
    right_combo: Combo,
    left_history: ScoreHistory,
    right_history: ScoreHistory,
}

impl ScoreSimulator {
    pub fn new(left_handed: bool) -> Self {
        Self {
            left_handed,
            multiplier: Multiplier::new(),
            max_multiplier: Multiplier::new(),
            score: 0,
            max_score: 0,
            fc_score: 0,
            combo: Combo::default(),
            left_combo: Combo::default(),
            right_combo: Combo::default(),
            left_history: ScoreHistory::new(),
            right_history: ScoreHistory::new(),
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    /// Apply one event and record the running values on it.
    pub fn apply(&mut self, event: &mut GameEvent) {
        let event_score = event.score();
        let max_multiplier = i32::from(self.max_multiplier.value());

        self.score += event_score * i32::from(self.multiplier.value());
        self.max_score += event.max_score() * max_multiplier;
        event.mark_mut().multiplier = self.multiplier.value();

        let hand = event.color().hand(self.left_handed);

        if event.is_note() {
            let predicted = if event_score > 0 {
                if let Some(hand) = hand {
                    self.history_mut(hand).push(event_score);
                }
                event_score
            } else {
                hand.and_then(|hand| self.history(hand).median())
                    .unwrap_or(BLOCK_MAX_VALUE)
                    .min(event.max_score())
            };
            self.fc_score += predicted * max_multiplier;
            event.set_predicted_score(predicted);
        }

        if self.max_score != 0 {
            let mark = event.mark_mut();
            mark.accuracy = percent(self.score, self.max_score);
            mark.fc_accuracy = percent(self.fc_score, self.max_score);
        }

        self.max_multiplier.increment();

        if event.decreases_combo() {
            self.multiplier.decrement();
            if let Some(hand) = hand {
                self.combo_mut(hand).flush();
            }
            self.combo.flush();
        } else {
            self.multiplier.increment();
            self.combo.hit();
            if let Some(hand) = hand {
                self.combo_mut(hand).hit();
            }
        }
    }

    /// Close any running combos and return the totals.
    pub fn finish(mut self) -> ReplayOutcome {
        self.combo.flush();
        self.left_combo.flush();
        self.right_combo.flush();

        ReplayOutcome {
            score: self.score,
            max_score: self.max_score,
            fc_score: self.fc_score,
            max_combo: self.combo.max,
            max_left_combo: self.left_combo.max,
            max_right_combo: self.right_combo.max,
        }
    }

    fn history(&self, hand: Hand) -> &ScoreHistory {
        match hand {
            Hand::Left => &self.left_history,
            Hand::Right => &self.right_history,
        }
    }

    fn history_mut(&mut self, hand: Hand) -> &mut ScoreHistory {
        match hand {
            Hand::Left => &mut self.left_history,
            Hand::Right => &mut self.right_history,
        }
    }

    fn combo_mut(&mut self, hand: Hand) -> &mut Combo {
        match hand {
            Hand::Left => &mut self.left_combo,
            Hand::Right => &mut self.right_combo,
        }
    }
}

/// Replay `events` in chronological order, filling in their running values.
///
/// The slice keeps its original order; only the visiting order is sorted.
pub fn simulate(events: &mut [GameEvent], left_handed: bool) -> ReplayOutcome {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| events[a].chronological(&events[b]));

    let mut simulator = ScoreSimulator::new(left_handed);
    for i in order {
        simulator.apply(&mut events[i]);
    }
    simulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{ColorType, NoteEventType, ScoringType, WallHit};
    use crate::score::cut::{CutScore, NoteRating};
    use crate::score::events::{
        BadCut, GoodCut, MissedNote, NoteEvent, ReplayMark, WallHitEvent,
    };

    fn base(index: u32, time: f32, color: ColorType, event_type: NoteEventType) -> NoteEvent {
        NoteEvent {
            index,
            event_type,
            scoring_type: ScoringType::Normal,
            line_index: 0,
            line_layer: 0,
            color,
            cut_direction: 0,
            event_time: time,
            mark: ReplayMark::default(),
        }
    }

    fn hit(index: u32, time: f32, color: ColorType, total: i32) -> GameEvent {
        GameEvent::Hit(GoodCut {
            note: base(index, time, color, NoteEventType::Good),
            predicted_score: 0,
            time_dependence: 0.0,
            rating: NoteRating::default(),
            score: CutScore {
                before_cut: total,
                after_cut: 0,
                acc_cut: 0,
            },
        })
    }

    fn miss(index: u32, time: f32, color: ColorType) -> GameEvent {
        GameEvent::Miss(MissedNote {
            note: base(index, time, color, NoteEventType::Miss),
            predicted_score: 0,
        })
    }

    fn bad(index: u32, time: f32, color: ColorType) -> GameEvent {
        GameEvent::BadCut(BadCut {
            note: base(index, time, color, NoteEventType::Bad),
            predicted_score: 0,
            time_dependence: 0.0,
        })
    }

    fn wall(index: u32, time: f32) -> GameEvent {
        GameEvent::Wall(WallHitEvent {
            index,
            wall: WallHit {
                time,
                ..Default::default()
            },
            mark: ReplayMark::default(),
        })
    }

    #[test]
    fn test_perfect_hits_apply_multiplier() {
        let mut events: Vec<GameEvent> = (0..3)
            .map(|i| hit(i, i as f32, ColorType::Red, 115))
            .collect();
        let outcome = simulate(&mut events, false);

        // Multipliers 1, 2, 2
        assert_eq!(outcome.score, 115 * 5);
        assert_eq!(outcome.max_score, 115 * 5);
        assert_eq!(outcome.fc_score, 115 * 5);
        assert_eq!(outcome.max_combo, 3);
        assert_eq!(outcome.max_left_combo, 3);
        assert_eq!(outcome.max_right_combo, 0);
        assert_eq!(outcome.accuracy(), 100.0);

        let multipliers: Vec<u8> = events.iter().map(|e| e.mark().multiplier).collect();
        assert_eq!(multipliers, vec![1, 2, 2]);
    }

    #[test]
    fn test_miss_breaks_combo_and_multiplier() {
        let mut events = vec![
            hit(0, 1.0, ColorType::Red, 100),
            miss(1, 2.0, ColorType::Blue),
            hit(2, 3.0, ColorType::Red, 100),
        ];
        let outcome = simulate(&mut events, false);

        // 100 * 1, miss at multiplier 2 drops to 1, 100 * 1
        assert_eq!(outcome.score, 200);
        // Max multipliers 1, 2, 2
        assert_eq!(outcome.max_score, 115 * 5);
        assert_eq!(outcome.max_combo, 1);
        assert_eq!(outcome.max_left_combo, 2);
        assert_eq!(outcome.max_right_combo, 0);
        assert_eq!(events[1].mark().multiplier, 2);
        assert_eq!(events[2].mark().multiplier, 1);
    }

    #[test]
    fn test_fc_prediction_uses_hand_history() {
        let mut events = vec![
            hit(0, 1.0, ColorType::Red, 110),
            hit(1, 2.0, ColorType::Red, 100),
            bad(2, 3.0, ColorType::Red),
            miss(3, 4.0, ColorType::Blue),
        ];
        let outcome = simulate(&mut events, false);

        assert_eq!(events[2].predicted_score(), Some(105));
        // No right-hand history yet
        assert_eq!(events[3].predicted_score(), Some(115));
        // Max multipliers 1, 2, 2, 2
        assert_eq!(outcome.fc_score, 110 + 100 * 2 + 105 * 2 + 115 * 2);
    }

    #[test]
    fn test_left_handed_swaps_hands() {
        let mut events = vec![hit(0, 1.0, ColorType::Red, 115)];
        let outcome = simulate(&mut events, true);
        assert_eq!(outcome.max_left_combo, 0);
        assert_eq!(outcome.max_right_combo, 1);
    }

    #[test]
    fn test_wall_breaks_combo_without_max_score() {
        let mut events = vec![
            hit(0, 1.0, ColorType::Blue, 115),
            hit(1, 2.0, ColorType::Blue, 115),
            wall(2, 1.5),
        ];
        let outcome = simulate(&mut events, false);

        // hit (x1), wall (x2, breaks to x1), hit (x1)
        assert_eq!(outcome.score, 230);
        assert_eq!(outcome.max_score, 115 + 115 * 2);
        assert_eq!(outcome.max_combo, 1);
        // Walls have no color, so the hand combo continues.
        assert_eq!(outcome.max_right_combo, 2);
        assert_eq!(events[2].predicted_score(), None);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let forward = vec![
            hit(0, 1.0, ColorType::Red, 100),
            miss(1, 1.0, ColorType::Blue),
            hit(2, 2.0, ColorType::Blue, 90),
            wall(3, 1.5),
        ];
        let mut reversed: Vec<GameEvent> = forward.iter().rev().cloned().collect();
        let mut forward = forward;

        let a = simulate(&mut forward, false);
        let b = simulate(&mut reversed, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_accuracy_zero_without_max() {
        let mut events = vec![wall(0, 1.0)];
        let outcome = simulate(&mut events, false);
        assert_eq!(outcome.max_score, 0);
        assert_eq!(outcome.accuracy(), 0.0);
        assert_eq!(outcome.fc_accuracy(), 0.0);
        assert_eq!(events[0].accuracy(), 0.0);
    }

    #[test]
    fn test_running_accuracy_recorded() {
        let mut events = vec![
            hit(0, 1.0, ColorType::Red, 115),
            miss(1, 2.0, ColorType::Red),
        ];
        simulate(&mut events, false);
        assert_eq!(events[0].accuracy(), 100.0);
        // 115 / (115 + 230)
        let expected = 115.0 / 345.0 * 100.0;
        assert!((events[1].accuracy() - expected).abs() < 1e-9);
        assert_eq!(events[1].fc_accuracy(), 100.0);
    }
}
