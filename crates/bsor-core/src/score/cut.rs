use serde::Serialize;

use crate::config::scoring::{
    ACC_CUT_MAX, ACC_CUT_RANGE, AFTER_CUT_MAX, BEFORE_CUT_MAX, BLOCK_MAX_VALUE,
    BURST_SLIDER_ELEMENT_VALUE, BURST_SLIDER_HEAD_MAX_VALUE,
};
use crate::replay::{CutInfo, ScoringType};

/// Swing ratings a cut score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRating {
    pub cut_distance_to_center: f64,
    pub before_cut_rating: f64,
    pub after_cut_rating: f64,
}

impl From<&CutInfo> for NoteRating {
    fn from(cut: &CutInfo) -> Self {
        Self {
            cut_distance_to_center: f64::from(cut.cut_distance_to_center),
            before_cut_rating: f64::from(cut.before_cut_rating),
            after_cut_rating: f64::from(cut.after_cut_rating),
        }
    }
}

/// Score components of a single good cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutScore {
    pub before_cut: i32,
    pub after_cut: i32,
    pub acc_cut: i32,
}

impl CutScore {
    /// Score components for a good cut of a note of `scoring_type`.
    pub fn new(scoring_type: ScoringType, rating: &NoteRating) -> Self {
        let before_cut = match scoring_type {
            ScoringType::SliderTail => BEFORE_CUT_MAX as i32,
            ScoringType::BurstSliderElement => 0,
            _ => scaled(rating.before_cut_rating, BEFORE_CUT_MAX),
        };

        let after_cut = match scoring_type {
            ScoringType::SliderHead => AFTER_CUT_MAX as i32,
            ScoringType::BurstSliderHead | ScoringType::BurstSliderElement => 0,
            _ => scaled(rating.after_cut_rating, AFTER_CUT_MAX),
        };

        let acc_cut = match scoring_type {
            ScoringType::BurstSliderElement => BURST_SLIDER_ELEMENT_VALUE,
            _ => {
                let distance = (rating.cut_distance_to_center / ACC_CUT_RANGE).clamp(0.0, 1.0);
                (ACC_CUT_MAX * (1.0 - distance)).round() as i32
            }
        };

        Self {
            before_cut,
            after_cut,
            acc_cut,
        }
    }

    pub fn total(&self) -> i32 {
        self.before_cut + self.after_cut + self.acc_cut
    }
}

fn scaled(rating: f64, max: f64) -> i32 {
    (rating * max).clamp(0.0, max).round() as i32
}

/// Best score a note of `scoring_type` can award.
pub fn max_note_score(scoring_type: ScoringType) -> i32 {
    match scoring_type {
        ScoringType::BurstSliderHead => BURST_SLIDER_HEAD_MAX_VALUE,
        ScoringType::BurstSliderElement => BURST_SLIDER_ELEMENT_VALUE,
        _ => BLOCK_MAX_VALUE,
    }
}
