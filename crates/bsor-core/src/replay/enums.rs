use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

/// Tag byte introducing each part of the replay body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum PartTag {
    Info = 0,
    Frames = 1,
    Notes = 2,
    Walls = 3,
    Heights = 4,
    Pauses = 5,
}

impl PartTag {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

impl std::fmt::Display for PartTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Recorded outcome of a note.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRepr, IntoStaticStr,
)]
#[repr(i32)]
pub enum NoteEventType {
    Good = 0,
    Bad = 1,
    Miss = 2,
    Bomb = 3,
}

impl NoteEventType {
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Good and Bad records carry a cut-detail block on the wire.
    pub fn has_cut_info(&self) -> bool {
        matches!(self, NoteEventType::Good | NoteEventType::Bad)
    }
}

/// Which score components a note awards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum ScoringType {
    /// Recorded before the game distinguished scoring types.
    NormalOld = 0,
    Ignore = 1,
    NoScore = 2,
    #[default]
    Normal = 3,
    SliderHead = 4,
    SliderTail = 5,
    BurstSliderHead = 6,
    BurstSliderElement = 7,
    Unknown = 255,
}

impl ScoringType {
    /// Maps the leading digit group of a packed note id.
    pub fn from_code(code: u32) -> Self {
        u8::try_from(code)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or(ScoringType::Unknown)
    }

    /// Notes that count toward the note total in statistics.
    pub fn is_countable(&self) -> bool {
        matches!(
            self,
            ScoringType::Normal
                | ScoringType::NormalOld
                | ScoringType::SliderHead
                | ScoringType::BurstSliderHead
        )
    }

    pub fn awards_before_cut(&self) -> bool {
        !matches!(
            self,
            ScoringType::SliderTail | ScoringType::BurstSliderElement
        )
    }

    pub fn awards_after_cut(&self) -> bool {
        !matches!(
            self,
            ScoringType::SliderHead
                | ScoringType::BurstSliderHead
                | ScoringType::BurstSliderElement
        )
    }

    pub fn is_burst(&self) -> bool {
        matches!(
            self,
            ScoringType::BurstSliderHead | ScoringType::BurstSliderElement
        )
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum ColorType {
    Red,
    Blue,
    #[default]
    NoColor,
}

impl ColorType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ColorType::Red,
            1 => ColorType::Blue,
            _ => ColorType::NoColor,
        }
    }

    /// Hand holding the saber of this color.
    ///
    /// Red is the left saber unless the player plays left-handed, which swaps them.
    pub fn hand(&self, left_handed: bool) -> Option<Hand> {
        let hand = match self {
            ColorType::Red => Hand::Left,
            ColorType::Blue => Hand::Right,
            ColorType::NoColor => return None,
        };
        Some(if left_handed { hand.opposite() } else { hand })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn opposite(&self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}
