use serde::Serialize;
use strum::{FromRepr, IntoStaticStr};

use crate::config::grid::{CUT_DIRECTIONS_COUNT, LAYERS_COUNT, LINES_COUNT};

/// Cell of the 4x3 note grid as the player sees it, top row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum BlockPosition {
    TopLeft = 0,
    TopCenterLeft,
    TopCenterRight,
    TopRight,
    MiddleLeft,
    MiddleCenterLeft,
    MiddleCenterRight,
    MiddleRight,
    BottomLeft,
    BottomCenterLeft,
    BottomCenterRight,
    BottomRight,
}

impl BlockPosition {
    /// Position of a note at `line` (0 = leftmost) and `layer` (0 = bottom).
    pub fn new(line: u8, layer: u8) -> Option<Self> {
        let (line, layer) = (usize::from(line), usize::from(layer));
        if line >= LINES_COUNT || layer >= LAYERS_COUNT {
            return None;
        }
        let index = (LAYERS_COUNT - 1 - layer) * LINES_COUNT + line;
        Self::from_repr(index as u8)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Cell of the position x direction grid, if both are in range.
pub fn position_and_direction_index(position: BlockPosition, direction: u8) -> Option<usize> {
    let direction = usize::from(direction);
    (direction < CUT_DIRECTIONS_COUNT).then(|| position.index() * CUT_DIRECTIONS_COUNT + direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::grid::{BLOCK_POSITIONS_COUNT, POSITIONS_AND_DIRECTIONS_COUNT};

    #[test]
    fn test_layers_are_reversed() {
        assert_eq!(BlockPosition::new(0, 2), Some(BlockPosition::TopLeft));
        assert_eq!(BlockPosition::new(3, 2), Some(BlockPosition::TopRight));
        assert_eq!(BlockPosition::new(1, 1), Some(BlockPosition::MiddleCenterLeft));
        assert_eq!(BlockPosition::new(0, 0), Some(BlockPosition::BottomLeft));
        assert_eq!(BlockPosition::new(3, 0), Some(BlockPosition::BottomRight));
        assert_eq!(BlockPosition::BottomRight.index(), BLOCK_POSITIONS_COUNT - 1);
    }

    #[test]
    fn test_out_of_range_position() {
        assert_eq!(BlockPosition::new(4, 0), None);
        assert_eq!(BlockPosition::new(0, 3), None);
    }

    #[test]
    fn test_position_and_direction_index() {
        assert_eq!(position_and_direction_index(BlockPosition::TopLeft, 0), Some(0));
        assert_eq!(position_and_direction_index(BlockPosition::TopCenterLeft, 2), Some(11));
        assert_eq!(
            position_and_direction_index(BlockPosition::BottomRight, 8),
            Some(POSITIONS_AND_DIRECTIONS_COUNT - 1)
        );
        assert_eq!(position_and_direction_index(BlockPosition::TopLeft, 9), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(BlockPosition::MiddleRight.to_string(), "MiddleRight");
    }
}
