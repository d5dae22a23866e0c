use crate::config::scoring::FC_HISTORY_SIZE;

/// Fixed-capacity ring of the most recent positive hit scores of one hand.
#[derive(Debug, Clone)]
pub struct ScoreHistory {
    values: [i32; FC_HISTORY_SIZE],
    position: usize,
    len: usize,
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self {
            values: [0; FC_HISTORY_SIZE],
            position: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, score: i32) {
        self.values[self.position] = score;
        self.position = (self.position + 1) % FC_HISTORY_SIZE;
        self.len = (self.len + 1).min(FC_HISTORY_SIZE);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Median of the retained scores (integer midpoint for an even count).
    pub fn median(&self) -> Option<i32> {
        if self.len == 0 {
            return None;
        }

        let mut sorted = self.values;
        let sorted = &mut sorted[..self.len];
        sorted.sort_unstable();

        let mid = self.len / 2;
        if self.len % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2)
        } else {
            Some(sorted[mid])
        }
    }
}
