use std::cmp::Ordering;

use serde::Serialize;

/// Order statistics of one sample set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats<T> {
    pub min: T,
    pub avg: f64,
    pub median: f64,
    pub max: T,
    pub count: usize,
}

/// Per-cell order statistics of a grid, one entry per cell in each vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats<T> {
    pub min: Vec<T>,
    pub avg: Vec<f64>,
    pub median: Vec<f64>,
    pub max: Vec<T>,
    pub count: Vec<usize>,
}

impl<T> GridStats<T>
where
    T: Copy + Default + PartialOrd + Into<f64>,
{
    pub fn from_cells(cells: &[SampleBuffer<T>]) -> Self {
        let mut grid = GridStats {
            min: Vec::with_capacity(cells.len()),
            avg: Vec::with_capacity(cells.len()),
            median: Vec::with_capacity(cells.len()),
            max: Vec::with_capacity(cells.len()),
            count: Vec::with_capacity(cells.len()),
        };
        for cell in cells {
            let stats = cell.stats();
            grid.min.push(stats.min);
            grid.avg.push(stats.avg);
            grid.median.push(stats.median);
            grid.max.push(stats.max);
            grid.count.push(stats.count);
        }
        grid
    }
}

/// Collects every sample so exact order statistics can be taken.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer<T> {
    values: Vec<T>,
    sum: f64,
}

impl<T> SampleBuffer<T>
where
    T: Copy + Default + PartialOrd + Into<f64>,
{
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            sum: 0.0,
        }
    }

    pub fn add(&mut self, value: T) {
        self.values.push(value);
        self.sum += value.into();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> T {
        self.values
            .iter()
            .copied()
            .reduce(|a, b| if b < a { b } else { a })
            .unwrap_or_default()
    }

    pub fn max(&self) -> T {
        self.values
            .iter()
            .copied()
            .reduce(|a, b| if b > a { b } else { a })
            .unwrap_or_default()
    }

    pub fn avg(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f64
        }
    }

    /// Exact median; the mean of the two middle values for an even count.
    pub fn median(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1].into() + sorted[mid].into()) / 2.0
        } else {
            sorted[mid].into()
        }
    }

    pub fn stats(&self) -> Stats<T> {
        Stats {
            min: self.min(),
            avg: self.avg(),
            median: self.median(),
            max: self.max(),
            count: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer<T>(values: &[T]) -> SampleBuffer<T>
    where
        T: Copy + Default + PartialOrd + Into<f64>,
    {
        let mut buffer = SampleBuffer::new();
        for &v in values {
            buffer.add(v);
        }
        buffer
    }

    #[test]
    fn test_odd_median() {
        let buf = buffer(&[115, 100, 107]);
        assert_eq!(buf.median(), 107.0);
        assert_eq!(buf.min(), 100);
        assert_eq!(buf.max(), 115);
        assert_eq!(buf.avg(), 322.0 / 3.0);
    }

    #[test]
    fn test_even_median_averages_middle_values() {
        let buf = buffer(&[100, 115, 101, 90]);
        assert_eq!(buf.median(), 100.5);
    }

    #[test]
    fn test_empty_buffer_stats() {
        let buf: SampleBuffer<i32> = SampleBuffer::new();
        let stats = buf.stats();
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.avg, 0.0);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_float_samples() {
        let buf = buffer(&[0.5f64, 1.0, 0.25]);
        let stats = buf.stats();
        assert_eq!(stats.min, 0.25);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.median, 0.5);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_grid_stats_per_cell() {
        let cells = vec![buffer(&[10, 20]), SampleBuffer::new(), buffer(&[5])];
        let grid = GridStats::from_cells(&cells);
        assert_eq!(grid.count, vec![2, 0, 1]);
        assert_eq!(grid.median, vec![15.0, 0.0, 5.0]);
        assert_eq!(grid.min, vec![10, 0, 5]);
        assert_eq!(grid.max, vec![20, 0, 5]);
    }
}
