use serde::{Deserialize, Serialize};

/// Statistic vectors of one sub-process, one per completed sample.
///
/// `initial` holds the statistics the call started from. Sample `i` equals
/// sample `i - 1` (or the post-burn-in running vector for `i == 0`) plus every
/// delta committed during the sample's steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    initial: Vec<f64>,
    samples: Vec<Vec<f64>>,
}

impl Trajectory {
    /// Creates an empty trajectory starting from `initial`.
    pub fn new(initial: Vec<f64>) -> Self {
        Self {
            initial,
            samples: Vec::new(),
        }
    }

    /// Number of statistics per row.
    pub fn n_stats(&self) -> usize {
        self.initial.len()
    }

    /// Statistics the call started from.
    pub fn initial(&self) -> &[f64] {
        &self.initial
    }

    /// Completed samples in order.
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// Number of completed samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample has completed.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One statistic across all samples.
    pub fn column(&self, stat: usize) -> Vec<f64> {
        self.samples
            .iter()
            .filter_map(|row| row.get(stat).copied())
            .collect()
    }

    pub(crate) fn push(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.initial.len());
        self.samples.push(row);
    }
}

/// Adds `delta` element-wise into `acc`.
pub(crate) fn accumulate(acc: &mut [f64], delta: &[f64]) {
    for (value, change) in acc.iter_mut().zip(delta) {
        *value += change;
    }
}
