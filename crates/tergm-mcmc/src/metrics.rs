use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tergm_core::Timestamp;

use crate::phase::{PhaseTally, ProcessKind};

/// Per-sample metrics stored for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleMetric {
    /// Index of the recorded sample.
    pub sample: usize,
    /// Timer value at the end of the sample.
    pub time: Timestamp,
    /// Edge count at the end of the sample.
    pub edges: usize,
    /// Toggles committed by formation phases during the sample.
    pub formation_toggles: usize,
    /// Toggles committed by dissolution phases during the sample.
    pub dissolution_toggles: usize,
}

/// Aggregate summary over the recorded samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeSummary {
    /// Mean edge count.
    pub mean_edges: f64,
    /// Variance of the edge count.
    pub edge_variance: f64,
    /// Total formation toggles over all samples.
    pub formation_toggles: usize,
    /// Total dissolution toggles over all samples.
    pub dissolution_toggles: usize,
}

impl EdgeSummary {
    /// Returns an empty summary.
    pub fn empty() -> Self {
        Self {
            mean_edges: 0.0,
            edge_variance: 0.0,
            formation_toggles: 0,
            dissolution_toggles: 0,
        }
    }
}

/// Collects per-sample metrics.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<SampleMetric>,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed sample.
    pub fn push_sample(&mut self, sample: SampleMetric) {
        self.samples.push(sample);
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[SampleMetric] {
        &self.samples
    }

    /// Computes the edge-count summary from the recorded samples.
    pub fn summary(&self) -> EdgeSummary {
        if self.samples.is_empty() {
            return EdgeSummary::empty();
        }
        let edges: Vec<f64> = self.samples.iter().map(|s| s.edges as f64).collect();
        let mean_edges = edges.iter().sum::<f64>() / edges.len() as f64;
        let edge_variance = if edges.len() > 1 {
            let mean_sq = edges.iter().map(|&e| e * e).sum::<f64>() / edges.len() as f64;
            (mean_sq - mean_edges * mean_edges).max(0.0)
        } else {
            0.0
        };
        EdgeSummary {
            mean_edges,
            edge_variance,
            formation_toggles: self.samples.iter().map(|s| s.formation_toggles).sum(),
            dissolution_toggles: self.samples.iter().map(|s| s.dissolution_toggles).sum(),
        }
    }

    /// Writes the recorded metrics to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(
            file,
            "sample,time,edges,formation_toggles,dissolution_toggles"
        )?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{},{},{},{}",
                sample.sample,
                sample.time,
                sample.edges,
                sample.formation_toggles,
                sample.dissolution_toggles
            )?;
        }
        Ok(())
    }

    /// Consumes the recorder, returning the samples.
    pub fn into_samples(self) -> Vec<SampleMetric> {
        self.samples
    }
}

/// Acceptance rates keyed by sub-process label.
pub fn acceptance_rates(
    formation: &PhaseTally,
    dissolution: &PhaseTally,
) -> BTreeMap<String, f64> {
    [
        (ProcessKind::Formation, formation),
        (ProcessKind::Dissolution, dissolution),
    ]
    .into_iter()
    .map(|(kind, tally)| (kind.as_str().to_string(), tally.acceptance_rate()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(sample: usize, edges: usize) -> SampleMetric {
        SampleMetric {
            sample,
            time: sample as Timestamp + 1,
            edges,
            formation_toggles: 1,
            dissolution_toggles: 2,
        }
    }

    #[test]
    fn summary_of_constant_edges_has_zero_variance() {
        let mut recorder = MetricsRecorder::new();
        recorder.push_sample(metric(0, 4));
        recorder.push_sample(metric(1, 4));
        let summary = recorder.summary();
        assert_eq!(summary.mean_edges, 4.0);
        assert_eq!(summary.edge_variance, 0.0);
        assert_eq!(summary.formation_toggles, 2);
        assert_eq!(summary.dissolution_toggles, 4);
    }

    #[test]
    fn acceptance_rate_handles_empty_tallies() {
        let rates = acceptance_rates(
            &PhaseTally::default(),
            &PhaseTally {
                phases: 1,
                proposed: 4,
                accepted: 1,
                exhausted: 0,
            },
        );
        assert_eq!(rates["formation"], 0.0);
        assert_eq!(rates["dissolution"], 0.25);
    }
}
