use serde::{Deserialize, Serialize};
use tergm_core::errors::TergmError;
use tergm_core::RngHandle;

use crate::config::SamplerConfig;
use crate::metrics::{MetricsRecorder, SampleMetric};
use crate::step::Sampler;
use crate::trajectory::Trajectory;

/// Terminal state of a simulation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SamplerStatus {
    /// Every requested sample completed.
    Ok,
    /// The network reached the returnable edge capacity.
    TooManyEdges,
    /// The toggle log filled up while every toggle had to be kept.
    TooManyChanges,
}

impl SamplerStatus {
    /// Stable label used in logs and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplerStatus::Ok => "OK",
            SamplerStatus::TooManyEdges => "TOO_MANY_EDGES",
            SamplerStatus::TooManyChanges => "TOO_MANY_CHANGES",
        }
    }

    /// Whether the run completed normally.
    pub fn is_ok(&self) -> bool {
        matches!(self, SamplerStatus::Ok)
    }
}

/// Status and statistic trajectories produced by [`drive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverOutput {
    /// How the run ended.
    pub status: SamplerStatus,
    /// Formation statistics per completed sample.
    pub formation: Trajectory,
    /// Dissolution statistics per completed sample.
    pub dissolution: Trajectory,
}

macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// Whether `edges` has reached the returnable capacity. `0` disables the cap.
pub fn exceeds_edge_cap(edges: usize, max_edges: usize) -> bool {
    max_edges != 0 && edges + 1 >= max_edges
}

/// Runs burn-in and then `config.nsteps` samples of `config.interval` steps.
///
/// The running statistic vectors start at the given initial values; burn-in
/// deltas are folded into them before the first sample. A sample row is
/// appended only when all of its steps completed, so an early
/// [`SamplerStatus::TooManyEdges`] or [`SamplerStatus::TooManyChanges`] leaves
/// the trajectories holding exactly the samples finished before the failing
/// step. Errors are fatal proposal failures and leave the sampler unusable.
pub fn drive(
    sampler: &mut Sampler,
    config: &SamplerConfig,
    formation_initial: Vec<f64>,
    dissolution_initial: Vec<f64>,
    rng: &mut RngHandle,
    recorder: &mut MetricsRecorder,
) -> Result<DriverOutput, TergmError> {
    let verbose = config.verbose;
    let mut formation_running = formation_initial.clone();
    let mut dissolution_running = dissolution_initial.clone();
    let mut output = DriverOutput {
        status: SamplerStatus::Ok,
        formation: Trajectory::new(formation_initial),
        dissolution: Trajectory::new(dissolution_initial),
    };

    progress!(
        verbose,
        formation_stats = output.formation.n_stats(),
        dissolution_stats = output.dissolution.n_stats(),
        nsteps = config.nsteps,
        burnin = config.burnin,
        interval = config.interval,
        "starting separable sampler"
    );

    for _ in 0..config.burnin {
        sampler.step(rng, &mut formation_running, &mut dissolution_running)?;
    }
    progress!(
        verbose,
        edges = sampler.network().edge_count(),
        "burn-in finished"
    );
    if exceeds_edge_cap(sampler.network().edge_count(), config.max_edges) {
        output.status = SamplerStatus::TooManyEdges;
        return Ok(finish(output, verbose));
    }

    for sample in 0..config.nsteps {
        let mut formation_row = formation_running.clone();
        let mut dissolution_row = dissolution_running.clone();
        let mut formation_toggles = 0;
        let mut dissolution_toggles = 0;

        for _ in 0..config.interval {
            let report = sampler.step(rng, &mut formation_row, &mut dissolution_row)?;
            formation_toggles += report.formation_toggles;
            dissolution_toggles += report.dissolution_toggles;

            if sampler.full_resolution() && sampler.log().is_full() {
                output.status = SamplerStatus::TooManyChanges;
                return Ok(finish(output, verbose));
            }
            if exceeds_edge_cap(sampler.network().edge_count(), config.max_edges) {
                output.status = SamplerStatus::TooManyEdges;
                return Ok(finish(output, verbose));
            }
        }

        recorder.push_sample(SampleMetric {
            sample,
            time: sampler.network().timer(),
            edges: sampler.network().edge_count(),
            formation_toggles,
            dissolution_toggles,
        });
        output.formation.push(formation_row.clone());
        output.dissolution.push(dissolution_row.clone());
        formation_running = formation_row;
        dissolution_running = dissolution_row;

        if config.nsteps > 500 && (3 * sample) % config.nsteps < 3 {
            progress!(
                verbose,
                steps = sample * config.interval,
                edges = sampler.network().edge_count(),
                "advanced time steps"
            );
        }
    }

    if sampler.full_resolution() {
        sampler.seal_log();
    }
    Ok(finish(output, verbose))
}

fn finish(output: DriverOutput, verbose: bool) -> DriverOutput {
    progress!(
        verbose,
        status = output.status.as_str(),
        samples = output.formation.len(),
        "sampler finished"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_cap_triggers_one_below_capacity() {
        assert!(!exceeds_edge_cap(3, 5));
        assert!(exceeds_edge_cap(4, 5));
        assert!(exceeds_edge_cap(9, 5));
    }

    #[test]
    fn zero_capacity_disables_edge_cap() {
        assert!(!exceeds_edge_cap(usize::MAX - 1, 0));
    }

    #[test]
    fn status_labels_match_serde_names() {
        for status in [
            SamplerStatus::Ok,
            SamplerStatus::TooManyEdges,
            SamplerStatus::TooManyChanges,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
