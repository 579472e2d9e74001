use serde::{Deserialize, Serialize};
use tergm_core::errors::TergmError;
use tergm_core::{Dyad, RngHandle, Timestamp};
use tergm_net::{Network, NetworkPair};
use tracing::trace;

use crate::model::Model;
use crate::phase::{extract_toggles, sample_phase, SubProcess};
use crate::toggle_log::ToggleLog;
use crate::trajectory::accumulate;

/// What one orchestrated time step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Timer value of the step.
    pub time: Timestamp,
    /// Toggles committed by the dissolution phase.
    pub dissolution_toggles: usize,
    /// Toggles committed by the formation phase.
    pub formation_toggles: usize,
}

/// Owns everything a simulation call mutates step by step.
#[derive(Debug)]
pub struct Sampler {
    pair: NetworkPair,
    formation: SubProcess,
    dissolution: SubProcess,
    log: ToggleLog,
    mh_interval: usize,
    full_resolution: bool,
    pending: Vec<Dyad>,
}

impl Sampler {
    /// Assembles a sampler around the primary network.
    ///
    /// With `full_resolution` the log keeps every toggle of the run; otherwise
    /// it is rewound at the start of every step and holds only the latest one.
    pub fn new(
        primary: Network,
        formation: SubProcess,
        dissolution: SubProcess,
        log: ToggleLog,
        mh_interval: usize,
        full_resolution: bool,
    ) -> Self {
        Self {
            pair: NetworkPair::new(primary),
            formation,
            dissolution,
            log,
            mh_interval,
            full_resolution,
            pending: Vec::new(),
        }
    }

    /// Runs one time step: dissolution phase, formation phase, then commit.
    ///
    /// Both phases are evaluated against the same baseline network: the
    /// dissolution toggles are extracted (and undone) before formation runs.
    /// Deltas of both models are added into the given accumulators.
    pub fn step(
        &mut self,
        rng: &mut RngHandle,
        formation_stats: &mut [f64],
        dissolution_stats: &mut [f64],
    ) -> Result<StepReport, TergmError> {
        if !self.full_resolution {
            self.log.rewind();
        }
        let time = self.pair.primary.advance_timer();
        self.pending.clear();

        sample_phase(&mut self.dissolution, &mut self.pair, self.mh_interval, rng)?;
        let dissolution_toggles = extract_toggles(&mut self.pair, &mut self.log, &mut self.pending);

        sample_phase(&mut self.formation, &mut self.pair, self.mh_interval, rng)?;
        let formation_toggles = extract_toggles(&mut self.pair, &mut self.log, &mut self.pending);

        debug_assert!(self.pair.is_settled());

        commit(
            &self.pending,
            &mut self.pair.primary,
            &mut self.formation.model,
            formation_stats,
            &mut self.dissolution.model,
            dissolution_stats,
        );

        trace!(
            time,
            dissolution_toggles,
            formation_toggles,
            edges = self.pair.primary.edge_count(),
            "step committed"
        );
        Ok(StepReport {
            time,
            dissolution_toggles,
            formation_toggles,
        })
    }

    /// Current primary network.
    pub fn network(&self) -> &Network {
        &self.pair.primary
    }

    /// Primary and discordant networks.
    pub fn pair(&self) -> &NetworkPair {
        &self.pair
    }

    /// Toggle log written so far.
    pub fn log(&self) -> &ToggleLog {
        &self.log
    }

    /// Whether every toggle of the run is being kept.
    pub fn full_resolution(&self) -> bool {
        self.full_resolution
    }

    /// Formation sub-process.
    pub fn formation(&self) -> &SubProcess {
        &self.formation
    }

    /// Dissolution sub-process.
    pub fn dissolution(&self) -> &SubProcess {
        &self.dissolution
    }

    pub(crate) fn seal_log(&mut self) {
        self.log.seal();
    }

    /// Releases the final network and the toggle log.
    pub fn into_parts(self) -> (Network, ToggleLog) {
        (self.pair.into_primary(), self.log)
    }
}

/// Permanently applies a step's combined toggle set.
///
/// Both models evaluate the exact set against the pre-commit network and
/// their deltas are added to the accumulators; every dyad is then toggled and
/// stamped with the network's current timer.
pub fn commit(
    toggles: &[Dyad],
    network: &mut Network,
    formation: &mut Model,
    formation_stats: &mut [f64],
    dissolution: &mut Model,
    dissolution_stats: &mut [f64],
) {
    accumulate(formation_stats, formation.change_stats(toggles, network));
    accumulate(dissolution_stats, dissolution.change_stats(toggles, network));
    for dyad in toggles {
        network.toggle_with_timestamp(*dyad);
    }
}
