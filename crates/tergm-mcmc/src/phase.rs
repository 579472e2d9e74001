use serde::{Deserialize, Serialize};
use tergm_core::errors::TergmError;
use tergm_core::{Dyad, RngHandle};
use tergm_net::NetworkPair;
use tracing::trace;

use crate::model::Model;
use crate::proposal::{unrecoverable, Proposal, ProposalOutcome};
use crate::toggle_log::{ToggleLog, ToggleRecord};

/// Which half of the separable model a sub-process drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessKind {
    /// Edge formation.
    Formation,
    /// Edge dissolution.
    Dissolution,
}

impl ProcessKind {
    /// Stable lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessKind::Formation => "formation",
            ProcessKind::Dissolution => "dissolution",
        }
    }
}

/// Running counters of one sub-process's MH chains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTally {
    /// Phases run.
    pub phases: u64,
    /// Candidates evaluated.
    pub proposed: u64,
    /// Candidates accepted.
    pub accepted: u64,
    /// Phases cut short because the proposal had no move.
    pub exhausted: u64,
}

impl PhaseTally {
    /// Fraction of evaluated candidates that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }
}

/// Model, proposal and parameters of one sub-process.
pub struct SubProcess {
    pub(crate) kind: ProcessKind,
    pub(crate) model: Model,
    pub(crate) proposal: Box<dyn Proposal>,
    pub(crate) theta: Vec<f64>,
    pub(crate) tally: PhaseTally,
}

impl std::fmt::Debug for SubProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubProcess")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("proposal", &self.proposal.name())
            .field("theta", &self.theta)
            .field("tally", &self.tally)
            .finish()
    }
}

impl SubProcess {
    /// Bundles a sub-process after checking `theta` against the model.
    pub fn new(
        kind: ProcessKind,
        model: Model,
        proposal: Box<dyn Proposal>,
        theta: Vec<f64>,
    ) -> Result<Self, TergmError> {
        model.check_parameters(&theta)?;
        Ok(Self {
            kind,
            model,
            proposal,
            theta,
            tally: PhaseTally::default(),
        })
    }

    /// Which sub-process this is.
    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    /// The sub-process model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Name of the proposal.
    pub fn proposal_name(&self) -> &str {
        self.proposal.name()
    }

    /// Chain counters accumulated so far.
    pub fn tally(&self) -> PhaseTally {
        self.tally
    }
}

/// Metropolis-Hastings acceptance test in log space.
///
/// Accepts outright when `cutoff >= 0`; otherwise draws `U ~ (0, 1)` and
/// accepts when `ln U < cutoff`, i.e. with probability `exp(cutoff)`.
pub fn accept(cutoff: f64, rng: &mut RngHandle) -> bool {
    cutoff >= 0.0 || rng.uniform().ln() < cutoff
}

/// Runs one phase: up to `mh_interval` MH iterations for `process`.
///
/// Accepted toggle sets are applied to both networks of the pair so later
/// iterations see them; statistics are not touched. A `NoMove` outcome ends
/// the phase early. An `Unrecoverable` outcome aborts with a fatal error.
pub fn sample_phase(
    process: &mut SubProcess,
    pair: &mut NetworkPair,
    mh_interval: usize,
    rng: &mut RngHandle,
) -> Result<(), TergmError> {
    process.tally.phases += 1;
    process.proposal.begin_phase(&pair.primary);

    for iteration in 0..mh_interval {
        let (toggles, log_ratio) = match process.proposal.propose(&pair.primary, rng) {
            ProposalOutcome::Toggles { toggles, log_ratio } => (toggles, log_ratio),
            ProposalOutcome::NoMove => {
                process.tally.exhausted += 1;
                trace!(
                    process = process.kind.as_str(),
                    iteration,
                    "proposal has no move; ending phase"
                );
                break;
            }
            ProposalOutcome::Unrecoverable(info) => {
                return Err(unrecoverable(process.proposal.name(), info));
            }
        };
        process.tally.proposed += 1;

        process.model.change_stats(&toggles, &mut pair.primary);
        let cutoff = process.model.log_odds(&process.theta) + log_ratio;

        if accept(cutoff, rng) {
            process.tally.accepted += 1;
            for dyad in toggles {
                pair.toggle_both(dyad);
            }
        }
    }
    Ok(())
}

/// Drains the discordant network, undoing each toggle on the primary network.
///
/// Every drained dyad is appended to `drained` and, while capacity remains,
/// logged with the primary network's current timer. Returns the drain count.
pub fn extract_toggles(
    pair: &mut NetworkPair,
    log: &mut ToggleLog,
    drained: &mut Vec<Dyad>,
) -> usize {
    let time = pair.primary.timer();
    let mut count = 0;
    while let Some(dyad) = pair.discordant.pop_first_edge() {
        pair.primary.toggle(dyad);
        log.push(ToggleRecord {
            time,
            tail: dyad.tail(),
            head: dyad.head(),
        });
        drained.push(dyad);
        count += 1;
    }
    count
}
