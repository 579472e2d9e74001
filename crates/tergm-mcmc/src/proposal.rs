use serde::{Deserialize, Serialize};
use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::{Dyad, RngHandle};
use tergm_net::Network;

/// Result of asking a proposal for its next candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalOutcome {
    /// Candidate toggle set with its Hastings log-ratio `ln(q(y→x) / q(x→y))`.
    Toggles {
        /// Dyads to toggle, applied in order.
        toggles: Vec<Dyad>,
        /// Proposal asymmetry correction added to the model log-odds.
        log_ratio: f64,
    },
    /// No candidate is available; the current phase ends early.
    NoMove,
    /// The proposal's internal state is broken; the whole call must abort.
    Unrecoverable(ErrorInfo),
}

impl ProposalOutcome {
    /// Symmetric proposal of a single dyad.
    pub fn single(dyad: Dyad) -> Self {
        ProposalOutcome::Toggles {
            toggles: vec![dyad],
            log_ratio: 0.0,
        }
    }
}

/// Metropolis-Hastings proposal driving one sub-process.
pub trait Proposal: Send {
    /// Name reported in manifests and logs.
    fn name(&self) -> &str;

    /// Called once before each phase's chain starts, with the baseline network.
    fn begin_phase(&mut self, _network: &Network) {}

    /// Proposes a candidate toggle set against the current primary network.
    fn propose(&mut self, network: &Network, rng: &mut RngHandle) -> ProposalOutcome;
}

/// Degree-bound constraints forwarded to proposal construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeConstraints {
    /// Per-vertex attribute codes (1-based vertices map to index `v - 1`).
    #[serde(default)]
    pub attributes: Vec<i32>,
    /// Per-vertex (or per-attribute) maximum out-degree.
    #[serde(default)]
    pub max_out: Vec<u32>,
    /// Per-vertex (or per-attribute) maximum in-degree.
    #[serde(default)]
    pub max_in: Vec<u32>,
    /// Per-vertex (or per-attribute) minimum out-degree.
    #[serde(default)]
    pub min_out: Vec<u32>,
    /// Per-vertex (or per-attribute) minimum in-degree.
    #[serde(default)]
    pub min_in: Vec<u32>,
    /// Whether degrees are conditioned on exactly.
    #[serde(default)]
    pub exact_conditional_degree: bool,
}

impl DegreeConstraints {
    /// Whether no bound of any kind is set.
    pub fn is_unconstrained(&self) -> bool {
        self.max_out.is_empty()
            && self.max_in.is_empty()
            && self.min_out.is_empty()
            && self.min_in.is_empty()
            && !self.exact_conditional_degree
    }
}

/// Constructs a proposal for a given starting network.
pub trait ProposalBuilder {
    /// Builds the proposal; failures here are ordinary (non-fatal) errors.
    fn build(
        &self,
        network: &Network,
        constraints: &DegreeConstraints,
    ) -> Result<Box<dyn Proposal>, TergmError>;
}

impl<F> ProposalBuilder for F
where
    F: Fn(&Network, &DegreeConstraints) -> Result<Box<dyn Proposal>, TergmError>,
{
    fn build(
        &self,
        network: &Network,
        constraints: &DegreeConstraints,
    ) -> Result<Box<dyn Proposal>, TergmError> {
        self(network, constraints)
    }
}

/// Converts an unrecoverable outcome into the fatal error family.
pub(crate) fn unrecoverable(proposal: &str, info: ErrorInfo) -> TergmError {
    TergmError::Proposal(
        info.with_context("proposal", proposal)
            .with_hint("discard the networks, models and proposals of this call"),
    )
}
