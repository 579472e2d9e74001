#![deny(missing_docs)]

//! Separable temporal network sampler.
//!
//! Every time step runs a dissolution phase and a formation phase, each an
//! inner Metropolis-Hastings chain driven by its own [`Model`] and
//! [`Proposal`]. Both phases start from the same baseline network: accepted
//! toggles are staged on a discordant scratch network, extracted, and only
//! then committed together, at which point statistics are accumulated and
//! toggles are timestamped.
//!
//! [`simulate`] is the call boundary. Model terms ([`ChangeStatistic`]) and
//! proposals ([`ProposalBuilder`]) are supplied by the caller.

/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Burn-in and sampling loop with capacity checks.
pub mod driver;
/// Public `simulate` entry points.
pub mod kernel;
/// Run manifest serialization helpers.
pub mod manifest;
/// Per-sample metrics and acceptance summaries.
pub mod metrics;
/// Change-statistic terms and models.
pub mod model;
/// Inner MH chain and toggle extraction.
pub mod phase;
/// Proposal trait, outcomes and builders.
pub mod proposal;
/// Step orchestration and commit.
pub mod step;
/// Bounded toggle log.
pub mod toggle_log;
/// Statistic trajectories.
pub mod trajectory;

pub use config::{OutputConfig, SamplerConfig, SeedPolicy};
pub use driver::{drive, DriverOutput, SamplerStatus};
pub use kernel::{simulate, simulate_replicates, ProcessSpec, SimulationInput, SimulationOutput};
pub use manifest::RunManifest;
pub use metrics::{EdgeSummary, MetricsRecorder, SampleMetric};
pub use model::{ChangeStatistic, Model};
pub use phase::{PhaseTally, ProcessKind, SubProcess};
pub use proposal::{DegreeConstraints, Proposal, ProposalBuilder, ProposalOutcome};
pub use step::{commit, Sampler, StepReport};
pub use toggle_log::{ToggleLog, ToggleRecord};
pub use trajectory::Trajectory;
