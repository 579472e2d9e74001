use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::{Dyad, RngHandle};
use tergm_net::{canonical_hash, network_to_json, Network, NetworkConfig};
use tracing::debug;

use crate::config::{OutputConfig, SamplerConfig};
use crate::determinism;
use crate::driver::{self, SamplerStatus};
use crate::manifest::{self, RunManifest};
use crate::metrics::{self, EdgeSummary, MetricsRecorder, SampleMetric};
use crate::model::{ChangeStatistic, Model};
use crate::phase::{ProcessKind, SubProcess};
use crate::proposal::{DegreeConstraints, ProposalBuilder};
use crate::step::Sampler;
use crate::toggle_log::ToggleLog;
use crate::trajectory::Trajectory;

/// Terms, proposal and parameters of one sub-process.
pub struct ProcessSpec {
    /// Model terms in statistic order.
    pub terms: Vec<Box<dyn ChangeStatistic>>,
    /// Constructs the proposal once the initial network exists.
    pub proposal: Box<dyn ProposalBuilder>,
    /// Parameter vector, one entry per statistic.
    pub theta: Vec<f64>,
    /// Statistics the trajectory starts from. Defaults to all zeros.
    pub initial_stats: Option<Vec<f64>>,
}

impl ProcessSpec {
    /// Bundles terms, a proposal builder and parameters.
    pub fn new(
        terms: Vec<Box<dyn ChangeStatistic>>,
        proposal: impl ProposalBuilder + 'static,
        theta: Vec<f64>,
    ) -> Self {
        Self {
            terms,
            proposal: Box::new(proposal),
            theta,
            initial_stats: None,
        }
    }

    /// Sets the statistics the trajectory starts from.
    pub fn with_initial_stats(mut self, stats: Vec<f64>) -> Self {
        self.initial_stats = Some(stats);
        self
    }
}

/// Everything a simulation call needs besides the sampler settings.
pub struct SimulationInput {
    /// Vertex set and flags of the network.
    pub network: NetworkConfig,
    /// Initial `(tail, head)` edge list.
    pub edges: Vec<(u32, u32)>,
    /// Formation sub-process.
    pub formation: ProcessSpec,
    /// Dissolution sub-process.
    pub dissolution: ProcessSpec,
    /// Degree bounds forwarded to both proposal builders.
    pub constraints: DegreeConstraints,
}

/// Results returned to callers after a simulation call.
#[derive(Debug)]
pub struct SimulationOutput {
    /// How the run ended.
    pub status: SamplerStatus,
    /// Formation statistics per completed sample.
    pub formation: Trajectory,
    /// Dissolution statistics per completed sample.
    pub dissolution: Trajectory,
    /// Final edge list, present only for `OK` runs with a non-zero edge cap.
    pub final_edges: Option<Vec<Dyad>>,
    /// Toggle log as left by the run.
    pub toggles: ToggleLog,
    /// Final primary network, including timer and toggle timestamps.
    pub network: Network,
    /// Acceptance rates keyed by sub-process.
    pub acceptance: BTreeMap<String, f64>,
    /// Per-sample metrics collected during the run.
    pub samples: Vec<SampleMetric>,
    /// Edge-count mean and variance over the completed samples.
    pub edge_summary: EdgeSummary,
    /// Canonical hash of the initial network.
    pub initial_network_hash: String,
    /// Canonical hash of the final network.
    pub final_network_hash: String,
    /// Metrics CSV written during the run.
    pub metrics_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
}

/// Runs one separable temporal simulation seeded with `seed`.
///
/// A [`TergmError::Proposal`] error means a proposal failed unrecoverably
/// mid-run; nothing built for the call may be reused. Capacity exhaustion is
/// not an error and is reported through [`SimulationOutput::status`].
pub fn simulate(
    input: SimulationInput,
    config: &SamplerConfig,
    seed: u64,
) -> Result<SimulationOutput, TergmError> {
    config.validate()?;
    let SimulationInput {
        network,
        edges,
        formation,
        dissolution,
        constraints,
    } = input;

    let primary = Network::from_edges(network, &edges)?;
    let initial_network_hash = canonical_hash(&primary);

    let (formation_process, formation_initial) =
        build_process(ProcessKind::Formation, formation, &primary, &constraints)?;
    let (dissolution_process, dissolution_initial) =
        build_process(ProcessKind::Dissolution, dissolution, &primary, &constraints)?;

    let mut rng = RngHandle::from_seed(seed);
    let mut recorder = MetricsRecorder::new();
    let mut sampler = Sampler::new(
        primary,
        formation_process,
        dissolution_process,
        ToggleLog::new(config.max_changes),
        config.mh_interval,
        config.full_resolution_logging(),
    );

    let outcome = driver::drive(
        &mut sampler,
        config,
        formation_initial,
        dissolution_initial,
        &mut rng,
        &mut recorder,
    )?;

    let acceptance = metrics::acceptance_rates(
        &sampler.formation().tally(),
        &sampler.dissolution().tally(),
    );
    let tallies = (sampler.formation().tally(), sampler.dissolution().tally());
    let proposals = proposal_names(&sampler);
    let term_names = (
        sampler.formation().model().term_names(),
        sampler.dissolution().model().term_names(),
    );
    let (network, toggles) = sampler.into_parts();
    let final_network_hash = canonical_hash(&network);

    let final_edges = if outcome.status.is_ok() && config.max_edges > 0 {
        Some(network.edge_list(config.max_edges - 1))
    } else {
        None
    };

    debug!(
        status = outcome.status.as_str(),
        edges = network.edge_count(),
        toggles = toggles.len(),
        formation_proposed = tallies.0.proposed,
        dissolution_proposed = tallies.1.proposed,
        "simulation call finished"
    );

    let edge_summary = recorder.summary();
    let artefacts = Artefacts {
        config,
        seed,
        status: outcome.status,
        recorder: &recorder,
        network: &network,
        toggles: &toggles,
        samples_completed: outcome.formation.len(),
        initial_network_hash: &initial_network_hash,
        final_network_hash: &final_network_hash,
        term_names,
        proposals,
        acceptance: &acceptance,
        edge_summary: &edge_summary,
    };
    let (metrics_path, manifest_path) = artefacts.write()?;

    Ok(SimulationOutput {
        status: outcome.status,
        formation: outcome.formation,
        dissolution: outcome.dissolution,
        final_edges,
        toggles,
        network,
        acceptance,
        samples: recorder.into_samples(),
        edge_summary,
        initial_network_hash,
        final_network_hash,
        metrics_path,
        manifest_path,
    })
}

/// Runs `config.seed_policy.replicates` independent simulations.
///
/// Replicate `r` is seeded with [`determinism::replicate_seed`] of the master
/// seed and writes its artefacts under `replicate-rrr/` of the run directory.
/// `make_input` is called once per replicate since inputs own their terms and
/// proposal builders.
pub fn simulate_replicates<F>(
    config: &SamplerConfig,
    mut make_input: F,
) -> Result<Vec<SimulationOutput>, TergmError>
where
    F: FnMut(usize) -> Result<SimulationInput, TergmError>,
{
    config.validate()?;
    let master_seed = config.seed_policy.master_seed;
    let mut outputs = Vec::with_capacity(config.seed_policy.replicates);
    for replicate in 0..config.seed_policy.replicates {
        let mut replicate_config = config.clone();
        replicate_config.output.run_directory = config
            .output
            .run_directory
            .as_ref()
            .map(|dir| dir.join(format!("replicate-{replicate:03}")));
        let seed = determinism::replicate_seed(master_seed, replicate);
        debug!(replicate, seed, "starting replicate");
        outputs.push(simulate(make_input(replicate)?, &replicate_config, seed)?);
    }
    Ok(outputs)
}

fn build_process(
    kind: ProcessKind,
    spec: ProcessSpec,
    network: &Network,
    constraints: &DegreeConstraints,
) -> Result<(SubProcess, Vec<f64>), TergmError> {
    let model = Model::new(spec.terms)
        .map_err(|err| with_process(err, kind))?;
    let initial = match spec.initial_stats {
        Some(stats) if stats.len() != model.n_stats() => {
            return Err(TergmError::Model(
                ErrorInfo::new(
                    "initial-stats-length",
                    "initial statistics length differs from the number of statistics",
                )
                .with_context("process", kind.as_str())
                .with_context("initial", stats.len().to_string())
                .with_context("statistics", model.n_stats().to_string()),
            ));
        }
        Some(stats) => stats,
        None => vec![0.0; model.n_stats()],
    };
    let proposal = spec.proposal.build(network, constraints)?;
    let process = SubProcess::new(kind, model, proposal, spec.theta)
        .map_err(|err| with_process(err, kind))?;
    Ok((process, initial))
}

fn with_process(err: TergmError, kind: ProcessKind) -> TergmError {
    match err {
        TergmError::Model(info) => TergmError::Model(info.with_context("process", kind.as_str())),
        other => other,
    }
}

fn proposal_names(sampler: &Sampler) -> BTreeMap<String, String> {
    [sampler.formation(), sampler.dissolution()]
        .into_iter()
        .map(|process| {
            (
                process.kind().as_str().to_string(),
                process.proposal_name().to_string(),
            )
        })
        .collect()
}

struct Artefacts<'a> {
    config: &'a SamplerConfig,
    seed: u64,
    status: SamplerStatus,
    recorder: &'a MetricsRecorder,
    network: &'a Network,
    toggles: &'a ToggleLog,
    samples_completed: usize,
    initial_network_hash: &'a str,
    final_network_hash: &'a str,
    term_names: (Vec<String>, Vec<String>),
    proposals: BTreeMap<String, String>,
    acceptance: &'a BTreeMap<String, f64>,
    edge_summary: &'a EdgeSummary,
}

impl Artefacts<'_> {
    fn write(self) -> Result<(Option<PathBuf>, Option<PathBuf>), TergmError> {
        let OutputConfig {
            run_directory,
            metrics_file,
            manifest_file,
            end_state_dir,
        } = &self.config.output;
        let Some(run_dir) = run_directory else {
            return Ok((None, None));
        };
        std::fs::create_dir_all(run_dir).map_err(|err| {
            TergmError::Serde(
                ErrorInfo::new("run-dir-create", err.to_string())
                    .with_context("path", run_dir.display().to_string()),
            )
        })?;

        let metrics_path = run_dir.join(metrics_file);
        self.recorder.write_csv(&metrics_path).map_err(|err| {
            TergmError::Serde(
                ErrorInfo::new("metrics-write", err.to_string())
                    .with_context("path", metrics_path.display().to_string()),
            )
        })?;

        let end_state_path = write_end_state(self.network, &run_dir.join(end_state_dir))?;

        let manifest_path = run_dir.join(manifest_file);
        let (formation_terms, dissolution_terms) = self.term_names;
        let manifest = RunManifest {
            schema_version: self.network.config().schema_version,
            config: self.config.clone(),
            status: self.status,
            provenance: manifest::provenance(
                self.seed,
                self.initial_network_hash.to_string(),
                self.final_network_hash.to_string(),
            ),
            seed_label: self.config.seed_policy.label.clone(),
            formation_terms,
            dissolution_terms,
            proposals: self.proposals,
            samples_completed: self.samples_completed,
            toggles_logged: self.toggles.len(),
            acceptance_rates: self.acceptance.clone(),
            edge_summary: self.edge_summary.clone(),
            metrics_file: relative_to(&metrics_path, run_dir),
            end_state_file: relative_to(&end_state_path, run_dir),
        };
        manifest.write(&manifest_path)?;
        Ok((Some(metrics_path), Some(manifest_path)))
    }
}

fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

fn write_end_state(network: &Network, dir: &Path) -> Result<PathBuf, TergmError> {
    std::fs::create_dir_all(dir).map_err(|err| {
        TergmError::Serde(
            ErrorInfo::new("end-state-mkdir", err.to_string())
                .with_context("path", dir.display().to_string()),
        )
    })?;
    let network_path = dir.join("network.json");
    std::fs::write(&network_path, network_to_json(network)?).map_err(|err| {
        TergmError::Serde(
            ErrorInfo::new("end-state-network-write", err.to_string())
                .with_context("path", network_path.display().to_string()),
        )
    })?;
    Ok(network_path)
}
