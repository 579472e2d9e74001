use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tergm_core::errors::{ErrorInfo, TergmError};

/// YAML-configurable parameters governing a simulation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of recorded samples.
    pub nsteps: usize,
    /// Length of the inner MH chain run by each phase. `0` runs empty phases.
    #[serde(default = "default_mh_interval")]
    pub mh_interval: usize,
    /// Number of discarded time steps before sampling.
    #[serde(default)]
    pub burnin: usize,
    /// Number of time steps folded into each recorded sample.
    #[serde(default = "default_interval")]
    pub interval: usize,
    /// Returnable network size. `0` disables both the cap and the final edge list.
    #[serde(default = "default_max_edges")]
    pub max_edges: usize,
    /// Capacity of the toggle log.
    #[serde(default = "default_max_changes")]
    pub max_changes: usize,
    /// Promotes progress messages from `debug` to `info`.
    #[serde(default)]
    pub verbose: bool,
    /// Master seed and replicate policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_mh_interval() -> usize {
    1
}

fn default_interval() -> usize {
    1
}

fn default_max_edges() -> usize {
    100_000
}

fn default_max_changes() -> usize {
    1_000_000
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            nsteps: 100,
            mh_interval: default_mh_interval(),
            burnin: 0,
            interval: default_interval(),
            max_edges: default_max_edges(),
            max_changes: default_max_changes(),
            verbose: false,
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SamplerConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, TergmError> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|err| TergmError::Config(ErrorInfo::new("config-parse", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, TergmError> {
        let text = fs::read_to_string(path).map_err(|err| {
            TergmError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Rejects settings the sampler cannot run with.
    ///
    /// Only `interval == 0` is refused. Vertex ranges of the initial edges are
    /// checked when the network is built.
    pub fn validate(&self) -> Result<(), TergmError> {
        if self.interval == 0 {
            return Err(TergmError::Config(
                ErrorInfo::new("zero-interval", "interval must be at least 1")
                    .with_hint("use interval: 1 to record every time step"),
            ));
        }
        Ok(())
    }

    /// Whether every committed toggle must be kept in the log.
    ///
    /// Only runs without burn-in or thinning make every step observable; all
    /// other runs keep just the latest step's toggles.
    pub fn full_resolution_logging(&self) -> bool {
        self.burnin == 0 && self.interval == 1
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run (and to derive replicate seeds).
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Number of independent replicates run by [`simulate_replicates`](crate::simulate_replicates).
    #[serde(default = "default_replicates")]
    pub replicates: usize,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

fn default_replicates() -> usize {
    1
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            replicates: default_replicates(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Created if it does not exist.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Metrics filename relative to `run_directory`.
    #[serde(default = "default_metrics_filename")]
    pub metrics_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
    /// Directory for the final network export.
    #[serde(default = "default_end_state_dir")]
    pub end_state_dir: PathBuf,
}

fn default_metrics_filename() -> PathBuf {
    PathBuf::from("metrics.csv")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_end_state_dir() -> PathBuf {
    PathBuf::from("end_state")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            metrics_file: default_metrics_filename(),
            manifest_file: default_manifest_filename(),
            end_state_dir: default_end_state_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_defaults_fill_missing_fields() {
        let config = SamplerConfig::from_yaml_str("nsteps: 12\nburnin: 3\n").unwrap();
        assert_eq!(config.nsteps, 12);
        assert_eq!(config.burnin, 3);
        assert_eq!(config.interval, 1);
        assert_eq!(config.mh_interval, 1);
        assert!(!config.full_resolution_logging());
        assert_eq!(config.seed_policy.replicates, 1);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = SamplerConfig::from_yaml_str("nsteps: 1\ninterval: 0\n").unwrap_err();
        assert_eq!(err.info().code, "zero-interval");
    }

    #[test]
    fn zero_mh_interval_is_accepted() {
        let config = SamplerConfig::from_yaml_str("nsteps: 2\nmh_interval: 0\n").unwrap();
        assert_eq!(config.mh_interval, 0);
    }

    #[test]
    fn full_resolution_requires_no_burnin_and_no_thinning() {
        let mut config = SamplerConfig::default();
        assert!(config.full_resolution_logging());
        config.interval = 2;
        assert!(!config.full_resolution_logging());
    }
}
