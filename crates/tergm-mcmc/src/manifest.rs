use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::{RunProvenance, SchemaVersion};

use crate::config::SamplerConfig;
use crate::driver::SamplerStatus;
use crate::metrics::EdgeSummary;

/// Structured manifest describing a finished simulation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Schema of this manifest.
    pub schema_version: SchemaVersion,
    /// Configuration used for the run.
    pub config: SamplerConfig,
    /// How the run ended.
    pub status: SamplerStatus,
    /// Seed, network hashes, timestamp and tool versions.
    pub provenance: RunProvenance,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Term names of the formation model.
    pub formation_terms: Vec<String>,
    /// Term names of the dissolution model.
    pub dissolution_terms: Vec<String>,
    /// Proposal names keyed by sub-process.
    pub proposals: BTreeMap<String, String>,
    /// Number of samples recorded before the run ended.
    pub samples_completed: usize,
    /// Number of toggle records held by the log.
    pub toggles_logged: usize,
    /// Acceptance rates keyed by sub-process.
    pub acceptance_rates: BTreeMap<String, f64>,
    /// Edge-count summary over the completed samples.
    pub edge_summary: EdgeSummary,
    /// Metrics file produced during the run (relative to run directory).
    pub metrics_file: Option<PathBuf>,
    /// Final network export (relative to run directory).
    pub end_state_file: Option<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), TergmError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                TergmError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            TergmError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            TergmError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, TergmError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            TergmError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            TergmError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Builds the provenance block for a run ending now.
pub fn provenance(seed: u64, initial_hash: String, final_hash: String) -> RunProvenance {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    RunProvenance {
        initial_network_hash: initial_hash,
        final_network_hash: final_hash,
        seed,
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions,
    }
}
