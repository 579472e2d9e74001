use serde::{Deserialize, Serialize};
use tergm_core::provenance::SchemaVersion;

/// Structural options of a [`Network`](crate::Network). Fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of vertices; valid vertices are `1..=n_nodes`.
    pub n_nodes: u32,
    /// Whether edges are ordered (tail → head).
    pub directed: bool,
    /// Size of the first mode for bipartite networks; `0` means not bipartite.
    ///
    /// When set, every edge joins a first-mode vertex (`1..=bipartite`) as
    /// tail to a second-mode vertex (`bipartite+1..=n_nodes`) as head.
    #[serde(default)]
    pub bipartite: u32,
    /// Schema version stored alongside serialized payloads.
    #[serde(default = "default_schema")]
    pub schema_version: SchemaVersion,
}

fn default_schema() -> SchemaVersion {
    SchemaVersion::new(1, 0, 0)
}

impl NetworkConfig {
    /// Undirected, unipartite configuration over `n_nodes` vertices.
    pub fn undirected(n_nodes: u32) -> Self {
        Self {
            n_nodes,
            directed: false,
            bipartite: 0,
            schema_version: default_schema(),
        }
    }

    /// Directed, unipartite configuration over `n_nodes` vertices.
    pub fn directed(n_nodes: u32) -> Self {
        Self {
            directed: true,
            ..Self::undirected(n_nodes)
        }
    }

    /// Returns a copy with the bipartite split point set.
    pub fn with_bipartite(mut self, first_mode: u32) -> Self {
        self.bipartite = first_mode;
        self
    }

    /// Whether the network is bipartite.
    pub fn is_bipartite(&self) -> bool {
        self.bipartite > 0
    }

    /// Number of dyads an edge may occupy.
    pub fn dyad_count(&self) -> u64 {
        let n = u64::from(self.n_nodes);
        if self.is_bipartite() {
            let b = u64::from(self.bipartite);
            b * (n - b)
        } else if self.directed {
            n * n.saturating_sub(1)
        } else {
            n * n.saturating_sub(1) / 2
        }
    }
}
