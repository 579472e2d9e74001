use sha2::{Digest, Sha256};

use crate::flags::NetworkConfig;
use crate::network::Network;

/// Computes the canonical structural hash of the network's edge set.
///
/// Timer and timestamps are excluded: two networks with the same vertex set,
/// flags and edges hash identically.
pub fn canonical_hash(network: &Network) -> String {
    let mut hasher = Sha256::new();
    encode_config(network.config(), &mut hasher);
    hasher.update((network.edge_count() as u64).to_le_bytes());
    for dyad in network.edges() {
        hasher.update(dyad.tail().as_raw().to_le_bytes());
        hasher.update(dyad.head().as_raw().to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

fn encode_config(config: &NetworkConfig, hasher: &mut Sha256) {
    if config.directed {
        hasher.update(b"directed");
    } else {
        hasher.update(b"undirected");
    }
    hasher.update(config.n_nodes.to_le_bytes());
    hasher.update(b"bipartite");
    hasher.update(config.bipartite.to_le_bytes());
    hasher.update(config.schema_version.major.to_le_bytes());
    hasher.update(config.schema_version.minor.to_le_bytes());
    hasher.update(config.schema_version.patch.to_le_bytes());
}
