use serde::{Deserialize, Serialize};
use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::Timestamp;

use crate::flags::NetworkConfig;
use crate::network::Network;

/// Serializes the network to a compact binary representation using `bincode`.
pub fn network_to_bytes(network: &Network) -> Result<Vec<u8>, TergmError> {
    let serializable = SerializableNetwork::from_network(network);
    bincode::serialize(&serializable)
        .map_err(|err| TergmError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a network from its binary representation.
pub fn network_from_bytes(bytes: &[u8]) -> Result<Network, TergmError> {
    let serializable: SerializableNetwork = bincode::deserialize(bytes)
        .map_err(|err| TergmError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_network()
}

/// Serializes the network to a JSON string.
pub fn network_to_json(network: &Network) -> Result<String, TergmError> {
    let serializable = SerializableNetwork::from_network(network);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| TergmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a network from a JSON string.
pub fn network_from_json(json: &str) -> Result<Network, TergmError> {
    let serializable: SerializableNetwork = serde_json::from_str(json)
        .map_err(|err| TergmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_network()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNetwork {
    config: NetworkConfig,
    edges: Vec<(u32, u32)>,
    #[serde(default)]
    timer: Timestamp,
    #[serde(default)]
    last_toggled: Vec<(u32, u32, Timestamp)>,
}

impl SerializableNetwork {
    fn from_network(network: &Network) -> Self {
        Self {
            config: *network.config(),
            edges: network
                .edges()
                .map(|dyad| (dyad.tail().as_raw(), dyad.head().as_raw()))
                .collect(),
            timer: network.timer(),
            last_toggled: network
                .timestamps()
                .map(|(dyad, time)| (dyad.tail().as_raw(), dyad.head().as_raw(), time))
                .collect(),
        }
    }

    fn into_network(self) -> Result<Network, TergmError> {
        let mut network = Network::from_edges(self.config, &self.edges)?;
        let mut stamps = Vec::with_capacity(self.last_toggled.len());
        for (tail, head, time) in self.last_toggled {
            stamps.push((network.dyad(tail, head)?, time));
        }
        network.restore_timing(self.timer, stamps);
        Ok(network)
    }
}
