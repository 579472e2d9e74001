use tergm_core::Dyad;

use crate::network::Network;

/// The authoritative network together with its discordant shadow.
///
/// During a phase every accepted toggle is applied to both members, so the
/// discordant network holds exactly the dyads whose state differs from the
/// primary network at the start of the phase. Outside a phase it is empty.
#[derive(Debug, Clone)]
pub struct NetworkPair {
    /// Externally visible network state.
    pub primary: Network,
    /// Scratch network of dyads toggled during the current phase.
    pub discordant: Network,
}

impl NetworkPair {
    /// Wraps `primary` with an empty discordant network over the same vertices.
    pub fn new(primary: Network) -> Self {
        let discordant = primary.empty_like();
        Self {
            primary,
            discordant,
        }
    }

    /// Provisionally toggles `dyad` on both networks.
    pub fn toggle_both(&mut self, dyad: Dyad) {
        self.primary.toggle(dyad);
        self.discordant.toggle(dyad);
    }

    /// Whether no phase toggles are outstanding.
    pub fn is_settled(&self) -> bool {
        self.discordant.is_empty()
    }

    /// Consumes the pair, returning the primary network.
    pub fn into_primary(self) -> Network {
        self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::NetworkConfig;

    #[test]
    fn toggle_both_tracks_discord() {
        let primary = Network::from_edges(NetworkConfig::undirected(3), &[(1, 2)]).unwrap();
        let mut pair = NetworkPair::new(primary);
        assert!(pair.is_settled());

        let existing = Dyad::undirected(1, 2);
        let absent = Dyad::undirected(2, 3);
        pair.toggle_both(existing);
        pair.toggle_both(absent);
        assert!(!pair.primary.contains(&existing));
        assert!(pair.primary.contains(&absent));
        assert_eq!(pair.discordant.edge_count(), 2);

        pair.toggle_both(absent);
        assert_eq!(pair.discordant.edge_count(), 1);
        assert!(!pair.is_settled());
    }
}
