#![deny(missing_docs)]

//! Edge-set network storage for the separable temporal network sampler.
//!
//! A [`Network`] is a set of canonical [`Dyad`](tergm_core::Dyad)s over the
//! fixed vertex set `1..=n`, plus the step timer and the per-dyad timestamps
//! written when toggles are committed. [`NetworkPair`] couples the primary
//! network with the discordant scratch network used while a phase is open.

mod flags;
mod hash;
mod network;
mod pair;
mod serialization;

pub use flags::NetworkConfig;
pub use hash::canonical_hash;
pub use network::Network;
pub use pair::NetworkPair;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{network_from_bytes, network_from_json, network_to_bytes, network_to_json};
