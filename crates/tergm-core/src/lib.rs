#![deny(missing_docs)]

//! Core identifiers, errors and RNG handling shared by the separable temporal
//! network sampler crates.
//!
//! Vertices are 1-based: a network over `n` nodes uses vertices `1..=n`. Every
//! random draw made during a simulation call goes through a single
//! [`RngHandle`] owned by that call.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, TergmError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::Dyad;

/// Identifier for a vertex of a network (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vertex(u32);

impl Vertex {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

/// Discrete time step counter value. Step `t` stamps every toggle it commits.
pub type Timestamp = u64;
