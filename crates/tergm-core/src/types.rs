use serde::{Deserialize, Serialize};

use crate::Vertex;

/// Ordered vertex pair naming a potential edge.
///
/// Undirected dyads are always stored with the smaller endpoint as the tail;
/// only directed dyads may carry `tail > head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dyad {
    tail: Vertex,
    head: Vertex,
}

impl Dyad {
    /// Builds a dyad, canonicalizing the endpoint order for undirected networks.
    pub fn new(tail: Vertex, head: Vertex, directed: bool) -> Self {
        if directed || tail <= head {
            Self { tail, head }
        } else {
            Self {
                tail: head,
                head: tail,
            }
        }
    }

    /// Shorthand for a directed dyad from raw vertex indices.
    pub fn directed(tail: u32, head: u32) -> Self {
        Self::new(Vertex::from_raw(tail), Vertex::from_raw(head), true)
    }

    /// Shorthand for an undirected dyad from raw vertex indices.
    pub fn undirected(a: u32, b: u32) -> Self {
        Self::new(Vertex::from_raw(a), Vertex::from_raw(b), false)
    }

    /// Tail (first) endpoint.
    pub fn tail(&self) -> Vertex {
        self.tail
    }

    /// Head (second) endpoint.
    pub fn head(&self) -> Vertex {
        self.head
    }

    /// Whether both endpoints coincide.
    pub fn is_loop(&self) -> bool {
        self.tail == self.head
    }
}
