use std::collections::{BTreeMap, BTreeSet};

use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::{Dyad, Timestamp, Vertex};

use crate::flags::NetworkConfig;

/// Mutable edge set over a fixed vertex set, with a step timer and per-dyad
/// last-toggle timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    config: NetworkConfig,
    edges: BTreeSet<Dyad>,
    last_toggled: BTreeMap<Dyad, Timestamp>,
    timer: Timestamp,
}

impl Network {
    /// Creates an empty network after validating the configuration.
    pub fn new(config: NetworkConfig) -> Result<Self, TergmError> {
        if config.bipartite > config.n_nodes {
            return Err(TergmError::Network(
                ErrorInfo::new(
                    "bipartite-split",
                    "bipartite split point exceeds the node count",
                )
                .with_context("bipartite", config.bipartite.to_string())
                .with_context("n_nodes", config.n_nodes.to_string()),
            ));
        }
        if config.is_bipartite() && config.directed {
            return Err(TergmError::Network(ErrorInfo::new(
                "bipartite-directed",
                "bipartite networks must be undirected",
            )));
        }
        Ok(Self {
            config,
            edges: BTreeSet::new(),
            last_toggled: BTreeMap::new(),
            timer: 0,
        })
    }

    /// Creates a network holding the given `(tail, head)` pairs.
    ///
    /// Undirected pairs are canonicalized; repeated pairs collapse to one edge.
    pub fn from_edges(config: NetworkConfig, pairs: &[(u32, u32)]) -> Result<Self, TergmError> {
        let mut network = Self::new(config)?;
        for &(tail, head) in pairs {
            let dyad = network.dyad(tail, head)?;
            network.edges.insert(dyad);
        }
        Ok(network)
    }

    /// Empty network with the same vertex set and flags, used as scratch space.
    pub fn empty_like(&self) -> Self {
        Self {
            config: self.config,
            edges: BTreeSet::new(),
            last_toggled: BTreeMap::new(),
            timer: self.timer,
        }
    }

    /// Returns the configuration used by this network.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Number of vertices.
    pub fn n_nodes(&self) -> u32 {
        self.config.n_nodes
    }

    /// Whether edges are ordered.
    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    /// Validates and canonicalizes a raw vertex pair.
    pub fn dyad(&self, tail: u32, head: u32) -> Result<Dyad, TergmError> {
        for vertex in [tail, head] {
            if vertex == 0 || vertex > self.config.n_nodes {
                return Err(TergmError::Network(
                    ErrorInfo::new("vertex-out-of-range", "vertex outside 1..=n_nodes")
                        .with_context("vertex", vertex.to_string())
                        .with_context("n_nodes", self.config.n_nodes.to_string()),
                ));
            }
        }
        let dyad = Dyad::new(
            Vertex::from_raw(tail),
            Vertex::from_raw(head),
            self.config.directed,
        );
        if dyad.is_loop() {
            return Err(TergmError::Network(
                ErrorInfo::new("self-loop", "loops are not representable")
                    .with_context("vertex", tail.to_string()),
            ));
        }
        if self.config.is_bipartite() {
            let b = self.config.bipartite;
            if dyad.tail().as_raw() > b || dyad.head().as_raw() <= b {
                return Err(TergmError::Network(
                    ErrorInfo::new("bipartite-mode", "edge must join the two modes")
                        .with_context("tail", dyad.tail().as_raw().to_string())
                        .with_context("head", dyad.head().as_raw().to_string())
                        .with_context("bipartite", b.to_string()),
                ));
            }
        }
        Ok(dyad)
    }

    /// Number of edges currently present.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the network has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the dyad currently holds an edge.
    pub fn contains(&self, dyad: &Dyad) -> bool {
        self.edges.contains(dyad)
    }

    /// Flips the presence of `dyad`. Returns `true` if the edge is now present.
    pub fn toggle(&mut self, dyad: Dyad) -> bool {
        if self.edges.remove(&dyad) {
            false
        } else {
            self.edges.insert(dyad);
            true
        }
    }

    /// Flips the presence of `dyad` and stamps it with the current timer.
    pub fn toggle_with_timestamp(&mut self, dyad: Dyad) -> bool {
        self.last_toggled.insert(dyad, self.timer);
        self.toggle(dyad)
    }

    /// Step at which `dyad` was last toggled permanently, if ever.
    pub fn last_toggled(&self, dyad: &Dyad) -> Option<Timestamp> {
        self.last_toggled.get(dyad).copied()
    }

    /// Current value of the step counter.
    pub fn timer(&self) -> Timestamp {
        self.timer
    }

    /// Increments the step counter and returns its new value.
    pub fn advance_timer(&mut self) -> Timestamp {
        self.timer += 1;
        self.timer
    }

    /// Returns the `index`-th edge (0-based) in canonical order.
    pub fn nth_edge(&self, index: usize) -> Option<Dyad> {
        self.edges.iter().nth(index).copied()
    }

    /// Removes and returns the first edge in canonical order.
    pub fn pop_first_edge(&mut self) -> Option<Dyad> {
        self.edges.pop_first()
    }

    /// Iterates over edges in canonical order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Dyad> + '_ {
        self.edges.iter().copied()
    }

    /// Returns at most `limit` edges in canonical order.
    pub fn edge_list(&self, limit: usize) -> Vec<Dyad> {
        self.edges.iter().take(limit).copied().collect()
    }

    /// Number of edges with `vertex` as tail (directed) or endpoint (undirected).
    pub fn out_degree(&self, vertex: Vertex) -> usize {
        if self.config.directed {
            self.edges.iter().filter(|d| d.tail() == vertex).count()
        } else {
            self.degree(vertex)
        }
    }

    /// Number of edges with `vertex` as head (directed) or endpoint (undirected).
    pub fn in_degree(&self, vertex: Vertex) -> usize {
        if self.config.directed {
            self.edges.iter().filter(|d| d.head() == vertex).count()
        } else {
            self.degree(vertex)
        }
    }

    fn degree(&self, vertex: Vertex) -> usize {
        self.edges
            .iter()
            .filter(|d| d.tail() == vertex || d.head() == vertex)
            .count()
    }

    pub(crate) fn timestamps(&self) -> impl Iterator<Item = (Dyad, Timestamp)> + '_ {
        self.last_toggled.iter().map(|(dyad, time)| (*dyad, *time))
    }

    pub(crate) fn restore_timing(&mut self, timer: Timestamp, stamps: Vec<(Dyad, Timestamp)>) {
        self.timer = timer;
        self.last_toggled = stamps.into_iter().collect();
    }
}
