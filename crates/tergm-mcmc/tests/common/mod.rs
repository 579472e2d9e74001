#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::{Dyad, RngHandle, Vertex};
use tergm_mcmc::{
    ChangeStatistic, DegreeConstraints, ProcessSpec, Proposal, ProposalBuilder, ProposalOutcome,
    SimulationInput,
};
use tergm_net::{Network, NetworkConfig};

/// Edge count.
pub struct Edges;

impl ChangeStatistic for Edges {
    fn name(&self) -> &str {
        "edges"
    }

    fn change(&self, dyad: Dyad, network: &Network, delta: &mut [f64]) {
        delta[0] += if network.contains(&dyad) { -1.0 } else { 1.0 };
    }
}

/// Number of edges touching vertex 1, used to get a two-statistic model.
pub struct StarOne;

impl ChangeStatistic for StarOne {
    fn name(&self) -> &str {
        "star-one"
    }

    fn change(&self, dyad: Dyad, network: &Network, delta: &mut [f64]) {
        if dyad.tail().as_raw() == 1 || dyad.head().as_raw() == 1 {
            delta[0] += if network.contains(&dyad) { -1.0 } else { 1.0 };
        }
    }
}

/// Never has a move.
#[derive(Clone)]
pub struct Idle;

impl Proposal for Idle {
    fn name(&self) -> &str {
        "idle"
    }

    fn propose(&mut self, _network: &Network, _rng: &mut RngHandle) -> ProposalOutcome {
        ProposalOutcome::NoMove
    }
}

/// Replays a fixed list of outcomes, then reports no move.
#[derive(Clone)]
pub struct Scripted {
    pub script: VecDeque<ProposalOutcome>,
}

impl Scripted {
    pub fn new(script: Vec<ProposalOutcome>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Proposal for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn propose(&mut self, _network: &Network, _rng: &mut RngHandle) -> ProposalOutcome {
        self.script.pop_front().unwrap_or(ProposalOutcome::NoMove)
    }
}

/// Proposes the first absent dyad in canonical order.
#[derive(Clone)]
pub struct AddMissing;

impl Proposal for AddMissing {
    fn name(&self) -> &str {
        "add-missing"
    }

    fn propose(&mut self, network: &Network, _rng: &mut RngHandle) -> ProposalOutcome {
        let n = network.n_nodes();
        for tail in 1..=n {
            for head in 1..=n {
                if let Ok(dyad) = network.dyad(tail, head) {
                    if !network.contains(&dyad) {
                        return ProposalOutcome::single(dyad);
                    }
                }
            }
        }
        ProposalOutcome::NoMove
    }
}

/// Proposes the first absent dyad whose endpoints still have degree room.
#[derive(Clone)]
pub struct BoundedAdd {
    pub max_out: Vec<u32>,
    pub max_in: Vec<u32>,
}

impl BoundedAdd {
    pub fn from_constraints(constraints: &DegreeConstraints) -> Self {
        Self {
            max_out: constraints.max_out.clone(),
            max_in: constraints.max_in.clone(),
        }
    }

    fn room(bounds: &[u32], vertex: Vertex, degree: usize) -> bool {
        let bound = bounds
            .get(vertex.as_raw() as usize - 1)
            .copied()
            .unwrap_or(u32::MAX);
        (degree as u64) < u64::from(bound)
    }
}

impl Proposal for BoundedAdd {
    fn name(&self) -> &str {
        "bounded-add"
    }

    fn propose(&mut self, network: &Network, _rng: &mut RngHandle) -> ProposalOutcome {
        let n = network.n_nodes();
        for tail in 1..=n {
            for head in 1..=n {
                let Ok(dyad) = network.dyad(tail, head) else {
                    continue;
                };
                if network.contains(&dyad) {
                    continue;
                }
                if Self::room(&self.max_out, dyad.tail(), network.out_degree(dyad.tail()))
                    && Self::room(&self.max_in, dyad.head(), network.in_degree(dyad.head()))
                {
                    return ProposalOutcome::single(dyad);
                }
            }
        }
        ProposalOutcome::NoMove
    }
}

/// Builds a [`BoundedAdd`] from the call's degree constraints.
pub fn bounded_builder() -> impl ProposalBuilder {
    |_: &Network, constraints: &DegreeConstraints| -> Result<Box<dyn Proposal>, TergmError> {
        Ok(Box::new(BoundedAdd::from_constraints(constraints)))
    }
}

/// Proposes removing a uniformly chosen existing edge.
#[derive(Clone)]
pub struct RemoveExisting;

impl Proposal for RemoveExisting {
    fn name(&self) -> &str {
        "remove-existing"
    }

    fn propose(&mut self, network: &Network, rng: &mut RngHandle) -> ProposalOutcome {
        match rng
            .index(network.edge_count())
            .and_then(|k| network.nth_edge(k))
        {
            Some(dyad) => ProposalOutcome::single(dyad),
            None => ProposalOutcome::NoMove,
        }
    }
}

/// Proposes toggling a uniformly chosen dyad.
#[derive(Clone)]
pub struct RandomDyad;

impl Proposal for RandomDyad {
    fn name(&self) -> &str {
        "random-dyad"
    }

    fn propose(&mut self, network: &Network, rng: &mut RngHandle) -> ProposalOutcome {
        let n = network.n_nodes() as usize;
        loop {
            let (Some(tail), Some(head)) = (rng.index(n), rng.index(n)) else {
                return ProposalOutcome::NoMove;
            };
            if let Ok(dyad) = network.dyad(tail as u32 + 1, head as u32 + 1) {
                return ProposalOutcome::single(dyad);
            }
        }
    }
}

/// Reports an internal failure on the first call.
#[derive(Clone)]
pub struct Broken;

impl Proposal for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn propose(&mut self, _network: &Network, _rng: &mut RngHandle) -> ProposalOutcome {
        ProposalOutcome::Unrecoverable(ErrorInfo::new(
            "proposal-state",
            "degree bookkeeping out of sync",
        ))
    }
}

/// Records, at every call, whether a watched dyad is present. Has no moves.
#[derive(Clone)]
pub struct Observer {
    pub dyad: Dyad,
    pub seen: Arc<Mutex<Vec<bool>>>,
    pub phases: Arc<Mutex<usize>>,
}

impl Observer {
    pub fn new(dyad: Dyad) -> Self {
        Self {
            dyad,
            seen: Arc::new(Mutex::new(Vec::new())),
            phases: Arc::new(Mutex::new(0)),
        }
    }
}

impl Proposal for Observer {
    fn name(&self) -> &str {
        "observer"
    }

    fn begin_phase(&mut self, _network: &Network) {
        *self.phases.lock().unwrap() += 1;
    }

    fn propose(&mut self, network: &Network, _rng: &mut RngHandle) -> ProposalOutcome {
        self.seen.lock().unwrap().push(network.contains(&self.dyad));
        ProposalOutcome::NoMove
    }
}

/// Wraps a cloneable proposal into a builder.
pub fn builder<P>(proposal: P) -> impl ProposalBuilder
where
    P: Proposal + Clone + 'static,
{
    move |_: &Network, _: &DegreeConstraints| -> Result<Box<dyn Proposal>, TergmError> {
        Ok(Box::new(proposal.clone()))
    }
}

/// Single-term `edges` sub-process.
pub fn edges_process<P>(proposal: P, theta: f64) -> ProcessSpec
where
    P: Proposal + Clone + 'static,
{
    ProcessSpec::new(vec![Box::new(Edges)], builder(proposal), vec![theta])
}

/// Undirected input over `n` vertices.
pub fn undirected_input(
    n: u32,
    edges: &[(u32, u32)],
    formation: ProcessSpec,
    dissolution: ProcessSpec,
) -> SimulationInput {
    SimulationInput {
        network: NetworkConfig::undirected(n),
        edges: edges.to_vec(),
        formation,
        dissolution,
        constraints: DegreeConstraints::default(),
    }
}

pub fn vertex(raw: u32) -> Vertex {
    Vertex::from_raw(raw)
}
