mod common;

use common::{builder, edges_process, undirected_input, Broken, Idle};
use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_mcmc::{
    simulate, DegreeConstraints, ProcessSpec, Proposal, SamplerConfig, SimulationInput,
};
use tergm_net::{Network, NetworkConfig};

#[test]
fn unrecoverable_proposal_aborts_the_call() {
    let input = undirected_input(4, &[], edges_process(Broken, 0.0), edges_process(Idle, 0.0));
    let err = simulate(input, &SamplerConfig::default(), 0).unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, TergmError::Proposal(_)));
    assert_eq!(err.info().code, "proposal-state");
    assert_eq!(err.info().context.get("proposal").map(String::as_str), Some("broken"));
    assert!(err.info().hint.is_some());
}

#[test]
fn unrecoverable_failure_during_burn_in_is_fatal() {
    let input = undirected_input(4, &[], edges_process(Idle, 0.0), edges_process(Broken, 0.0));
    let config = SamplerConfig {
        burnin: 2,
        ..SamplerConfig::default()
    };
    let err = simulate(input, &config, 0).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn parameter_length_mismatch_names_the_process() {
    let input = undirected_input(
        4,
        &[],
        edges_process(Idle, 0.0),
        ProcessSpec::new(vec![Box::new(common::Edges)], builder(Idle), vec![0.0, 1.0]),
    );
    let err = simulate(input, &SamplerConfig::default(), 0).unwrap_err();

    assert!(!err.is_fatal());
    assert_eq!(err.info().code, "parameter-length");
    assert_eq!(
        err.info().context.get("process").map(String::as_str),
        Some("dissolution")
    );
}

#[test]
fn out_of_range_initial_edge_is_a_network_error() {
    let input = undirected_input(
        3,
        &[(1, 4)],
        edges_process(Idle, 0.0),
        edges_process(Idle, 0.0),
    );
    let err = simulate(input, &SamplerConfig::default(), 0).unwrap_err();
    assert!(matches!(err, TergmError::Network(_)));
    assert_eq!(err.info().code, "vertex-out-of-range");
}

#[test]
fn bipartite_edges_must_join_the_modes() {
    let input = SimulationInput {
        network: NetworkConfig::undirected(5).with_bipartite(2),
        edges: vec![(1, 2)],
        formation: edges_process(Idle, 0.0),
        dissolution: edges_process(Idle, 0.0),
        constraints: DegreeConstraints::default(),
    };
    let err = simulate(input, &SamplerConfig::default(), 0).unwrap_err();
    assert_eq!(err.info().code, "bipartite-mode");
}

#[test]
fn builder_failure_is_reported_unchanged() {
    let refuse_constraints = |_: &Network,
                              constraints: &DegreeConstraints|
     -> Result<Box<dyn Proposal>, TergmError> {
        if constraints.is_unconstrained() {
            Ok(Box::new(Idle))
        } else {
            Err(TergmError::Config(ErrorInfo::new(
                "unsupported-constraints",
                "degree bounds are not supported by this proposal",
            )))
        }
    };
    let input = SimulationInput {
        network: NetworkConfig::undirected(4),
        edges: Vec::new(),
        formation: ProcessSpec::new(vec![Box::new(common::Edges)], refuse_constraints, vec![0.0]),
        dissolution: edges_process(Idle, 0.0),
        constraints: DegreeConstraints {
            max_out: vec![2; 4],
            ..DegreeConstraints::default()
        },
    };
    let err = simulate(input, &SamplerConfig::default(), 0).unwrap_err();
    assert_eq!(err.info().code, "unsupported-constraints");
    assert!(!err.is_fatal());
}

#[test]
fn zero_interval_is_rejected_before_sampling() {
    let input = undirected_input(2, &[], edges_process(Idle, 0.0), edges_process(Idle, 0.0));
    let config = SamplerConfig {
        interval: 0,
        ..SamplerConfig::default()
    };
    let err = simulate(input, &config, 0).unwrap_err();
    assert!(matches!(err, TergmError::Config(_)));
}
