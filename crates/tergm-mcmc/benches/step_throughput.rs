use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tergm_core::RngHandle;
use tergm_mcmc::{
    simulate, Model, ProcessKind, SamplerConfig, Sampler, SubProcess, ToggleLog,
};
use tergm_net::{Network, NetworkConfig};

#[path = "../tests/common/mod.rs"]
mod common;

use common::{edges_process, undirected_input, Edges, RandomDyad};

fn sub_process(kind: ProcessKind, theta: f64) -> SubProcess {
    let model = Model::new(vec![Box::new(Edges)]).unwrap();
    SubProcess::new(kind, model, Box::new(RandomDyad), vec![theta]).unwrap()
}

fn bench_step(c: &mut Criterion) {
    let primary = Network::new(NetworkConfig::undirected(500)).unwrap();
    let mut sampler = Sampler::new(
        primary,
        sub_process(ProcessKind::Formation, -4.0),
        sub_process(ProcessKind::Dissolution, 2.0),
        ToggleLog::new(1_000),
        50,
        false,
    );
    let mut rng = RngHandle::from_seed(3);
    let mut formation = vec![0.0];
    let mut dissolution = vec![0.0];

    c.bench_function("step_mh50_n500", |b| {
        b.iter(|| {
            black_box(
                sampler
                    .step(&mut rng, &mut formation, &mut dissolution)
                    .unwrap(),
            )
        });
    });
}

fn bench_simulate(c: &mut Criterion) {
    let config = SamplerConfig {
        nsteps: 50,
        mh_interval: 20,
        burnin: 10,
        interval: 2,
        ..SamplerConfig::default()
    };

    c.bench_function("simulate_50_samples", |b| {
        b.iter(|| {
            let input = undirected_input(
                200,
                &[],
                edges_process(RandomDyad, -3.0),
                edges_process(RandomDyad, 1.0),
            );
            black_box(simulate(input, &config, 11).unwrap().status)
        });
    });
}

criterion_group!(benches, bench_step, bench_simulate);
criterion_main!(benches);
