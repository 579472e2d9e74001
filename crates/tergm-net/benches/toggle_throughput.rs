use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::RngCore;
use tergm_core::RngHandle;
use tergm_net::{Network, NetworkConfig};

fn toggle_bench(c: &mut Criterion) {
    let n = 2_000u32;
    let mut rng = RngHandle::from_seed(42);
    let mut network = Network::new(NetworkConfig::undirected(n)).unwrap();
    let dyads: Vec<_> = (0..10_000)
        .filter_map(|_| {
            let tail = (rng.next_u32() % n) + 1;
            let head = (rng.next_u32() % n) + 1;
            network.dyad(tail, head).ok()
        })
        .collect();

    c.bench_function("toggle_10k", |b| {
        b.iter(|| {
            for dyad in &dyads {
                black_box(network.toggle(*dyad));
            }
        });
    });

    c.bench_function("nth_edge", |b| {
        b.iter(|| black_box(network.nth_edge(network.edge_count() / 2)));
    });
}

criterion_group!(benches, toggle_bench);
criterion_main!(benches);
