use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use stratum::assign_ranks;
use stratum::graphlib::Graph;

/// Layered DAG with a deterministic sprinkle of skip edges and self-loops.
fn layered_graph(layers: usize, width: usize) -> Graph {
    let mut g = Graph::new();
    let id = |layer: usize, i: usize| format!("n{layer}_{i}");
    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            g.set_edge(id(layer, i), id(layer + 1, (i * 7 + 3) % width));
            g.set_edge(id(layer, i), id(layer + 1, i));
            if layer + 2 < layers && i % 5 == 0 {
                g.set_edge(id(layer, i), id(layer + 2, (i + 1) % width));
            }
            if i % 11 == 0 {
                g.set_edge(id(layer, i), id(layer, i));
            }
        }
    }
    g
}

fn bench_assign_ranks(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_ranks");
    for &(layers, width) in &[(10usize, 10usize), (30, 30), (60, 50)] {
        let g = layered_graph(layers, width);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{layers}x{width}")),
            &g,
            |b, g| b.iter(|| black_box(assign_ranks(black_box(g)))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_assign_ranks);
criterion_main!(benches);
