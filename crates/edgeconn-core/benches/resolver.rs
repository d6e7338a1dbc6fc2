use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use edgeconn_core::*;

fn create_graph(nodes: usize) -> EdgeConnections {
    let mut conn = EdgeConnections::new(MemoryGraph::new()).unwrap();
    for i in 0..nodes {
        let angle = i as f64 / nodes as f64 * std::f64::consts::TAU;
        conn.add_node(
            NodeSpec::new(Position::new(angle.cos() * 500.0, angle.sin() * 500.0))
                .with_id(format!("n{}", i)),
        )
        .unwrap();
    }
    conn
}

/// Ring of node-to-node edges plus one edge-to-edge layer on top, supplied
/// with the dependent layer first.
fn layered_batch(nodes: usize) -> Vec<EdgeDescriptor> {
    let mut batch = Vec::with_capacity(nodes * 2);
    for i in 0..nodes {
        batch.push(
            EdgeDescriptor::new(format!("r{}", i), format!("r{}", (i + 1) % nodes))
                .with_id(format!("l{}", i)),
        );
    }
    for i in 0..nodes {
        batch.push(
            EdgeDescriptor::new(format!("n{}", i), format!("n{}", (i + 1) % nodes))
                .with_id(format!("r{}", i)),
        );
    }
    batch
}

fn bench_add_edges_inverted(c: &mut Criterion) {
    c.bench_function("add_edges 200 inverted", |b| {
        b.iter_batched(
            || (create_graph(200), layered_batch(200)),
            |(mut conn, batch)| {
                let outcome = conn.add_edges(batch).unwrap();
                assert!(outcome.is_complete());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_move_cascade(c: &mut Criterion) {
    let mut conn = create_graph(200);
    conn.add_edges(layered_batch(200)).unwrap();
    let mut step = 0.0;

    c.bench_function("move node with edge-to-edge cascade", |b| {
        b.iter(|| {
            step += 1.0;
            conn.move_node("n0", Position::new(500.0 + step, step)).unwrap();
        });
    });
}

criterion_group!(benches, bench_add_edges_inverted, bench_move_cascade);
criterion_main!(benches);
