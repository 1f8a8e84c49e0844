// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_canvas::edges::recompute_all;
use understory_canvas::interaction::{InputEvent, PointerButton, PointerTarget};
use understory_canvas::{Canvas, EdgeRecord, GraphData, Node, NodeRecord, NodeStore, Side};

/// A `cols`-wide grid of cards where each card links to its right and lower
/// neighbours, plus one dangling edge per row.
fn grid(n: usize) -> GraphData {
    let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
    let id = |i: usize| format!("n{i}");
    let mut nodes = Vec::with_capacity(n);
    let mut edges = Vec::with_capacity(2 * n);
    for i in 0..n {
        let (col, row) = (i % cols, i / cols);
        nodes.push(
            NodeRecord::new(id(i), col as f64 * 400.0, row as f64 * 260.0).with_size(280.0, 160.0),
        );
        if col + 1 < cols && i + 1 < n {
            edges.push(EdgeRecord::new(id(i), id(i + 1)).with_sides(Side::Right, Side::Left));
        }
        if i + cols < n {
            edges.push(EdgeRecord::new(id(i), id(i + cols)).with_sides(Side::Bottom, Side::Top));
        }
        if col == 0 {
            edges.push(EdgeRecord::new(id(i), "missing"));
        }
    }
    GraphData::new(nodes, edges)
}

fn bench_recompute_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/recompute_all");
    for n in [64usize, 512, 4_096] {
        let data = grid(n);
        let mut store = NodeStore::new();
        store.replace_all(
            data.nodes
                .iter()
                .map(|r| Node::new(r.id.clone(), r.x, r.y).with_size(r.width, r.height)),
        );
        group.throughput(Throughput::Elements(data.edges.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| black_box(recompute_all(&data.edges, &store)));
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/drag_move");
    for n in [64usize, 512, 4_096] {
        let mut canvas: Canvas = Canvas::default();
        canvas.set_viewport_size(Size::new(1600.0, 1000.0));
        canvas.set_data(grid(n));
        canvas.fit_all();
        let start = canvas.camera().world_to_screen(Point::new(140.0, 80.0));
        canvas.handle(InputEvent::PointerDown {
            position: start,
            button: PointerButton::Primary,
            target: PointerTarget::Node("n0".into()),
        });
        let mut step = 0.0_f64;
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                step = (step + 1.0) % 200.0;
                let changes = canvas.handle(InputEvent::PointerMove {
                    position: Point::new(start.x + step, start.y),
                });
                black_box(changes);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recompute_all, bench_drag);
criterion_main!(benches);
