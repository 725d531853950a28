//! Criterion benchmarks for mesh construction, finishing, and copying.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hemesh_bench::{build_reference_mesh, reference_profile};
use hemesh_core::HalfEdge;
use hemesh_mesh::{finish_topology, validate_topology, HalfEdgeMesh};

/// Benchmark: build the 10K-cell reference grid from incidence.
fn bench_from_incidence_10k(c: &mut Criterion) {
    let input = reference_profile();
    c.bench_function("from_incidence_10k", |b| {
        b.iter(|| {
            let mesh = HalfEdgeMesh::from_incidence(
                &input.coords,
                &input.cells,
                input.node_count,
                input.cell_count,
                input.vertices_per_cell,
            )
            .unwrap();
            black_box(mesh.number_of::<HalfEdge>());
        });
    });
}

/// Benchmark: finishing pass on a freshly built reference grid.
fn bench_finish_10k(c: &mut Criterion) {
    let built = reference_profile().build();
    c.bench_function("finish_topology_10k", |b| {
        b.iter_batched(
            || built.clone(),
            |mut mesh| black_box(finish_topology(&mut mesh).unwrap()),
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: validate a finished reference grid.
fn bench_validate_10k(c: &mut Criterion) {
    let mesh = build_reference_mesh();
    c.bench_function("validate_topology_10k", |b| {
        b.iter(|| validate_topology(black_box(&mesh)).unwrap());
    });
}

/// Benchmark: whole-mesh copy into an existing mesh.
fn bench_mesh_copy_10k(c: &mut Criterion) {
    let mesh = build_reference_mesh();
    let mut target = HalfEdgeMesh::new();
    c.bench_function("mesh_copy_10k", |b| {
        b.iter(|| {
            target.copy_from(&mesh);
            black_box(target.memory_bytes());
        });
    });
}

criterion_group!(
    benches,
    bench_from_incidence_10k,
    bench_finish_10k,
    bench_validate_10k,
    bench_mesh_copy_10k
);
criterion_main!(benches);
