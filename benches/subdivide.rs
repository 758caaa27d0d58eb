use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cubesubdiv::{subdivide, BoundingBox, GeometryKernel, Hexahedron, PolyhedralKernel};

fn benchmark_subdivide(c: &mut Criterion) {
    let cell = Hexahedron::parallelepiped([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [2.0, 10.0, 0.0], [1.0, 1.0, 10.0]);

    c.bench_function("subdivide_parallelepiped", |b| {
        b.iter(|| black_box(subdivide(&PolyhedralKernel, black_box(&cell), 0.01).unwrap()))
    });
}

fn benchmark_mass_properties(c: &mut Criterion) {
    let bounds = BoundingBox::cube(50.0, 50.0, 50.0, 100.0);
    let mut cells = vec![Hexahedron::from_bounds(bounds)];
    for _ in 0..3 {
        cells = cells
            .iter()
            .flat_map(|cell| subdivide(&PolyhedralKernel, cell, 0.01).unwrap())
            .collect();
    }

    c.bench_function("volume_and_centroid_512", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(PolyhedralKernel.volume_and_centroid(cell));
            }
        })
    });
}

criterion_group!(benches, benchmark_subdivide, benchmark_mass_properties);
criterion_main!(benches);
