//! Benchmarks for Doo-Sabin subdivision.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use doosabin::algo::subdivide::{Adjacency, WeightTable};
use doosabin::prelude::*;
use nalgebra::Point3;

fn create_grid_mesh(n: usize) -> PolyMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11, v01]);
        }
    }

    build_from_quads(&vertices, &faces).unwrap()
}

fn create_cube() -> PolyMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    build_from_quads(&vertices, &faces).unwrap()
}

fn bench_weight_table(c: &mut Criterion) {
    c.bench_function("weight_table_100", |b| {
        b.iter(|| WeightTable::new(black_box(100)).unwrap())
    });
}

fn bench_adjacency(c: &mut Criterion) {
    let mesh = create_grid_mesh(100);

    c.bench_function("adjacency_grid_100x100", |b| {
        b.iter(|| Adjacency::build(black_box(&mesh)).unwrap())
    });
}

fn bench_subdivision(c: &mut Criterion) {
    let grid = create_grid_mesh(50);
    let cube = create_cube();

    let parallel = DooSabin::new(&SubdivideOptions::new(1)).unwrap();
    let sequential = DooSabin::new(&SubdivideOptions::new(1).sequential()).unwrap();

    c.bench_function("doo_sabin_grid_50x50_parallel", |b| {
        b.iter(|| parallel.subdivide_once(black_box(&grid)).unwrap())
    });

    c.bench_function("doo_sabin_grid_50x50_sequential", |b| {
        b.iter(|| sequential.subdivide_once(black_box(&grid)).unwrap())
    });

    c.bench_function("doo_sabin_cube_4_levels", |b| {
        let options = SubdivideOptions::new(4);
        b.iter(|| doo_sabin_subdivide(black_box(&cube), &options).unwrap())
    });
}

criterion_group!(benches, bench_weight_table, bench_adjacency, bench_subdivision);
criterion_main!(benches);
